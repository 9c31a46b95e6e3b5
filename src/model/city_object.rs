//! City objects and the small records hanging off them

use super::attributes::AttributesMap;
use super::core::Envelope;
use super::geometry::Geometry;

/// Feature type of a city object
///
/// The variant name is the CityGML element local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CityObjectType {
    /// Building
    Building,
    /// Room inside a building
    Room,
    /// Outer building installation
    BuildingInstallation,
    /// Furniture inside a building
    BuildingFurniture,
    /// Door opening
    Door,
    /// Window opening
    Window,
    /// Part of a building
    BuildingPart,
    /// Wall boundary surface
    WallSurface,
    /// Roof boundary surface
    RoofSurface,
    /// Ground boundary surface
    GroundSurface,
    /// Virtual closure surface
    ClosureSurface,
    /// Floor surface
    FloorSurface,
    /// Interior wall surface
    InteriorWallSurface,
    /// Ceiling surface
    CeilingSurface,
    /// Outer ceiling surface
    OuterCeilingSurface,
    /// Outer floor surface
    OuterFloorSurface,
    /// Interior building installation
    IntBuildingInstallation,
    /// City furniture
    CityFurniture,
    /// Track
    Track,
    /// Road
    Road,
    /// Railway
    Railway,
    /// Square
    Square,
    /// Generic transportation object
    TransportationObject,
    /// Plant cover
    PlantCover,
    /// Solitary vegetation object
    SolitaryVegetationObject,
    /// Water body
    WaterBody,
    /// Land use area
    LandUse,
    /// Tunnel
    Tunnel,
    /// Bridge
    Bridge,
    /// Bridge construction element
    BridgeConstructionElement,
    /// Bridge installation
    BridgeInstallation,
    /// Part of a bridge
    BridgePart,
    /// Group of city objects
    CityObjectGroup,
    /// Relief feature
    ReliefFeature,
    /// Relief component
    ReliefComponent,
    /// TIN relief
    TINRelief,
    /// Mass point relief
    MassPointRelief,
    /// Breakline relief
    BreaklineRelief,
    /// Raster relief
    RasterRelief,
    /// Generic city object
    GenericCityObject,
}

impl CityObjectType {
    /// CityGML element local name for this type
    pub fn element_name(&self) -> &'static str {
        match self {
            CityObjectType::Building => "Building",
            CityObjectType::Room => "Room",
            CityObjectType::BuildingInstallation => "BuildingInstallation",
            CityObjectType::BuildingFurniture => "BuildingFurniture",
            CityObjectType::Door => "Door",
            CityObjectType::Window => "Window",
            CityObjectType::BuildingPart => "BuildingPart",
            CityObjectType::WallSurface => "WallSurface",
            CityObjectType::RoofSurface => "RoofSurface",
            CityObjectType::GroundSurface => "GroundSurface",
            CityObjectType::ClosureSurface => "ClosureSurface",
            CityObjectType::FloorSurface => "FloorSurface",
            CityObjectType::InteriorWallSurface => "InteriorWallSurface",
            CityObjectType::CeilingSurface => "CeilingSurface",
            CityObjectType::OuterCeilingSurface => "OuterCeilingSurface",
            CityObjectType::OuterFloorSurface => "OuterFloorSurface",
            CityObjectType::IntBuildingInstallation => "IntBuildingInstallation",
            CityObjectType::CityFurniture => "CityFurniture",
            CityObjectType::Track => "Track",
            CityObjectType::Road => "Road",
            CityObjectType::Railway => "Railway",
            CityObjectType::Square => "Square",
            CityObjectType::TransportationObject => "TransportationObject",
            CityObjectType::PlantCover => "PlantCover",
            CityObjectType::SolitaryVegetationObject => "SolitaryVegetationObject",
            CityObjectType::WaterBody => "WaterBody",
            CityObjectType::LandUse => "LandUse",
            CityObjectType::Tunnel => "Tunnel",
            CityObjectType::Bridge => "Bridge",
            CityObjectType::BridgeConstructionElement => "BridgeConstructionElement",
            CityObjectType::BridgeInstallation => "BridgeInstallation",
            CityObjectType::BridgePart => "BridgePart",
            CityObjectType::CityObjectGroup => "CityObjectGroup",
            CityObjectType::ReliefFeature => "ReliefFeature",
            CityObjectType::ReliefComponent => "ReliefComponent",
            CityObjectType::TINRelief => "TINRelief",
            CityObjectType::MassPointRelief => "MassPointRelief",
            CityObjectType::BreaklineRelief => "BreaklineRelief",
            CityObjectType::RasterRelief => "RasterRelief",
            CityObjectType::GenericCityObject => "GenericCityObject",
        }
    }
}

/// Postal address in xAL terms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    /// Country name
    pub country: Option<String>,
    /// City / locality name
    pub locality: Option<String>,
    /// Street name
    pub thoroughfare_name: Option<String>,
    /// House number
    pub thoroughfare_number: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
}

impl Address {
    /// Create an empty address
    pub fn new() -> Self {
        Self::default()
    }
}

/// Reference to the external object an [`ExternalReference`] points at
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalObject {
    /// Object name inside the external information system
    Name(String),
    /// Object URI
    Uri(String),
}

/// Link from a city object to a record in another information system
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalReference {
    /// Identifier
    pub id: String,
    /// URI of the external information system
    pub information_system: String,
    /// The referenced object
    pub external_object: Option<ExternalObject>,
}

impl ExternalReference {
    /// Create an external reference
    pub fn new(information_system: impl Into<String>, external_object: ExternalObject) -> Self {
        Self {
            id: String::new(),
            information_system: information_system.into(),
            external_object: Some(external_object),
        }
    }
}

/// Raster coverage attached to a relief object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RectifiedGridCoverage {
    /// Identifier
    pub id: String,
    /// Extent of the grid
    pub envelope: Envelope,
}

impl RectifiedGridCoverage {
    /// Create a coverage with an identifier and an unset envelope
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            envelope: Envelope::default(),
        }
    }
}

/// A city object and its owned subtree
#[derive(Debug, Clone)]
pub struct CityObject {
    /// Identifier, written as `gml:id`
    pub id: String,
    /// Feature type
    pub object_type: CityObjectType,
    /// Attributes
    pub attributes: AttributesMap,
    /// Geometries, each tagged with its LOD
    pub geometries: Vec<Geometry>,
    /// Child city objects (boundary surfaces, parts, installations, ...)
    pub children: Vec<CityObject>,
    /// Postal address
    pub address: Option<Address>,
    /// External reference
    pub external_reference: Option<ExternalReference>,
    /// Rectified grid coverage
    pub rectified_grid_coverage: Option<RectifiedGridCoverage>,
}

impl CityObject {
    /// Create a city object with no content
    pub fn new(id: impl Into<String>, object_type: CityObjectType) -> Self {
        Self {
            id: id.into(),
            object_type,
            attributes: AttributesMap::new(),
            geometries: Vec::new(),
            children: Vec::new(),
            address: None,
            external_reference: None,
            rectified_grid_coverage: None,
        }
    }
}
