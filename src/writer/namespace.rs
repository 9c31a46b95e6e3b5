//! CityGML 2.0 namespace table and namespace discovery
//!
//! Discovery is the first of the two passes over the city object forest: it
//! finds the namespaces the document needs so the builder can be configured
//! before any element is opened.

use std::collections::BTreeSet;

use crate::model::{CityModel, CityObject, CityObjectType};

/// URI of the default (unprefixed) CityGML namespace
pub const CITYGML_NS_URI: &str = "http://www.opengis.net/citygml/2.0";

/// XML namespaces used in CityGML documents
///
/// Declaration order is variant order (`Ord` follows it). `CityGml` is the
/// unprefixed default namespace and never gets a prefixed declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Namespace {
    /// GML geometry
    Gml,
    /// Building module
    Building,
    /// CityGML core, prefixed
    Core,
    /// City furniture module
    CityFurniture,
    /// Transportation module
    Transportation,
    /// Vegetation module
    Vegetation,
    /// Water body module
    WaterBody,
    /// Land use module
    LandUse,
    /// Tunnel module
    Tunnel,
    /// Bridge module
    Bridge,
    /// City object group module
    CityObjectGroup,
    /// Relief module
    Relief,
    /// Generics module
    Generics,
    /// Appearance module
    Appearance,
    /// OASIS xAL addresses
    Xal,
    /// XML Schema instance
    Xsi,
    /// XLink
    Xlink,
    /// CityGML core, unprefixed default
    CityGml,
}

impl Namespace {
    /// Prefix, `None` for the default namespace
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Namespace::Gml => Some("gml"),
            Namespace::Building => Some("bldg"),
            Namespace::Core => Some("core"),
            Namespace::CityFurniture => Some("frn"),
            Namespace::Transportation => Some("trans"),
            Namespace::Vegetation => Some("veg"),
            Namespace::WaterBody => Some("wtr"),
            Namespace::LandUse => Some("luse"),
            Namespace::Tunnel => Some("sub"),
            Namespace::Bridge => Some("brid"),
            Namespace::CityObjectGroup => Some("grp"),
            Namespace::Relief => Some("dem"),
            Namespace::Generics => Some("gen"),
            Namespace::Appearance => Some("app"),
            Namespace::Xal => Some("xAL"),
            Namespace::Xsi => Some("xsi"),
            Namespace::Xlink => Some("xlink"),
            Namespace::CityGml => None,
        }
    }

    /// Namespace URI
    pub fn uri(&self) -> &'static str {
        match self {
            Namespace::Gml => "http://www.opengis.net/gml",
            Namespace::Building => "http://www.opengis.net/citygml/building/2.0",
            Namespace::Core | Namespace::CityGml => CITYGML_NS_URI,
            Namespace::CityFurniture => "http://www.opengis.net/citygml/cityfurniture/2.0",
            Namespace::Transportation => "http://www.opengis.net/citygml/transportation/2.0",
            Namespace::Vegetation => "http://www.opengis.net/citygml/vegetation/2.0",
            Namespace::WaterBody => "http://www.opengis.net/citygml/waterbody/2.0",
            Namespace::LandUse => "http://www.opengis.net/citygml/landuse/2.0",
            Namespace::Tunnel => "http://www.opengis.net/citygml/tunnel/2.0",
            Namespace::Bridge => "http://www.opengis.net/citygml/bridge/2.0",
            Namespace::CityObjectGroup => "http://www.opengis.net/citygml/cityobjectgroup/2.0",
            Namespace::Relief => "http://www.opengis.net/citygml/relief/2.0",
            Namespace::Generics => "http://www.opengis.net/citygml/generics/2.0",
            Namespace::Appearance => "http://www.opengis.net/citygml/appearance/2.0",
            Namespace::Xal => "urn:oasis:names:tc:ciq:xsdschema:xAL:2.0",
            Namespace::Xsi => "http://www.w3.org/2001/XMLSchema-instance",
            Namespace::Xlink => "http://www.w3.org/1999/xlink",
        }
    }

    /// Location of the XSD for thematic modules
    pub fn schema_location(&self) -> Option<&'static str> {
        match self {
            Namespace::Building => {
                Some("http://schemas.opengis.net/citygml/building/2.0/building.xsd")
            }
            Namespace::CityFurniture => {
                Some("http://schemas.opengis.net/citygml/cityfurniture/2.0/cityFurniture.xsd")
            }
            Namespace::Transportation => {
                Some("http://schemas.opengis.net/citygml/transportation/2.0/transportation.xsd")
            }
            Namespace::Vegetation => {
                Some("http://schemas.opengis.net/citygml/vegetation/2.0/vegetation.xsd")
            }
            Namespace::WaterBody => {
                Some("http://schemas.opengis.net/citygml/waterbody/2.0/waterBody.xsd")
            }
            Namespace::LandUse => {
                Some("http://schemas.opengis.net/citygml/landuse/2.0/landUse.xsd")
            }
            Namespace::Tunnel => Some("http://schemas.opengis.net/citygml/tunnel/2.0/tunnel.xsd"),
            Namespace::Bridge => Some("http://schemas.opengis.net/citygml/bridge/2.0/bridge.xsd"),
            Namespace::CityObjectGroup => Some(
                "http://schemas.opengis.net/citygml/cityobjectgroup/2.0/cityObjectGroup.xsd",
            ),
            Namespace::Relief => Some("http://schemas.opengis.net/citygml/relief/2.0/relief.xsd"),
            Namespace::Generics => {
                Some("http://schemas.opengis.net/citygml/generics/2.0/generics.xsd")
            }
            Namespace::Appearance => {
                Some("http://schemas.opengis.net/citygml/appearance/2.0/appearance.xsd")
            }
            Namespace::Gml
            | Namespace::Core
            | Namespace::Xal
            | Namespace::Xsi
            | Namespace::Xlink
            | Namespace::CityGml => None,
        }
    }
}

/// Namespace of the module a city object type belongs to
pub fn namespace_for(object_type: CityObjectType) -> Namespace {
    use CityObjectType::*;

    match object_type {
        Building
        | Room
        | BuildingInstallation
        | BuildingFurniture
        | Door
        | Window
        | BuildingPart
        | WallSurface
        | RoofSurface
        | GroundSurface
        | ClosureSurface
        | FloorSurface
        | InteriorWallSurface
        | CeilingSurface
        | OuterCeilingSurface
        | OuterFloorSurface
        | IntBuildingInstallation => Namespace::Building,

        CityFurniture => Namespace::CityFurniture,

        Track | Road | Railway | Square | TransportationObject => Namespace::Transportation,

        PlantCover | SolitaryVegetationObject => Namespace::Vegetation,

        WaterBody => Namespace::WaterBody,

        LandUse => Namespace::LandUse,

        Tunnel => Namespace::Tunnel,

        Bridge | BridgeConstructionElement | BridgeInstallation | BridgePart => Namespace::Bridge,

        CityObjectGroup => Namespace::CityObjectGroup,

        ReliefFeature | ReliefComponent | TINRelief | MassPointRelief | BreaklineRelief
        | RasterRelief => Namespace::Relief,

        GenericCityObject => Namespace::Generics,
    }
}

/// Namespaces and schema locations a document needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceUsage {
    /// Namespaces to declare on the root element
    pub namespaces: BTreeSet<Namespace>,
    /// Namespaces listed in `xsi:schemaLocation`
    pub schema_locations: BTreeSet<Namespace>,
}

impl NamespaceUsage {
    /// Walk the whole city object forest and collect the required namespaces
    pub fn collect(model: &CityModel) -> Self {
        let mut usage = Self::default();

        for object in &model.city_objects {
            usage.visit(object);
        }

        for ns in [
            Namespace::Gml,
            Namespace::Core,
            Namespace::Generics,
            Namespace::Xsi,
            Namespace::Xlink,
        ] {
            usage.namespaces.insert(ns);
        }
        usage.schema_locations.insert(Namespace::Generics);

        // Material and texture support is always declared.
        usage.namespaces.insert(Namespace::Appearance);
        usage.schema_locations.insert(Namespace::Appearance);

        usage
    }

    fn visit(&mut self, object: &CityObject) {
        let ns = namespace_for(object.object_type);
        self.namespaces.insert(ns);
        self.schema_locations.insert(ns);

        // Child wrappers and addresses are building-module elements.
        if !object.children.is_empty() || object.address.is_some() {
            self.namespaces.insert(Namespace::Building);
        }
        if object.address.is_some() {
            self.namespaces.insert(Namespace::Xal);
        }

        for child in &object.children {
            self.visit(child);
        }
    }

    /// Prefixed namespaces to declare, in table order
    pub fn declarations(&self) -> impl Iterator<Item = Namespace> + '_ {
        self.namespaces
            .iter()
            .copied()
            .filter(|ns| ns.prefix().is_some())
    }

    /// `xsi:schemaLocation` value: URI/location pairs in table order
    pub fn schema_location_value(&self) -> Option<String> {
        let pairs: Vec<String> = self
            .schema_locations
            .iter()
            .filter_map(|ns| {
                ns.schema_location()
                    .map(|location| format!("{} {}", ns.uri(), location))
            })
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join(" "))
        }
    }
}
