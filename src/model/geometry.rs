//! Geometry tree: geometries, polygons, rings and line strings

use super::core::Vec3;
use super::material::{AppearanceBindings, AppearanceTarget};

/// Coarse semantic kind declared on a geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeometryType {
    /// No declared kind
    #[default]
    Unknown,
    /// Roof surface
    Roof,
    /// Wall surface
    Wall,
    /// Ground surface
    Ground,
    /// Closure surface
    Closure,
    /// Floor surface
    Floor,
    /// Interior wall surface
    InteriorWall,
    /// Ceiling surface
    Ceiling,
    /// Outer ceiling surface
    OuterCeiling,
    /// Outer floor surface
    OuterFloor,
    /// Triangulated irregular network
    Tin,
}

impl GeometryType {
    /// True for the boundary-surface kinds
    pub fn is_surface(&self) -> bool {
        matches!(
            self,
            GeometryType::Roof
                | GeometryType::Wall
                | GeometryType::Ground
                | GeometryType::Closure
                | GeometryType::Floor
                | GeometryType::InteriorWall
                | GeometryType::Ceiling
                | GeometryType::OuterCeiling
                | GeometryType::OuterFloor
        )
    }
}

/// Closed ring of 3D vertices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearRing {
    /// Identifier
    pub id: String,
    /// Vertices in ring order
    pub vertices: Vec<Vec3>,
}

impl LinearRing {
    /// Create a ring from its vertices
    pub fn new(id: impl Into<String>, vertices: Vec<Vec3>) -> Self {
        Self {
            id: id.into(),
            vertices,
        }
    }
}

/// Open polyline of 3D vertices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineString {
    /// Identifier
    pub id: String,
    /// Vertices in order
    pub vertices: Vec<Vec3>,
}

impl LineString {
    /// Create a line string from its vertices
    pub fn new(id: impl Into<String>, vertices: Vec<Vec3>) -> Self {
        Self {
            id: id.into(),
            vertices,
        }
    }
}

/// Planar polygon with optional holes
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    /// Identifier
    pub id: String,
    /// Outer boundary
    pub exterior: Option<LinearRing>,
    /// Holes
    pub interiors: Vec<LinearRing>,
    /// Materials and textures bound to this polygon
    pub appearance: AppearanceBindings,
}

impl Polygon {
    /// Create a polygon with an outer ring and no holes
    pub fn new(id: impl Into<String>, exterior: LinearRing) -> Self {
        Self {
            id: id.into(),
            exterior: Some(exterior),
            interiors: Vec::new(),
            appearance: AppearanceBindings::new(),
        }
    }
}

impl AppearanceTarget for Polygon {
    fn appearance(&self) -> &AppearanceBindings {
        &self.appearance
    }
}

/// A geometry node: polygons, line strings and nested geometries at one LOD
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    /// Identifier
    pub id: String,
    /// Level of detail (0-4)
    pub lod: u32,
    /// Declared semantic kind
    pub geometry_type: GeometryType,
    /// Polygons
    pub polygons: Vec<Polygon>,
    /// Line strings
    pub line_strings: Vec<LineString>,
    /// Nested geometries
    pub children: Vec<Geometry>,
    /// Materials and textures bound to this geometry
    pub appearance: AppearanceBindings,
}

impl Geometry {
    /// Create an empty geometry
    pub fn new(id: impl Into<String>, lod: u32, geometry_type: GeometryType) -> Self {
        Self {
            id: id.into(),
            lod,
            geometry_type,
            ..Self::default()
        }
    }

    /// True when the geometry has no polygons, line strings or children
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.line_strings.is_empty() && self.children.is_empty()
    }
}

impl AppearanceTarget for Geometry {
    fn appearance(&self) -> &AppearanceBindings {
        &self.appearance
    }
}
