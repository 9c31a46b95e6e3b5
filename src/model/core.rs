//! Core city model types: coordinates, envelopes and the model root

use super::attributes::AttributesMap;
use super::city_object::CityObject;

/// A 3D coordinate in double precision
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vec3 {
    /// Create a new coordinate
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True when any component is NaN
    pub fn has_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

/// A 2D texture coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// U (horizontal) component
    pub x: f32,
    /// V (vertical) component
    pub y: f32,
}

impl Vec2 {
    /// Create a new texture coordinate
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box with an optional spatial reference system
///
/// The default envelope is *unset*: every bound component is NaN, which the
/// writer treats as "no envelope".
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Lower corner
    pub lower: Vec3,
    /// Upper corner
    pub upper: Vec3,
    /// SRS name written on `gml:Envelope`
    pub srs_name: Option<String>,
}

impl Envelope {
    /// Create an envelope from its two corners
    pub fn new(lower: Vec3, upper: Vec3) -> Self {
        Self {
            lower,
            upper,
            srs_name: None,
        }
    }

    /// Set the SRS name
    pub fn with_srs_name(mut self, srs_name: impl Into<String>) -> Self {
        self.srs_name = Some(srs_name.into());
        self
    }

    /// True when no bound component is NaN
    pub fn is_defined(&self) -> bool {
        !self.lower.has_nan() && !self.upper.has_nan()
    }

    /// True when all six bound components are exactly zero
    pub fn is_zero(&self) -> bool {
        self.lower == Vec3::default() && self.upper == Vec3::default()
    }
}

impl Default for Envelope {
    fn default() -> Self {
        let unset = Vec3::new(f64::NAN, f64::NAN, f64::NAN);
        Self::new(unset, unset)
    }
}

/// Complete city model: the unit of encoding
#[derive(Debug, Clone, Default)]
pub struct CityModel {
    /// Model identifier (not written; CityGML 2.0 root carries no id)
    pub id: String,
    /// Spatial reference system of the whole model, written as `srsName`
    pub srs_name: Option<String>,
    /// Bounding box of the model
    pub envelope: Envelope,
    /// Model-level attributes
    pub attributes: AttributesMap,
    /// Root city objects, in document order
    pub city_objects: Vec<CityObject>,
}

impl CityModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of city objects, including nested children
    pub fn city_object_count(&self) -> usize {
        fn count(object: &CityObject) -> usize {
            1 + object.children.iter().map(count).sum::<usize>()
        }
        self.city_objects.iter().map(count).sum()
    }
}
