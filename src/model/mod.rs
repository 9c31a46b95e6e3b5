//! Data structures representing CityGML city models

mod attributes;
mod city_object;
mod core;
mod geometry;
mod material;

pub use attributes::{AttributeValue, AttributesMap};

pub use city_object::{
    Address, CityObject, CityObjectType, ExternalObject, ExternalReference, RectifiedGridCoverage,
};

pub use core::{CityModel, Envelope, Vec2, Vec3};

pub use geometry::{Geometry, GeometryType, LineString, LinearRing, Polygon};

pub use material::{
    AppearanceBindings, AppearanceTarget, Color, Material, MaterialTargetDefinition, Rgba,
    Texture, TextureCoordinates, TextureTargetDefinition, WrapMode,
};
