//! # citygml
//!
//! A pure Rust writer for CityGML 2.0 documents.
//!
//! This library encodes an in-memory 3D city model (buildings, transportation,
//! vegetation, relief and the other CityGML thematic modules) as a CityGML 2.0
//! XML document, including GML geometry, xAL addresses, generic attributes and
//! materials and textures from the appearance module.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Only the namespaces a model actually uses are declared
//! - Geometry elements inferred from polygon, line string and solid content
//! - Appearances grouped by theme, each material or texture written once
//! - Atomic file output: a failed save never leaves a partial file behind
//!
//! ## Example
//!
//! ```no_run
//! use citygml::{CityModel, CityObject, CityObjectType, WriterConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut model = CityModel::new();
//! model.srs_name = Some("EPSG:25832".to_string());
//! model
//!     .city_objects
//!     .push(CityObject::new("building_1", CityObjectType::Building));
//!
//! citygml::save(&model, "city.gml", &WriterConfig::default())?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod model;
pub mod writer;

pub use config::WriterConfig;
pub use error::{Error, Result};
pub use model::{
    Address, AppearanceBindings, AppearanceTarget, AttributeValue, AttributesMap, CityModel,
    CityObject, CityObjectType, Color, Envelope, ExternalObject, ExternalReference, Geometry,
    GeometryType, LineString, LinearRing, Material, MaterialTargetDefinition, Polygon,
    RectifiedGridCoverage, Rgba, Texture, TextureCoordinates, TextureTargetDefinition, Vec2, Vec3,
    WrapMode,
};
pub use writer::{CityGmlWriter, save, save_to_writer};

impl CityModel {
    /// Write the model as CityGML to a writer
    ///
    /// Uses the default writer configuration.
    ///
    /// # Arguments
    ///
    /// * `writer` - Destination of the XML document
    ///
    /// # Example
    ///
    /// ```
    /// use citygml::CityModel;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let model = CityModel::new();
    /// let bytes = model.to_writer(Vec::new())?;
    /// assert!(String::from_utf8(bytes)?.contains("CityModel"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<W> {
        save_to_writer(self, writer, &WriterConfig::default())
    }

    /// Write the model as CityGML to a file
    ///
    /// Uses the default writer configuration.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the output file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use citygml::CityModel;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let model = CityModel::new();
    /// model.write_to_file("output.gml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn write_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        save(self, path, &WriterConfig::default())
    }

    /// Encode the model as a CityGML string with the given configuration
    pub fn to_citygml_string(&self, config: &WriterConfig) -> Result<String> {
        let mut writer = CityGmlWriter::new(config.clone());
        writer.encode(self)?;
        writer.to_xml_string()
    }
}
