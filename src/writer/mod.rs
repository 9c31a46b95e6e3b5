//! CityGML 2.0 writing
//!
//! Encoding runs in two passes over the city object forest. The first pass
//! collects the namespaces and schema locations the document needs; the
//! second configures a [`DocumentBuilder`] with them and emits the content.
//! Nothing is written to the target until the whole document has been built.

pub mod address;
pub mod appearance;
pub mod attribute;
pub mod builder;
pub mod city_object;
pub mod geometry;
pub mod material;
pub mod namespace;

use std::io::Write as IoWrite;
use std::path::Path;

use log::{debug, error, info};

use crate::config::WriterConfig;
use crate::error::{Error, Result};
use crate::model::{CityModel, Envelope};

pub use builder::{DocumentBuilder, check_well_formed};
pub use geometry::GmlGeometryKind;
pub use namespace::{CITYGML_NS_URI, Namespace, NamespaceUsage};

use attribute::write_attributes;
use city_object::write_city_object;
use geometry::point_text;

/// Encoder for one city model at a time
///
/// A failed operation leaves its message in [`CityGmlWriter::last_error`].
///
/// # Example
///
/// ```
/// use citygml::{CityGmlWriter, CityModel, WriterConfig};
///
/// let model = CityModel::new();
/// let mut writer = CityGmlWriter::new(WriterConfig::default());
/// writer.encode(&model).unwrap();
/// let xml = writer.to_xml_string().unwrap();
/// assert!(xml.contains("<CityModel"));
/// ```
#[derive(Debug)]
pub struct CityGmlWriter {
    config: WriterConfig,
    builder: DocumentBuilder,
    encoded: bool,
    last_error: Option<String>,
}

impl CityGmlWriter {
    /// Create a writer with the given configuration
    pub fn new(config: WriterConfig) -> Self {
        Self {
            config,
            builder: DocumentBuilder::new(),
            encoded: false,
            last_error: None,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Message of the most recent failure
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Build the document for a model, replacing any previous one
    pub fn encode(&mut self, model: &CityModel) -> Result<()> {
        self.last_error = None;
        self.encoded = false;
        let result = self.encode_model(model);
        self.encoded = result.is_ok();
        self.record(result)
    }

    /// Render the encoded document to bytes
    pub fn render(&mut self) -> Result<Vec<u8>> {
        let result = self.ensure_encoded().and_then(|_| self.builder.render());
        self.record(result)
    }

    /// Render the encoded document as a string
    pub fn to_xml_string(&mut self) -> Result<String> {
        let bytes = self.render()?;
        let result = String::from_utf8(bytes).map_err(|e| Error::InvalidXml(e.to_string()));
        self.record(result)
    }

    /// Write the encoded document to a file
    ///
    /// The file is replaced atomically; on failure any existing file at
    /// `path` is left untouched.
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let result = self
            .ensure_encoded()
            .and_then(|_| self.builder.save_to_file(path));
        if result.is_ok() {
            info!("Saved CityGML document to {}", path.display());
        }
        self.record(result)
    }

    /// Write the encoded document to a writer and hand the writer back
    pub fn save_to_writer<W: IoWrite>(&mut self, writer: W) -> Result<W> {
        let result = self
            .ensure_encoded()
            .and_then(|_| self.builder.save_to_writer(writer));
        if result.is_ok() {
            info!("Saved CityGML document to stream");
        }
        self.record(result)
    }

    fn encode_model(&mut self, model: &CityModel) -> Result<()> {
        self.config.validate()?;

        let usage = NamespaceUsage::collect(model);
        debug!(
            "Namespaces required: {:?}; schema locations: {:?}",
            usage.namespaces, usage.schema_locations
        );

        let mut builder = DocumentBuilder::new();
        for ns in usage.declarations() {
            builder.add_namespace_declaration(ns);
        }
        builder.set_default_namespace(CITYGML_NS_URI);
        if let Some(location) = usage.schema_location_value() {
            builder.set_schema_location(location);
        }
        builder.set_pretty_print(self.config.effective_pretty_print());
        builder.set_indent_size(self.config.indent_size);
        builder.set_encoding(self.config.encoding.as_str());
        builder.set_validate_output(self.config.validate_output);
        self.builder = builder;

        let builder = &mut self.builder;
        builder.create_document("CityModel", Namespace::CityGml)?;

        if let Some(srs_name) = model.srs_name.as_deref().filter(|s| !s.is_empty()) {
            builder.write_attribute("srsName", srs_name)?;
        }

        write_attributes(
            builder,
            &model.attributes,
            self.config.include_generic_attributes,
        )?;

        if model.envelope.is_defined() {
            write_envelope(builder, &model.envelope)?;
        } else {
            debug!("Model envelope has NaN bounds; not written");
        }

        for object in &model.city_objects {
            builder.start_element("cityObjectMember", Namespace::Core)?;
            write_city_object(builder, &self.config, object, true)?;
            builder.end_element()?;
        }

        debug!("Encoded {} root city object(s)", model.city_objects.len());
        Ok(())
    }

    fn ensure_encoded(&self) -> Result<()> {
        if self.encoded {
            Ok(())
        } else {
            Err(Error::document_state("no model has been encoded"))
        }
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result {
            error!("CityGML writing failed: {}", e);
            self.last_error = Some(e.to_string());
        }
        result
    }
}

/// Write `gml:boundedBy/gml:Envelope` with its two corners
pub(crate) fn write_envelope(builder: &mut DocumentBuilder, envelope: &Envelope) -> Result<()> {
    builder.start_element("boundedBy", Namespace::Gml)?;
    builder.start_element("Envelope", Namespace::Gml)?;

    if let Some(ref srs_name) = envelope.srs_name {
        if !srs_name.is_empty() {
            builder.write_attribute("srsName", srs_name)?;
        }
    }

    builder.write_text_element("lowerCorner", Namespace::Gml, &point_text(&envelope.lower))?;
    builder.write_text_element("upperCorner", Namespace::Gml, &point_text(&envelope.upper))?;

    builder.end_element()?;
    builder.end_element()
}

/// Encode a model and save it to a file
///
/// # Example
///
/// ```no_run
/// use citygml::{CityModel, WriterConfig};
///
/// let model = CityModel::new();
/// citygml::save(&model, "city.gml", &WriterConfig::default())?;
/// # Ok::<(), citygml::Error>(())
/// ```
pub fn save<P: AsRef<Path>>(model: &CityModel, path: P, config: &WriterConfig) -> Result<()> {
    let mut writer = CityGmlWriter::new(config.clone());
    writer.encode(model)?;
    writer.save_to_file(path)
}

/// Encode a model and write it to a writer
pub fn save_to_writer<W: IoWrite>(
    model: &CityModel,
    writer: W,
    config: &WriterConfig,
) -> Result<W> {
    let mut encoder = CityGmlWriter::new(config.clone());
    encoder.encode(model)?;
    encoder.save_to_writer(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CityObject, CityObjectType, Vec3};

    fn encode(model: &CityModel, config: WriterConfig) -> String {
        let mut writer = CityGmlWriter::new(config);
        writer.encode(model).unwrap();
        writer.to_xml_string().unwrap()
    }

    #[test]
    fn test_root_element_and_namespaces() {
        let mut model = CityModel::new();
        model.srs_name = Some("EPSG:25832".to_string());
        model
            .city_objects
            .push(CityObject::new("b1", CityObjectType::Building));

        let xml = encode(&model, WriterConfig::default().with_pretty_print(false));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<CityModel xmlns=\"http://www.opengis.net/citygml/2.0\""));
        assert!(xml.contains("xmlns:bldg=\"http://www.opengis.net/citygml/building/2.0\""));
        assert!(xml.contains("xsi:schemaLocation=\"http://www.opengis.net/citygml/building/2.0 "));
        assert!(xml.contains("srsName=\"EPSG:25832\""));
        assert!(xml.contains(
            "<core:cityObjectMember><bldg:Building gml:id=\"b1\"/></core:cityObjectMember>"
        ));
    }

    #[test]
    fn test_empty_srs_name_is_omitted() {
        let mut model = CityModel::new();
        model.srs_name = Some(String::new());

        let xml = encode(&model, WriterConfig::default().with_pretty_print(false));
        assert!(!xml.contains("srsName"));
    }

    #[test]
    fn test_envelope_written_when_defined() {
        let mut model = CityModel::new();
        model.envelope = Envelope::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.5, 5.0, 6.0))
            .with_srs_name("EPSG:4326");

        let xml = encode(&model, WriterConfig::default().with_pretty_print(false));
        assert!(xml.contains(
            "<gml:boundedBy><gml:Envelope srsName=\"EPSG:4326\"><gml:lowerCorner>1 2 3</gml:lowerCorner><gml:upperCorner>4.5 5 6</gml:upperCorner></gml:Envelope></gml:boundedBy>"
        ));
    }

    #[test]
    fn test_render_before_encode_fails() {
        let mut writer = CityGmlWriter::new(WriterConfig::default());
        let err = writer.render().unwrap_err();
        assert!(err.to_string().contains("no model has been encoded"));
        assert_eq!(writer.last_error(), Some(err.to_string().as_str()));
    }

    #[test]
    fn test_unsupported_encoding_fails_encode() {
        let mut writer = CityGmlWriter::new(WriterConfig::default().with_encoding("UTF-16"));
        let err = writer.encode(&CityModel::new()).unwrap_err();
        assert!(err.to_string().contains("[E4001]"));
        assert!(writer.last_error().unwrap().contains("UTF-16"));
        assert!(writer.render().is_err());
    }

    #[test]
    fn test_successful_encode_clears_last_error() {
        let mut writer = CityGmlWriter::new(WriterConfig::default());
        assert!(writer.render().is_err());
        writer.encode(&CityModel::new()).unwrap();
        assert!(writer.last_error().is_none());
    }

    #[test]
    fn test_validation_and_compact_output() {
        let config = WriterConfig::default()
            .with_validation(true)
            .with_optimize_for_size(true);
        let xml = encode(&CityModel::new(), config);
        assert!(!xml.contains('\n'));
        assert!(check_well_formed(xml.as_bytes()).is_ok());
    }
}
