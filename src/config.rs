//! Writer configuration

use crate::error::{Error, Result};

/// Options controlling how a city model is written
///
/// Defaults match common CityGML tooling: indented output, everything
/// included except empty geometries.
#[derive(Debug, Clone, PartialEq)]
pub struct WriterConfig {
    /// Indent and break lines
    pub pretty_print: bool,
    /// Spaces per indentation level
    pub indent_size: usize,
    /// Write the appearance block of root city objects
    pub include_appearances: bool,
    /// Write postal addresses
    pub include_addresses: bool,
    /// Write external references and rectified grid coverages
    pub include_external_references: bool,
    /// Encoding named in the XML declaration; only UTF-8 is supported
    pub encoding: String,
    /// Write geometries that have no polygons, line strings or children
    pub include_empty_geometries: bool,
    /// Reserved
    pub include_lod_info: bool,
    /// Write attributes that have no dedicated schema element
    pub include_generic_attributes: bool,
    /// Check the rendered document for well-formedness before persisting it
    pub validate_output: bool,
    /// Drop all insignificant whitespace; overrides `pretty_print`
    pub optimize_for_size: bool,
}

impl WriterConfig {
    /// Create a configuration with default options
    pub fn new() -> Self {
        Self {
            pretty_print: true,
            indent_size: 2,
            include_appearances: true,
            include_addresses: true,
            include_external_references: true,
            encoding: "UTF-8".to_string(),
            include_empty_geometries: false,
            include_lod_info: true,
            include_generic_attributes: true,
            validate_output: false,
            optimize_for_size: false,
        }
    }

    /// Enable or disable indentation
    pub fn with_pretty_print(mut self, enabled: bool) -> Self {
        self.pretty_print = enabled;
        self
    }

    /// Set the indentation width
    pub fn with_indent_size(mut self, size: usize) -> Self {
        self.indent_size = size;
        self
    }

    /// Enable or disable appearances
    pub fn with_appearances(mut self, enabled: bool) -> Self {
        self.include_appearances = enabled;
        self
    }

    /// Enable or disable addresses
    pub fn with_addresses(mut self, enabled: bool) -> Self {
        self.include_addresses = enabled;
        self
    }

    /// Enable or disable external references and grid coverages
    pub fn with_external_references(mut self, enabled: bool) -> Self {
        self.include_external_references = enabled;
        self
    }

    /// Set the declared encoding
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Enable or disable writing of empty geometries
    pub fn with_empty_geometries(mut self, enabled: bool) -> Self {
        self.include_empty_geometries = enabled;
        self
    }

    /// Enable or disable generic attributes
    pub fn with_generic_attributes(mut self, enabled: bool) -> Self {
        self.include_generic_attributes = enabled;
        self
    }

    /// Enable or disable the well-formedness check
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_output = enabled;
        self
    }

    /// Enable or disable compact output
    pub fn with_optimize_for_size(mut self, enabled: bool) -> Self {
        self.optimize_for_size = enabled;
        self
    }

    /// Whether output is indented, after `optimize_for_size` is applied
    pub fn effective_pretty_print(&self) -> bool {
        self.pretty_print && !self.optimize_for_size
    }

    /// Check the options that can be rejected up front
    pub fn validate(&self) -> Result<()> {
        let normalized = self.encoding.to_ascii_lowercase().replace('-', "");
        if normalized != "utf8" {
            return Err(Error::Unsupported(format!(
                "output encoding '{}' (only UTF-8 is supported)",
                self.encoding
            )));
        }
        Ok(())
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self::new()
    }
}
