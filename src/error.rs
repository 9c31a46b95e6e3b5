//! Error types for CityGML writing
//!
//! Every error carries an error code for categorization. The `Display` output
//! of an [`Error`] is the "last error" message reported by a failed save.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O errors
//! - **E2xxx**: XML structure and writing errors
//! - **E4xxx**: Unsupported features
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error writing the output
//! - `E2001`: Malformed XML reported by the quick-xml reader
//! - `E2003`: Rendered document is not well-formed
//! - `E2005`: XML writing error
//! - `E2006`: Document builder used in an invalid state
//! - `E4001`: Unsupported feature

use std::io;
use thiserror::Error;

/// Result type for CityGML operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when writing CityGML documents
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while writing the output
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - Target directory does not exist
    /// - Insufficient permissions
    /// - Disk full
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// XML error reported by quick-xml
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Rendered output re-read during validation is not well-formed
    #[error("[E2001] XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Rendered document failed the well-formedness check
    ///
    /// **Error Code**: E2003
    ///
    /// **Common Causes**:
    /// - Unbalanced elements
    /// - Mismatched closing tag
    #[error("[E2003] Invalid XML structure: {0}")]
    InvalidXml(String),

    /// XML writing error
    ///
    /// **Error Code**: E2005
    ///
    /// **Common Causes**:
    /// - Failed to serialize an element, attribute or text node
    /// - I/O error while rendering
    #[error("[E2005] XML writing error: {0}")]
    XmlWrite(String),

    /// Document builder used in an invalid state
    ///
    /// **Error Code**: E2006
    ///
    /// **Common Causes**:
    /// - Writing before a document was created
    /// - Closing more elements than were opened
    /// - Saving while elements are still open
    #[error("[E2006] Document state error: {0}")]
    DocumentState(String),

    /// Unsupported feature or option
    ///
    /// **Error Code**: E4001
    ///
    /// **Common Causes**:
    /// - Requesting an output encoding other than UTF-8
    #[error("[E4001] Unsupported feature: {0}")]
    Unsupported(String),
}

impl Error {
    /// Create an XML writing error
    pub fn xml_write(message: String) -> Self {
        Error::XmlWrite(message)
    }

    /// Create a document state error
    pub fn document_state(message: impl Into<String>) -> Self {
        Error::DocumentState(message.into())
    }

    /// Copy of this error suitable for keeping as sticky builder state
    ///
    /// `io::Error` and `quick_xml::Error` are not `Clone`, so those variants
    /// keep their message only.
    pub(crate) fn duplicate(&self) -> Self {
        match self {
            Error::Io(e) => Error::Io(io::Error::new(e.kind(), e.to_string())),
            Error::Xml(e) => Error::XmlWrite(e.to_string()),
            Error::InvalidXml(m) => Error::InvalidXml(m.clone()),
            Error::XmlWrite(m) => Error::XmlWrite(m.clone()),
            Error::DocumentState(m) => Error::DocumentState(m.clone()),
            Error::Unsupported(m) => Error::Unsupported(m.clone()),
        }
    }
}
