//! Stateful XML document builder
//!
//! Elements are collected into an in-memory tree while the encoders walk the
//! city model, and rendered through quick-xml only when the document is
//! saved. Attributes can therefore be written after an element is opened, and
//! namespace declarations configured before the document exists end up on the
//! root element.
//!
//! The builder has a sticky error state: after the first failure every call
//! returns that error again until [`DocumentBuilder::create_document`] starts
//! a fresh document.

use std::collections::BTreeSet;
use std::io::Write as IoWrite;
use std::path::Path;

use log::error;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::namespace::Namespace;
use crate::error::{Error, Result};

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => existing.1 = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }
}

/// Incremental builder for one XML document
#[derive(Debug)]
pub struct DocumentBuilder {
    namespaces: BTreeSet<Namespace>,
    default_namespace: Option<String>,
    schema_location: Option<String>,
    pretty_print: bool,
    indent_size: usize,
    encoding: String,
    validate_output: bool,
    /// Open elements; index 0 is the document element
    stack: Vec<Element>,
    error: Option<Error>,
}

impl DocumentBuilder {
    /// Create a builder with no document
    pub fn new() -> Self {
        Self {
            namespaces: BTreeSet::new(),
            default_namespace: None,
            schema_location: None,
            pretty_print: true,
            indent_size: 2,
            encoding: "UTF-8".to_string(),
            validate_output: false,
            stack: Vec::new(),
            error: None,
        }
    }

    /// Declare a prefixed namespace on the document element
    pub fn add_namespace_declaration(&mut self, namespace: Namespace) {
        if namespace.prefix().is_some() {
            self.namespaces.insert(namespace);
        }
    }

    /// Set the unprefixed default namespace URI
    pub fn set_default_namespace(&mut self, uri: impl Into<String>) {
        self.default_namespace = Some(uri.into());
    }

    /// Set the `xsi:schemaLocation` value
    pub fn set_schema_location(&mut self, value: impl Into<String>) {
        self.schema_location = Some(value.into());
    }

    /// Enable or disable indentation
    pub fn set_pretty_print(&mut self, enabled: bool) {
        self.pretty_print = enabled;
    }

    /// Set the indentation width
    pub fn set_indent_size(&mut self, size: usize) {
        self.indent_size = size;
    }

    /// Set the encoding named in the XML declaration
    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = encoding.into();
    }

    /// Check the rendered bytes for well-formedness before handing them out
    pub fn set_validate_output(&mut self, enabled: bool) {
        self.validate_output = enabled;
    }

    /// True when elements in `namespace` are written with their prefix
    pub fn is_declared(&self, namespace: Namespace) -> bool {
        namespace == Namespace::CityGml || self.namespaces.contains(&namespace)
    }

    /// Start a new document, discarding any previous content and error
    ///
    /// Namespace declarations, the default namespace and the schema location
    /// must be configured before this call.
    pub fn create_document(&mut self, root_name: &str, root_namespace: Namespace) -> Result<()> {
        self.stack.clear();
        self.error = None;

        let mut root = Element::new(self.qualify(root_name, root_namespace));

        if let Some(ref uri) = self.default_namespace {
            root.set_attribute("xmlns", uri);
        }

        for ns in &self.namespaces {
            if let Some(prefix) = ns.prefix() {
                root.set_attribute(&format!("xmlns:{}", prefix), ns.uri());
            }
        }

        if let Some(ref location) = self.schema_location {
            root.set_attribute("xsi:schemaLocation", location);
        }

        self.stack.push(root);
        Ok(())
    }

    /// Open a child element of the current element
    pub fn start_element(&mut self, local_name: &str, namespace: Namespace) -> Result<()> {
        self.ensure_open()?;
        let name = self.qualify(local_name, namespace);
        self.stack.push(Element::new(name));
        Ok(())
    }

    /// Close the current element
    pub fn end_element(&mut self) -> Result<()> {
        self.ensure_open()?;
        if self.stack.len() < 2 {
            return Err(self.fail(Error::document_state(
                "end_element called with no open child element",
            )));
        }

        if let Some(element) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                parent.children.push(Node::Element(element));
            }
        }
        Ok(())
    }

    /// Set an attribute on the current element
    pub fn write_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        self.ensure_open()?;
        if let Some(element) = self.stack.last_mut() {
            element.set_attribute(name, value);
        }
        Ok(())
    }

    /// Append text to the current element
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        self.ensure_open()?;
        if let Some(element) = self.stack.last_mut() {
            element.children.push(Node::Text(text.to_string()));
        }
        Ok(())
    }

    /// Open an element, write its text and close it
    pub fn write_text_element(
        &mut self,
        local_name: &str,
        namespace: Namespace,
        text: &str,
    ) -> Result<()> {
        self.start_element(local_name, namespace)?;
        self.write_text(text)?;
        self.end_element()
    }

    /// True after a failure, until the next `create_document`
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Message of the recorded failure
    pub fn last_error(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// Render the document to bytes
    pub fn render(&mut self) -> Result<Vec<u8>> {
        self.ensure_open()?;
        if self.stack.len() != 1 {
            let open = self.stack.len() - 1;
            return Err(self.fail(Error::document_state(format!(
                "{} element(s) still open at save time",
                open
            ))));
        }

        let rendered = self.render_root().and_then(|bytes| {
            if self.validate_output {
                check_well_formed(&bytes)?;
            }
            Ok(bytes)
        });
        match rendered {
            Ok(bytes) => Ok(bytes),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Render and write the document to a file
    ///
    /// The bytes are written to a temporary file in the target directory and
    /// moved into place only once complete.
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let bytes = self.render()?;
        match persist(&bytes, path.as_ref()) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Render and write the document to a writer
    pub fn save_to_writer<W: IoWrite>(&mut self, mut writer: W) -> Result<W> {
        let bytes = self.render()?;
        let written = writer.write_all(&bytes).and_then(|_| writer.flush());
        match written {
            Ok(()) => Ok(writer),
            Err(e) => Err(self.fail(Error::Io(e))),
        }
    }

    fn qualify(&self, local_name: &str, namespace: Namespace) -> String {
        match namespace.prefix() {
            Some(prefix) if self.is_declared(namespace) => format!("{}:{}", prefix, local_name),
            _ => local_name.to_string(),
        }
    }

    fn ensure_open(&mut self) -> Result<()> {
        if let Some(ref e) = self.error {
            return Err(e.duplicate());
        }
        if self.stack.is_empty() {
            return Err(self.fail(Error::document_state("no document has been created")));
        }
        Ok(())
    }

    fn fail(&mut self, err: Error) -> Error {
        error!("{}", err);
        self.error = Some(err.duplicate());
        err
    }

    fn render_root(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let mut writer = if self.pretty_print {
                Writer::new_with_indent(&mut buffer, b' ', self.indent_size)
            } else {
                Writer::new(&mut buffer)
            };

            writer
                .write_event(Event::Decl(BytesDecl::new(
                    "1.0",
                    Some(self.encoding.as_str()),
                    None,
                )))
                .map_err(|e| Error::xml_write(format!("Failed to write XML declaration: {}", e)))?;

            if let Some(root) = self.stack.first() {
                write_element(&mut writer, root)?;
            }
        }

        if self.pretty_print {
            buffer.push(b'\n');
        }
        Ok(buffer)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_element<W: IoWrite>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| Error::xml_write(format!("Failed to write {}: {}", element.name, e)))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| {
            Error::xml_write(format!("Failed to write {} element: {}", element.name, e))
        })?;

    for child in &element.children {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => {
                writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(|e| {
                        Error::xml_write(format!("Failed to write {} text: {}", element.name, e))
                    })?;
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| {
            Error::xml_write(format!("Failed to close {} element: {}", element.name, e))
        })?;

    Ok(())
}

fn persist(bytes: &[u8], path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// Check that rendered bytes form one well-formed XML document
pub fn check_well_formed(bytes: &[u8]) -> Result<()> {
    let xml = std::str::from_utf8(bytes).map_err(|e| Error::InvalidXml(e.to_string()))?;
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Event::Empty(_) => {
                if depth == 0 {
                    roots += 1;
                }
            }
            Event::End(_) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::InvalidXml("closing tag without matching start".to_string())
                })?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if depth != 0 {
        return Err(Error::InvalidXml(format!("{} unclosed element(s)", depth)));
    }
    if roots != 1 {
        return Err(Error::InvalidXml(format!(
            "expected one document element, found {}",
            roots
        )));
    }
    Ok(())
}
