//! Attribute encoding
//!
//! Attributes whose name is a schema property are written as that property
//! element; everything else becomes a typed generic attribute.

use super::builder::DocumentBuilder;
use super::namespace::Namespace;
use crate::error::Result;
use crate::model::{AttributeValue, AttributesMap};

/// Attribute name with a dedicated schema element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownAttribute {
    /// Attribute name as stored in the model
    pub name: &'static str,
    /// Namespace of the property element
    pub namespace: Namespace,
    /// Local name of the property element
    pub local_name: &'static str,
}

const fn known(name: &'static str, namespace: Namespace) -> KnownAttribute {
    KnownAttribute {
        name,
        namespace,
        local_name: name,
    }
}

static KNOWN_ATTRIBUTES: &[KnownAttribute] = &[
    known("name", Namespace::Gml),
    known("description", Namespace::Gml),
    known("creationDate", Namespace::Core),
    known("terminationDate", Namespace::Core),
    known("class", Namespace::Building),
    known("function", Namespace::Building),
    known("usage", Namespace::Building),
    known("yearOfConstruction", Namespace::Building),
    known("yearOfDemolition", Namespace::Building),
    known("roofType", Namespace::Building),
    known("measuredHeight", Namespace::Building),
    known("storeysAboveGround", Namespace::Building),
    known("storeysBelowGround", Namespace::Building),
    known("storeyHeightsAboveGround", Namespace::Building),
    known("storeyHeightsBelowGround", Namespace::Building),
    known("species", Namespace::Vegetation),
    known("height", Namespace::Vegetation),
    known("trunkDiameter", Namespace::Vegetation),
    known("crownDiameter", Namespace::Vegetation),
    known("surfaceMaterial", Namespace::Transportation),
];

/// Look up the schema element for an attribute name
pub fn lookup(name: &str) -> Option<&'static KnownAttribute> {
    KNOWN_ATTRIBUTES.iter().find(|entry| entry.name == name)
}

/// Write every attribute of a map, in name order
pub fn write_attributes(
    builder: &mut DocumentBuilder,
    attributes: &AttributesMap,
    include_generic: bool,
) -> Result<()> {
    for (name, value) in attributes {
        match lookup(name) {
            Some(entry) if builder.is_declared(entry.namespace) => {
                builder.write_text_element(
                    entry.local_name,
                    entry.namespace,
                    &value.to_string(),
                )?;
            }
            _ if include_generic => write_generic_attribute(builder, name, value)?,
            _ => {}
        }
    }
    Ok(())
}

/// Write one `gen:*Attribute` element with its nested value
pub fn write_generic_attribute(
    builder: &mut DocumentBuilder,
    name: &str,
    value: &AttributeValue,
) -> Result<()> {
    builder.start_element(value.generic_element_name(), Namespace::Generics)?;
    builder.write_attribute("name", name)?;
    builder.write_text_element("value", Namespace::Generics, &value.to_string())?;
    builder.end_element()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(namespaces: &[Namespace]) -> DocumentBuilder {
        let mut builder = DocumentBuilder::new();
        builder.set_pretty_print(false);
        for ns in namespaces {
            builder.add_namespace_declaration(*ns);
        }
        builder.create_document("CityModel", Namespace::CityGml).unwrap();
        builder
    }

    fn render(mut builder: DocumentBuilder) -> String {
        String::from_utf8(builder.render().unwrap()).unwrap()
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("measuredHeight").unwrap().namespace, Namespace::Building);
        assert_eq!(lookup("creationDate").unwrap().namespace, Namespace::Core);
        assert!(lookup("roofColour").is_none());
    }

    #[test]
    fn test_known_attribute_uses_property_element() {
        let mut builder = document(&[Namespace::Building, Namespace::Generics]);
        let mut attributes = AttributesMap::new();
        attributes.insert("measuredHeight".to_string(), AttributeValue::Double(12.5));
        write_attributes(&mut builder, &attributes, true).unwrap();

        let xml = render(builder);
        assert!(xml.contains("<bldg:measuredHeight>12.5</bldg:measuredHeight>"));
        assert!(!xml.contains("doubleAttribute"));
    }

    #[test]
    fn test_known_attribute_with_undeclared_namespace_is_generic() {
        let mut builder = document(&[Namespace::Generics]);
        let mut attributes = AttributesMap::new();
        attributes.insert("measuredHeight".to_string(), AttributeValue::Double(3.0));
        write_attributes(&mut builder, &attributes, true).unwrap();

        let xml = render(builder);
        assert!(xml.contains("<gen:doubleAttribute name=\"measuredHeight\">"));
        assert!(xml.contains("<gen:value>3</gen:value>"));
    }

    #[test]
    fn test_generic_attribute_kinds() {
        let mut builder = document(&[Namespace::Generics]);
        let mut attributes = AttributesMap::new();
        attributes.insert("floors".to_string(), AttributeValue::Integer(4));
        attributes.insert("owner".to_string(), AttributeValue::from("City & Co"));
        attributes.insert("surveyed".to_string(), AttributeValue::Date("2020-01-31".into()));
        attributes.insert("link".to_string(), AttributeValue::Uri("http://x/y".into()));
        write_attributes(&mut builder, &attributes, true).unwrap();

        let xml = render(builder);
        assert!(xml.contains("<gen:intAttribute name=\"floors\"><gen:value>4</gen:value>"));
        assert!(xml.contains("<gen:stringAttribute name=\"owner\"><gen:value>City &amp; Co"));
        assert!(xml.contains("<gen:dateAttribute name=\"surveyed\">"));
        assert!(xml.contains("<gen:uriAttribute name=\"link\">"));
    }

    #[test]
    fn test_generic_attributes_disabled() {
        let mut builder = document(&[Namespace::Generics, Namespace::Gml]);
        let mut attributes = AttributesMap::new();
        attributes.insert("owner".to_string(), AttributeValue::from("someone"));
        attributes.insert("name".to_string(), AttributeValue::from("Town hall"));
        write_attributes(&mut builder, &attributes, false).unwrap();

        let xml = render(builder);
        assert!(!xml.contains("owner"));
        assert!(xml.contains("<gml:name>Town hall</gml:name>"));
    }
}
