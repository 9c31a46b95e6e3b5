//! Shared helpers for the CityGML writer integration tests
//!
//! Output is re-read with quick-xml so that tests check document structure
//! rather than exact formatting.

#![allow(dead_code)]

use citygml::{
    CityModel, CityObject, CityObjectType, Geometry, GeometryType, LinearRing, Polygon, Vec3,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// An element of a parsed document
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// Qualified name as written
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Concatenated text content
    pub text: String,
    /// Child elements
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Value of an attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow a chain of child names
    pub fn path(&self, names: &[&str]) -> Option<&XmlElement> {
        let mut current = self;
        for name in names {
            current = current.child(name)?;
        }
        Some(current)
    }

    /// Every element in the subtree, depth first, including this one
    pub fn descendants(&self) -> Vec<&XmlElement> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.descendants());
        }
        out
    }
}

fn element_from(start: &BytesStart) -> XmlElement {
    let name = String::from_utf8(start.name().as_ref().to_vec()).unwrap();
    let attributes = start
        .attributes()
        .map(|a| {
            let a = a.unwrap();
            (
                String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                String::from_utf8(a.value.to_vec()).unwrap(),
            )
        })
        .collect();
    XmlElement {
        name,
        attributes,
        text: String::new(),
        children: Vec::new(),
    }
}

/// Parse a document into its element tree; panics on malformed XML
pub fn parse(xml: &str) -> XmlElement {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event_into(&mut buf).unwrap() {
            Event::Start(e) => stack.push(element_from(&e)),
            Event::Empty(e) => {
                let element = element_from(&e);
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Text(t) => {
                let text = t.decode().unwrap();
                // Skip indentation between elements
                let indentation = text.trim().is_empty() && text.contains('\n');
                if let Some(current) = stack.last_mut().filter(|_| !indentation) {
                    current.text.push_str(&text);
                }
            }
            Event::GeneralRef(r) => {
                // Predefined entities only
                if let Some(current) = stack.last_mut() {
                    let entity = match r.as_ref() {
                        b"amp" => "&",
                        b"lt" => "<",
                        b"gt" => ">",
                        b"quot" => "\"",
                        b"apos" => "'",
                        _ => "",
                    };
                    current.text.push_str(entity);
                }
            }
            Event::End(_) => {
                let element = stack.pop().unwrap();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    root.expect("document has no root element")
}

/// A square ring at height `z`
pub fn square_ring(id: &str, z: f64) -> LinearRing {
    LinearRing::new(
        id,
        vec![
            Vec3::new(0.0, 0.0, z),
            Vec3::new(10.0, 0.0, z),
            Vec3::new(10.0, 10.0, z),
            Vec3::new(0.0, 10.0, z),
        ],
    )
}

/// Geometry holding one square polygon
pub fn single_polygon_geometry(id: &str, lod: u32, geometry_type: GeometryType) -> Geometry {
    let mut geometry = Geometry::new(id, lod, geometry_type);
    geometry.polygons.push(Polygon::new(
        format!("{}_poly", id),
        square_ring(&format!("{}_ring", id), 0.0),
    ));
    geometry
}

/// Model with one LOD2 building carrying one wall polygon
pub fn building_model() -> CityModel {
    let mut building = CityObject::new("building_1", CityObjectType::Building);
    building
        .geometries
        .push(single_polygon_geometry("geom_1", 2, GeometryType::Wall));

    let mut model = CityModel::new();
    model.city_objects.push(building);
    model
}
