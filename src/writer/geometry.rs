//! GML geometry encoding
//!
//! The GML element for a geometry is inferred from its content, falling back
//! to the declared [`GeometryType`] only when the geometry has no polygons,
//! line strings or children.

use super::builder::DocumentBuilder;
use super::namespace::Namespace;
use crate::error::Result;
use crate::model::{Geometry, GeometryType, LineString, LinearRing, Polygon, Vec3};

/// GML element written for a geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GmlGeometryKind {
    /// `gml:Solid`, surfaces nested in `gml:exterior`
    Solid,
    /// `gml:CompositeSurface`
    CompositeSurface,
    /// `gml:MultiSurface`
    MultiSurface,
    /// `gml:CompositeCurve`
    CompositeCurve,
    /// `gml:LineString`
    LineString,
    /// `gml:TINRelief`
    TinRelief,
    /// Generic `gml:Geometry` placeholder
    Geometry,
}

impl GmlGeometryKind {
    /// Infer the element from content counts and the declared type
    ///
    /// The first matching rule wins: children, then polygons, then line
    /// strings, then the declared type.
    pub fn infer(
        child_count: usize,
        polygon_count: usize,
        line_string_count: usize,
        geometry_type: GeometryType,
    ) -> Self {
        if child_count > 0 {
            return GmlGeometryKind::Solid;
        }

        match polygon_count {
            0 => {}
            1 => return GmlGeometryKind::MultiSurface,
            _ => return GmlGeometryKind::CompositeSurface,
        }

        match line_string_count {
            0 => {}
            1 => return GmlGeometryKind::LineString,
            _ => return GmlGeometryKind::CompositeCurve,
        }

        match geometry_type {
            GeometryType::Tin => GmlGeometryKind::TinRelief,
            t if t.is_surface() => GmlGeometryKind::MultiSurface,
            _ => GmlGeometryKind::Geometry,
        }
    }

    /// Kind for a model geometry
    pub fn of(geometry: &Geometry) -> Self {
        Self::infer(
            geometry.children.len(),
            geometry.polygons.len(),
            geometry.line_strings.len(),
            geometry.geometry_type,
        )
    }

    /// Local name in the GML namespace
    pub fn element_name(&self) -> &'static str {
        match self {
            GmlGeometryKind::Solid => "Solid",
            GmlGeometryKind::CompositeSurface => "CompositeSurface",
            GmlGeometryKind::MultiSurface => "MultiSurface",
            GmlGeometryKind::CompositeCurve => "CompositeCurve",
            GmlGeometryKind::LineString => "LineString",
            GmlGeometryKind::TinRelief => "TINRelief",
            GmlGeometryKind::Geometry => "Geometry",
        }
    }
}

/// Write a geometry and everything below it
pub fn write_geometry(builder: &mut DocumentBuilder, geometry: &Geometry) -> Result<()> {
    let kind = GmlGeometryKind::of(geometry);

    builder.start_element(kind.element_name(), Namespace::Gml)?;
    write_id(builder, &geometry.id)?;

    let nested = kind == GmlGeometryKind::Solid;
    if nested {
        builder.start_element("exterior", Namespace::Gml)?;
    }

    for polygon in &geometry.polygons {
        builder.start_element("surfaceMember", Namespace::Gml)?;
        write_polygon(builder, polygon)?;
        builder.end_element()?;
    }

    for line_string in &geometry.line_strings {
        write_line_string(builder, line_string)?;
    }

    for child in &geometry.children {
        write_geometry(builder, child)?;
    }

    if nested {
        builder.end_element()?;
    }

    builder.end_element()
}

/// Write a `gml:Polygon` with its exterior and interior rings
pub fn write_polygon(builder: &mut DocumentBuilder, polygon: &Polygon) -> Result<()> {
    builder.start_element("Polygon", Namespace::Gml)?;
    write_id(builder, &polygon.id)?;

    if let Some(ref exterior) = polygon.exterior {
        builder.start_element("exterior", Namespace::Gml)?;
        write_linear_ring(builder, exterior)?;
        builder.end_element()?;
    }

    for ring in &polygon.interiors {
        builder.start_element("interior", Namespace::Gml)?;
        write_linear_ring(builder, ring)?;
        builder.end_element()?;
    }

    builder.end_element()
}

/// Write a `gml:LinearRing`
pub fn write_linear_ring(builder: &mut DocumentBuilder, ring: &LinearRing) -> Result<()> {
    builder.start_element("LinearRing", Namespace::Gml)?;
    write_id(builder, &ring.id)?;
    write_pos_list(builder, &ring.vertices)?;
    builder.end_element()
}

/// Write a `gml:LineString`
pub fn write_line_string(builder: &mut DocumentBuilder, line_string: &LineString) -> Result<()> {
    builder.start_element("LineString", Namespace::Gml)?;
    write_id(builder, &line_string.id)?;
    write_pos_list(builder, &line_string.vertices)?;
    builder.end_element()
}

fn write_pos_list(builder: &mut DocumentBuilder, vertices: &[Vec3]) -> Result<()> {
    if vertices.is_empty() {
        return Ok(());
    }
    builder.start_element("posList", Namespace::Gml)?;
    builder.write_attribute("srsDimension", "3")?;
    builder.write_text(&coordinates_text(vertices))?;
    builder.end_element()
}

pub(crate) fn write_id(builder: &mut DocumentBuilder, id: &str) -> Result<()> {
    if id.is_empty() {
        return Ok(());
    }
    builder.write_attribute("gml:id", id)
}

/// Lexical `xs:double` form of a coordinate
pub(crate) fn double_text(value: f64) -> String {
    if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        value.to_string()
    }
}

/// Text of one position: `x y z`
pub(crate) fn point_text(point: &Vec3) -> String {
    format!(
        "{} {} {}",
        double_text(point.x),
        double_text(point.y),
        double_text(point.z)
    )
}

/// Space-separated coordinates of all vertices
pub(crate) fn coordinates_text(vertices: &[Vec3]) -> String {
    vertices
        .iter()
        .map(point_text)
        .collect::<Vec<_>>()
        .join(" ")
}
