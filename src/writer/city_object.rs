//! City object encoding
//!
//! A city object is written as its thematic element followed by, in order:
//! attributes, the appearance block (root objects only), geometries in their
//! LOD containers, child objects, the address, the external reference and the
//! rectified grid coverage.

use log::debug;

use super::address::write_address;
use super::appearance::write_appearances;
use super::attribute::write_attributes;
use super::builder::DocumentBuilder;
use super::geometry::{GmlGeometryKind, write_geometry, write_id};
use super::namespace::{Namespace, namespace_for};
use super::write_envelope;
use crate::config::WriterConfig;
use crate::error::Result;
use crate::model::{
    CityObject, CityObjectType, ExternalObject, ExternalReference, RectifiedGridCoverage,
};

/// Name of the container element holding a geometry of the given LOD
///
/// Buildings and building parts put solids in `lodNSolid` and any other
/// content in `lodNMultiSurface`. `None` when the type has no container for
/// that LOD; such geometries are not written.
pub fn lod_container_name(
    object_type: CityObjectType,
    lod: u32,
    kind: GmlGeometryKind,
) -> Option<&'static str> {
    use CityObjectType::*;

    match object_type {
        Building | BuildingPart => match (lod, kind) {
            (0, _) => Some("lod0FootPrint"),
            (1, GmlGeometryKind::Solid) => Some("lod1Solid"),
            (2, GmlGeometryKind::Solid) => Some("lod2Solid"),
            (3, GmlGeometryKind::Solid) => Some("lod3Solid"),
            (4, GmlGeometryKind::Solid) => Some("lod4Solid"),
            (1, _) => Some("lod1MultiSurface"),
            (2, _) => Some("lod2MultiSurface"),
            (3, _) => Some("lod3MultiSurface"),
            (4, _) => Some("lod4MultiSurface"),
            _ => None,
        },
        WallSurface | RoofSurface | GroundSurface | ClosureSurface | FloorSurface
        | InteriorWallSurface | CeilingSurface => match lod {
            0 => Some("lod0FootPrint"),
            1 => Some("lod1MultiSurface"),
            2 => Some("lod2MultiSurface"),
            3 => Some("lod3MultiSurface"),
            4 => Some("lod4MultiSurface"),
            _ => None,
        },
        _ => None,
    }
}

/// Write one city object and its subtree
pub fn write_city_object(
    builder: &mut DocumentBuilder,
    config: &WriterConfig,
    object: &CityObject,
    is_root: bool,
) -> Result<()> {
    let namespace = namespace_for(object.object_type);

    builder.start_element(object.object_type.element_name(), namespace)?;
    write_id(builder, &object.id)?;

    write_attributes(builder, &object.attributes, config.include_generic_attributes)?;

    if is_root && config.include_appearances {
        write_appearances(builder, object)?;
    }

    for geometry in &object.geometries {
        if geometry.is_empty() && !config.include_empty_geometries {
            debug!("Skipping empty geometry '{}' of '{}'", geometry.id, object.id);
            continue;
        }

        let kind = GmlGeometryKind::of(geometry);
        let Some(container) = lod_container_name(object.object_type, geometry.lod, kind) else {
            debug!(
                "No LOD{} container for {}; geometry '{}' of '{}' not written",
                geometry.lod,
                object.object_type.element_name(),
                geometry.id,
                object.id
            );
            continue;
        };

        builder.start_element(container, namespace)?;
        write_geometry(builder, geometry)?;
        builder.end_element()?;
    }

    for child in &object.children {
        builder.start_element("boundedBy", Namespace::Building)?;
        write_city_object(builder, config, child, false)?;
        builder.end_element()?;
    }

    if config.include_addresses {
        if let Some(ref address) = object.address {
            builder.start_element("address", Namespace::Building)?;
            write_address(builder, address)?;
            builder.end_element()?;
        }
    }

    if config.include_external_references {
        if let Some(ref reference) = object.external_reference {
            write_external_reference(builder, reference)?;
        }
        if let Some(ref coverage) = object.rectified_grid_coverage {
            write_rectified_grid_coverage(builder, coverage)?;
        }
    }

    builder.end_element()
}

fn write_external_reference(
    builder: &mut DocumentBuilder,
    reference: &ExternalReference,
) -> Result<()> {
    builder.start_element("ExternalReference", Namespace::Core)?;
    write_id(builder, &reference.id)?;

    if !reference.information_system.is_empty() {
        builder.write_text_element(
            "informationSystem",
            Namespace::Core,
            &reference.information_system,
        )?;
    }

    let external_object = match reference.external_object {
        Some(ExternalObject::Name(ref name)) if !name.is_empty() => Some(("name", name)),
        Some(ExternalObject::Uri(ref uri)) if !uri.is_empty() => Some(("uri", uri)),
        _ => None,
    };
    if let Some((kind, value)) = external_object {
        builder.start_element("externalObject", Namespace::Core)?;
        builder.write_text_element(kind, Namespace::Core, value)?;
        builder.end_element()?;
    }

    builder.end_element()
}

fn write_rectified_grid_coverage(
    builder: &mut DocumentBuilder,
    coverage: &RectifiedGridCoverage,
) -> Result<()> {
    builder.start_element("RectifiedGridCoverage", Namespace::Core)?;
    write_id(builder, &coverage.id)?;

    let envelope = &coverage.envelope;
    if envelope.is_defined() && !envelope.is_zero() {
        write_envelope(builder, envelope)?;
    }

    builder.end_element()
}
