//! Appearance collection and the `app:appearance` block of root city objects
//!
//! Bindings are gathered from the whole subtree of a root city object, grouped
//! by theme, and written once per theme. Within a theme a material or texture
//! is written at most once, keyed by its id.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use log::trace;

use super::builder::DocumentBuilder;
use super::material::{write_material_target, write_texture_target};
use super::namespace::Namespace;
use crate::error::Result;
use crate::model::{
    AppearanceTarget, CityObject, Geometry, MaterialTargetDefinition, TextureTargetDefinition,
};

/// Target definitions of a city object subtree, grouped by theme
#[derive(Debug, Default)]
pub struct ThemedAppearances {
    /// Material bindings per theme, in visit order
    pub materials: BTreeMap<String, Vec<Arc<MaterialTargetDefinition>>>,
    /// Texture bindings per theme, in visit order
    pub textures: BTreeMap<String, Vec<Arc<TextureTargetDefinition>>>,
}

impl ThemedAppearances {
    /// Collect the bindings of an object, its geometry and its children
    pub fn collect(object: &CityObject) -> Self {
        let mut collected = Self::default();
        collected.visit_object(object);
        collected
    }

    fn visit_object(&mut self, object: &CityObject) {
        for geometry in &object.geometries {
            self.visit_geometry(geometry);
        }
        for child in &object.children {
            self.visit_object(child);
        }
    }

    fn visit_geometry(&mut self, geometry: &Geometry) {
        self.add_target(geometry);
        for child in &geometry.children {
            self.visit_geometry(child);
        }
        for polygon in &geometry.polygons {
            self.add_target(polygon);
        }
    }

    fn add_target<T: AppearanceTarget>(&mut self, target: &T) {
        let bindings = target.appearance();

        for front in [true, false] {
            for theme in bindings.material_themes(front) {
                if let Some(definition) = bindings.material_for_theme(theme, front) {
                    self.materials
                        .entry(theme.to_string())
                        .or_default()
                        .push(Arc::clone(definition));
                }
            }
        }

        for front in [true, false] {
            for theme in bindings.texture_themes(front) {
                if let Some(definition) = bindings.texture_for_theme(theme, front) {
                    self.textures
                        .entry(theme.to_string())
                        .or_default()
                        .push(Arc::clone(definition));
                }
            }
        }
    }

    /// True when no binding was found
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty() && self.textures.is_empty()
    }

    /// Union of material and texture themes, sorted
    pub fn themes(&self) -> BTreeSet<&str> {
        self.materials
            .keys()
            .chain(self.textures.keys())
            .map(String::as_str)
            .collect()
    }
}

/// Write the `app:appearance` block for a root city object
///
/// Nothing is written when the subtree carries no bindings.
pub fn write_appearances(builder: &mut DocumentBuilder, object: &CityObject) -> Result<()> {
    let collected = ThemedAppearances::collect(object);
    if collected.is_empty() {
        return Ok(());
    }

    builder.start_element("appearance", Namespace::Appearance)?;

    for theme in collected.themes() {
        builder.start_element("Appearance", Namespace::Appearance)?;
        builder.write_text_element("theme", Namespace::Appearance, theme)?;

        let mut written: HashSet<&str> = HashSet::new();

        if let Some(materials) = collected.materials.get(theme) {
            for definition in materials {
                if written.insert(definition.material.id.as_str()) {
                    write_material_target(builder, definition)?;
                } else {
                    trace!(
                        "Material '{}' already written for theme '{}'",
                        definition.material.id, theme
                    );
                }
            }
        }

        if let Some(textures) = collected.textures.get(theme) {
            for definition in textures {
                if written.insert(definition.texture.id.as_str()) {
                    write_texture_target(builder, definition)?;
                } else {
                    trace!(
                        "Texture '{}' already written for theme '{}'",
                        definition.texture.id, theme
                    );
                }
            }
        }

        builder.end_element()?;
    }

    builder.end_element()
}
