//! Material and texture encoding for `app:surfaceDataMember` blocks

use super::builder::DocumentBuilder;
use super::geometry::write_id;
use super::namespace::Namespace;
use crate::error::Result;
use crate::model::{
    Color, Material, MaterialTargetDefinition, Texture, TextureCoordinates,
    TextureTargetDefinition,
};

fn color_text(color: &Color) -> String {
    format!("{} {} {}", color.r, color.g, color.b)
}

fn write_color(builder: &mut DocumentBuilder, name: &str, color: &Color) -> Result<()> {
    if color.is_zero() {
        return Ok(());
    }
    builder.write_text_element(name, Namespace::Appearance, &color_text(color))
}

fn write_scalar(builder: &mut DocumentBuilder, name: &str, value: f32) -> Result<()> {
    if value == 0.0 {
        return Ok(());
    }
    builder.write_text_element(name, Namespace::Appearance, &value.to_string())
}

/// Write an `app:Material` element
///
/// Colors and scalar parameters equal to zero are omitted.
pub fn write_material(builder: &mut DocumentBuilder, material: &Material) -> Result<()> {
    builder.start_element("Material", Namespace::Appearance)?;
    write_id(builder, &material.id)?;

    write_color(builder, "diffuseColor", &material.diffuse)?;
    write_color(builder, "specularColor", &material.specular)?;
    write_scalar(builder, "ambientIntensity", material.ambient_intensity)?;
    write_color(builder, "emissiveColor", &material.emissive)?;
    write_scalar(builder, "shininess", material.shininess)?;
    write_scalar(builder, "transparency", material.transparency)?;

    let smooth = if material.is_smooth { "true" } else { "false" };
    builder.write_text_element("isSmooth", Namespace::Appearance, smooth)?;

    builder.end_element()
}

/// Write the content of an `app:ParameterizedTexture` element
pub fn write_texture_content(builder: &mut DocumentBuilder, texture: &Texture) -> Result<()> {
    if !texture.url.is_empty() {
        builder.write_text_element("imageURI", Namespace::Appearance, &texture.url)?;
    }

    builder.write_text_element("wrapMode", Namespace::Appearance, texture.wrap_mode.as_str())?;

    let border = &texture.border_color;
    if !border.is_zero() {
        let text = format!("{} {} {} {}", border.r, border.g, border.b, border.a);
        builder.write_text_element("borderColor", Namespace::Appearance, &text)?;
    }

    Ok(())
}

/// Write a material binding: the material followed by its target
pub fn write_material_target(
    builder: &mut DocumentBuilder,
    definition: &MaterialTargetDefinition,
) -> Result<()> {
    builder.start_element("surfaceDataMember", Namespace::Appearance)?;
    write_material(builder, &definition.material)?;

    builder.start_element("target", Namespace::Appearance)?;
    builder.write_attribute("uri", &format!("#{}", definition.target_id))?;
    builder.end_element()?;

    builder.end_element()
}

/// Write a texture binding as a parameterized texture with its target
pub fn write_texture_target(
    builder: &mut DocumentBuilder,
    definition: &TextureTargetDefinition,
) -> Result<()> {
    builder.start_element("surfaceDataMember", Namespace::Appearance)?;
    builder.start_element("ParameterizedTexture", Namespace::Appearance)?;
    write_texture_content(builder, &definition.texture)?;

    builder.start_element("target", Namespace::Appearance)?;
    builder.write_attribute("uri", &format!("#{}", definition.target_id))?;

    if !definition.texture_coordinates.is_empty() {
        builder.start_element("TexCoordList", Namespace::Appearance)?;
        for coordinates in &definition.texture_coordinates {
            write_texture_coordinates(builder, coordinates)?;
        }
        builder.end_element()?;
    }

    builder.end_element()?; // target
    builder.end_element()?; // ParameterizedTexture
    builder.end_element()
}

fn write_texture_coordinates(
    builder: &mut DocumentBuilder,
    coordinates: &TextureCoordinates,
) -> Result<()> {
    let text = coordinates
        .coords
        .iter()
        .map(|uv| format!("{} {}", uv.x, uv.y))
        .collect::<Vec<_>>()
        .join(" ");

    builder.start_element("textureCoordinates", Namespace::Appearance)?;
    builder.write_attribute("ring", &format!("#{}", coordinates.ring_id))?;
    builder.write_text(&text)?;
    builder.end_element()
}
