//! Appearance types: materials, textures and their bindings to geometry

use std::collections::BTreeMap;
use std::sync::Arc;

use super::core::Vec2;

/// RGB color with float channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Create a color
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// True when all channels are exactly zero
    pub fn is_zero(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }
}

/// RGBA color with float channels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Rgba {
    /// Create a color
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// True when all channels are exactly zero
    pub fn is_zero(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0 && self.a == 0.0
    }
}

/// X3D-style material
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Material {
    /// Identifier; also the identity used to write a material once per theme
    pub id: String,
    /// Themes the material was declared for
    pub themes: Vec<String>,
    /// Diffuse color
    pub diffuse: Color,
    /// Specular color
    pub specular: Color,
    /// Emissive color
    pub emissive: Color,
    /// Ambient intensity
    pub ambient_intensity: f32,
    /// Shininess
    pub shininess: f32,
    /// Transparency
    pub transparency: f32,
    /// Smooth shading flag
    pub is_smooth: bool,
}

impl Material {
    /// Create a material with black colors and no shading parameters
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Texture wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// No wrapping
    #[default]
    None,
    /// Repeat
    Wrap,
    /// Mirrored repeat
    Mirror,
    /// Clamp to edge
    Clamp,
    /// Use the border color
    Border,
}

impl WrapMode {
    /// Schema text for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapMode::None => "none",
            WrapMode::Wrap => "wrap",
            WrapMode::Mirror => "mirror",
            WrapMode::Clamp => "clamp",
            WrapMode::Border => "border",
        }
    }
}

/// Image texture
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Texture {
    /// Identifier; also the identity used to write a texture once per theme
    pub id: String,
    /// Image URL
    pub url: String,
    /// Wrap mode
    pub wrap_mode: WrapMode,
    /// Border color used with [`WrapMode::Border`]
    pub border_color: Rgba,
    /// Repeat flag
    pub repeat: bool,
}

impl Texture {
    /// Create a texture pointing at an image
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Texture coordinates for one ring
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextureCoordinates {
    /// Identifier of the ring the coordinates apply to
    pub ring_id: String,
    /// One coordinate per ring vertex
    pub coords: Vec<Vec2>,
}

impl TextureCoordinates {
    /// Create texture coordinates for a ring
    pub fn new(ring_id: impl Into<String>, coords: Vec<Vec2>) -> Self {
        Self {
            ring_id: ring_id.into(),
            coords,
        }
    }
}

/// Binding of a material to a target polygon or ring
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTargetDefinition {
    /// Identifier of the target
    pub target_id: String,
    /// Bound material
    pub material: Arc<Material>,
}

impl MaterialTargetDefinition {
    /// Create a material binding
    pub fn new(target_id: impl Into<String>, material: Arc<Material>) -> Self {
        Self {
            target_id: target_id.into(),
            material,
        }
    }
}

/// Binding of a texture to a target polygon, with per-ring coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct TextureTargetDefinition {
    /// Identifier of the target
    pub target_id: String,
    /// Bound texture
    pub texture: Arc<Texture>,
    /// Texture coordinates, one record per ring
    pub texture_coordinates: Vec<TextureCoordinates>,
}

impl TextureTargetDefinition {
    /// Create a texture binding without coordinates
    pub fn new(target_id: impl Into<String>, texture: Arc<Texture>) -> Self {
        Self {
            target_id: target_id.into(),
            texture,
            texture_coordinates: Vec::new(),
        }
    }
}

/// Theme-keyed appearance bindings of one target, split by face orientation
///
/// A target holds at most one material and one texture per theme and side.
#[derive(Debug, Clone, Default)]
pub struct AppearanceBindings {
    materials_front: BTreeMap<String, Arc<MaterialTargetDefinition>>,
    materials_back: BTreeMap<String, Arc<MaterialTargetDefinition>>,
    textures_front: BTreeMap<String, Arc<TextureTargetDefinition>>,
    textures_back: BTreeMap<String, Arc<TextureTargetDefinition>>,
}

impl AppearanceBindings {
    /// Create empty bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a material for a theme, replacing any previous binding on that side
    pub fn add_material(
        &mut self,
        theme: impl Into<String>,
        front: bool,
        definition: Arc<MaterialTargetDefinition>,
    ) {
        let map = if front {
            &mut self.materials_front
        } else {
            &mut self.materials_back
        };
        map.insert(theme.into(), definition);
    }

    /// Bind a texture for a theme, replacing any previous binding on that side
    pub fn add_texture(
        &mut self,
        theme: impl Into<String>,
        front: bool,
        definition: Arc<TextureTargetDefinition>,
    ) {
        let map = if front {
            &mut self.textures_front
        } else {
            &mut self.textures_back
        };
        map.insert(theme.into(), definition);
    }

    /// Themes with a material on the given side, sorted
    pub fn material_themes(&self, front: bool) -> impl Iterator<Item = &str> {
        let map = if front {
            &self.materials_front
        } else {
            &self.materials_back
        };
        map.keys().map(String::as_str)
    }

    /// Themes with a texture on the given side, sorted
    pub fn texture_themes(&self, front: bool) -> impl Iterator<Item = &str> {
        let map = if front {
            &self.textures_front
        } else {
            &self.textures_back
        };
        map.keys().map(String::as_str)
    }

    /// Material bound for a theme on the given side
    pub fn material_for_theme(
        &self,
        theme: &str,
        front: bool,
    ) -> Option<&Arc<MaterialTargetDefinition>> {
        if front {
            self.materials_front.get(theme)
        } else {
            self.materials_back.get(theme)
        }
    }

    /// Texture bound for a theme on the given side
    pub fn texture_for_theme(
        &self,
        theme: &str,
        front: bool,
    ) -> Option<&Arc<TextureTargetDefinition>> {
        if front {
            self.textures_front.get(theme)
        } else {
            self.textures_back.get(theme)
        }
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool {
        self.materials_front.is_empty()
            && self.materials_back.is_empty()
            && self.textures_front.is_empty()
            && self.textures_back.is_empty()
    }
}

/// Anything that can carry materials and textures
pub trait AppearanceTarget {
    /// Bindings carried by this target
    fn appearance(&self) -> &AppearanceBindings;
}
