use glam::{Vec3, Vec4};
use uuid::Uuid;

/// How a fragment is combined with what is already in the color target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Blending {
    None,
    #[default]
    Normal,
    Additive,
    Subtractive,
    Multiply,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhongParams {
    pub color: Vec4,
    pub specular: Vec3,
    pub shininess: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnlitParams {
    pub color: Vec4,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteParams {
    pub color: Vec4,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MaterialKind {
    Phong(PhongParams),
    Unlit(UnlitParams),
    Sprite(SpriteParams),
}

/// Field-less tag of [`MaterialKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialType {
    Phong,
    Unlit,
    Sprite,
}

impl MaterialType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MaterialType::Phong => "phong_material",
            MaterialType::Unlit => "unlit_material",
            MaterialType::Sprite => "sprite_material",
        }
    }
}

/// Surface description shared between nodes through `Arc`.
///
/// Only the state the scene graph needs for validation and draw list
/// routing lives here; shading inputs are opaque to the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub uuid: Uuid,
    pub kind: MaterialKind,

    /// `0.0..=1.0`.
    pub opacity: f32,
    /// Routes the node to the back-to-front transparent list.
    pub transparent: bool,
    pub visible: bool,
    pub two_sided: bool,
    pub depth_test: bool,
    pub wireframe: bool,
    pub blending: Blending,
}

impl Material {
    #[must_use]
    pub fn new(kind: MaterialKind) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            kind,
            opacity: 1.0,
            transparent: false,
            visible: true,
            two_sided: false,
            depth_test: true,
            wireframe: false,
            blending: Blending::Normal,
        }
    }

    #[must_use]
    pub fn phong(color: Vec4) -> Self {
        Self::new(MaterialKind::Phong(PhongParams {
            color,
            specular: Vec3::splat(0.067),
            shininess: 32.0,
        }))
    }

    #[must_use]
    pub fn unlit(color: Vec4) -> Self {
        Self::new(MaterialKind::Unlit(UnlitParams { color }))
    }

    /// Sprite materials start out transparent.
    #[must_use]
    pub fn sprite(color: Vec4) -> Self {
        let mut material = Self::new(MaterialKind::Sprite(SpriteParams { color }));
        material.transparent = true;
        material
    }

    #[must_use]
    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_blending(mut self, blending: Blending) -> Self {
        self.blending = blending;
        self
    }

    #[must_use]
    pub fn material_type(&self) -> MaterialType {
        match self.kind {
            MaterialKind::Phong(_) => MaterialType::Phong,
            MaterialKind::Unlit(_) => MaterialType::Unlit,
            MaterialKind::Sprite(_) => MaterialType::Sprite,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_sprite(&self) -> bool {
        matches!(self.kind, MaterialKind::Sprite(_))
    }

    #[must_use]
    pub fn color(&self) -> Vec4 {
        match &self.kind {
            MaterialKind::Phong(p) => p.color,
            MaterialKind::Unlit(p) => p.color,
            MaterialKind::Sprite(p) => p.color,
        }
    }
}
