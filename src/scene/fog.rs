use glam::Vec3;

/// Distance fog applied to everything a scene draws.
///
/// The scene only stores it; the renderer feeds the variant's parameters to
/// its shaders. [`Fog::factor`] is the blend a fragment at a given view
/// distance receives, `0.0` for no fog and `1.0` for full fog color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fog {
    /// Ramps from no fog at `near` to full fog at `far`.
    Linear { color: Vec3, near: f32, far: f32 },
    /// Squared exponential falloff; larger `density` thickens faster.
    Exponential { color: Vec3, density: f32 },
}

impl Fog {
    #[must_use]
    pub fn linear(color: Vec3, near: f32, far: f32) -> Self {
        Self::Linear { color, near, far }
    }

    #[must_use]
    pub fn exponential(color: Vec3, density: f32) -> Self {
        Self::Exponential { color, density }
    }

    #[inline]
    #[must_use]
    pub fn color(&self) -> Vec3 {
        match *self {
            Fog::Linear { color, .. } | Fog::Exponential { color, .. } => color,
        }
    }

    /// Fog blend at `distance` from the eye, clamped to `[0, 1]`.
    #[must_use]
    pub fn factor(&self, distance: f32) -> f32 {
        match *self {
            Fog::Linear { near, far, .. } => {
                if far <= near {
                    return if distance >= far { 1.0 } else { 0.0 };
                }
                ((distance - near) / (far - near)).clamp(0.0, 1.0)
            }
            Fog::Exponential { density, .. } => {
                let d = density * distance;
                (1.0 - (-d * d).exp()).clamp(0.0, 1.0)
            }
        }
    }
}
