use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    /// Shines along the node's -Z axis.
    Directional,
    Point {
        /// Zero means unlimited range.
        range: f32,
        decay: f32,
    },
    Spot {
        range: f32,
        /// Cone half-angle in radians.
        angle: f32,
        /// Fraction of the cone that fades out, `0..=1`.
        penumbra: f32,
    },
}

/// Light payload of a light node.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    #[must_use]
    pub fn new_ambient(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Ambient,
        }
    }

    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Directional,
        }
    }

    #[must_use]
    pub fn new_point(color: Vec3, intensity: f32, range: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Point { range, decay: 2.0 },
        }
    }

    #[must_use]
    pub fn new_spot(color: Vec3, intensity: f32, range: f32, angle: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Spot {
                range,
                angle,
                penumbra: 0.0,
            },
        }
    }

    /// Whether the light's position in the scene matters for shading.
    #[must_use]
    pub fn is_positional(&self) -> bool {
        matches!(self.kind, LightKind::Point { .. } | LightKind::Spot { .. })
    }
}
