//! Render List Settings
//!
//! ```rust,ignore
//! use canopy::render::{RenderLists, RenderSettings, Revalidation};
//!
//! let lists = RenderLists::with_settings(RenderSettings {
//!     frustum_culling: false,
//!     ..Default::default()
//! });
//! ```

/// When cached renderables are checked with
/// [`can_render`](crate::render::can_render).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Revalidation {
    /// Every cached renderable is validated on every frame. Content that
    /// finishes loading shows up on the next frame without any hierarchy
    /// change.
    #[default]
    EveryFrame,
    /// Only the nodes that passed validation when membership was last
    /// rebuilt are drawn. Content swapped in afterward stays hidden until
    /// the scene is touched again. Nodes whose geometry was disposed or
    /// whose geometry or material went missing still drop out every frame.
    OnRebuild,
}

/// Configuration for [`RenderLists`](crate::render::RenderLists).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    /// Reject renderables whose bounding sphere lies outside the camera
    /// frustum.
    pub frustum_culling: bool,
    /// Sort opaque renderables front-to-back.
    pub sort_opaque: bool,
    /// Sort transparent renderables and sprites back-to-front.
    pub sort_transparent: bool,
    pub revalidation: Revalidation,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            frustum_culling: true,
            sort_opaque: true,
            sort_transparent: true,
            revalidation: Revalidation::EveryFrame,
        }
    }
}
