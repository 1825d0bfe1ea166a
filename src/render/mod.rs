//! Renderer-facing side of the scene graph
//!
//! - renderable: per-node validation, culling and classification
//! - render_lists: cached, culled and sorted draw lists for one camera
//! - settings: knobs for the lists

pub mod render_lists;
pub mod renderable;
pub mod settings;

pub use render_lists::RenderLists;
pub use renderable::{can_render, has_live_content, in_frustum, is_mesh_type, is_renderable};
pub use settings::{RenderSettings, Revalidation};
