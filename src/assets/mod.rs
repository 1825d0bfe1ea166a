//! Asset loading
//!
//! [`Loader`] turns files into shared resources, either on the calling
//! thread or on a background thread. Background results reach the scene
//! through a [`LoadQueue`] drained on the scene's own thread:
//!
//! ```rust,ignore
//! let queue = LoadQueue::new();
//! Arc::new(MyGeometryLoader).load_deferred("rock.bin", Some(rock), &queue)?;
//!
//! // each frame
//! for asset in queue.drain() {
//!     if let (Some(node), Ok(geometry)) = (asset.target, asset.result) {
//!         scene.set_geometry(node, geometry);
//!     }
//! }
//! ```

pub mod loader;
pub mod queue;

pub use loader::Loader;
pub use queue::{LoadQueue, LoadedAsset};
