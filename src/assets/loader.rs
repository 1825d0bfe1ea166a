use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::queue::{LoadQueue, LoadedAsset};
use crate::errors::{CanopyError, Result};
use crate::scene::NodeHandle;

/// Produces a resource from a file.
///
/// Implementors only decode; existence checks, logging and threading are
/// provided. Results are shared through `Arc` so one loaded geometry or
/// material can back many nodes.
///
/// # Example
///
/// ```rust,ignore
/// struct RawGeometryLoader;
///
/// impl Loader for RawGeometryLoader {
///     type Resource = Geometry;
///
///     fn load_resource(&self, path: &Path) -> Result<Geometry> {
///         let bytes = std::fs::read(path)?;
///         Ok(Geometry::with_data(bytemuck::pod_collect_to_vec(&bytes), Vec::new()))
///     }
/// }
///
/// let loader = Arc::new(RawGeometryLoader);
/// loader.load_deferred("models/rock.bin", Some(rock), &queue)?;
/// ```
pub trait Loader: Send + Sync + 'static {
    type Resource: Send + Sync + 'static;

    /// Decodes the file at `path`. Called only for paths that exist.
    fn load_resource(&self, path: &Path) -> Result<Self::Resource>;

    /// Loads on the calling thread.
    fn load(&self, path: &Path) -> Result<Arc<Self::Resource>> {
        if !path.exists() {
            let err = CanopyError::FileNotFound(path.to_path_buf());
            log::error!("{err}");
            return Err(err);
        }
        self.load_resource(path)
            .map(Arc::new)
            .inspect_err(|err| log::error!("{err}"))
    }

    /// Loads on a background thread and passes the outcome to `callback`
    /// on that thread.
    ///
    /// A missing file is reported to `callback` before this returns. The
    /// callback must not touch the scene; use
    /// [`load_deferred`](Self::load_deferred) to get results back onto the
    /// scene's thread.
    fn load_async<F>(self: Arc<Self>, path: impl Into<PathBuf>, callback: F) -> Result<()>
    where
        Self: Sized,
        F: FnOnce(Result<Arc<Self::Resource>>) + Send + 'static,
    {
        let path = path.into();
        if !path.exists() {
            let err = CanopyError::FileNotFound(path);
            log::error!("{err}");
            callback(Err(err));
            return Ok(());
        }

        let thread_name = format!(
            "canopy-loader:{}",
            path.file_name().map_or_else(|| "?".into(), |n| n.to_string_lossy())
        );
        std::thread::Builder::new()
            .name(thread_name)
            .spawn(move || callback(self.load(&path)))
            .map(|_| ())
            .map_err(|err| {
                log::error!("Failed to spawn loader thread: {err}");
                CanopyError::LoaderThread(err.to_string())
            })
    }

    /// Loads on a background thread and delivers the outcome into `queue`,
    /// tagged with `target`.
    fn load_deferred(
        self: Arc<Self>,
        path: impl Into<PathBuf>,
        target: Option<NodeHandle>,
        queue: &LoadQueue<Self::Resource>,
    ) -> Result<()>
    where
        Self: Sized,
    {
        let path = path.into();
        let sender = queue.sender();
        let delivered_path = path.clone();
        self.load_async(path, move |result| {
            let asset = LoadedAsset {
                path: delivered_path,
                target,
                result,
            };
            if sender.send(asset).is_err() {
                log::warn!("Load queue dropped before the result arrived");
            }
        })
    }
}
