use std::path::PathBuf;
use std::sync::Arc;

use flume::{Receiver, Sender};

use crate::errors::Result;
use crate::scene::NodeHandle;

/// Outcome of one deferred load.
#[derive(Debug)]
pub struct LoadedAsset<T> {
    pub path: PathBuf,
    /// Node the caller wants the resource attached to, if any.
    pub target: Option<NodeHandle>,
    pub result: Result<Arc<T>>,
}

/// Hands results from loader threads back to the thread that owns the
/// scene.
///
/// Any number of loaders may send into the queue; the owner calls
/// [`drain`](Self::drain) once per frame, before advancing the scene, and
/// applies what arrived.
#[derive(Debug)]
pub struct LoadQueue<T> {
    sender: Sender<LoadedAsset<T>>,
    receiver: Receiver<LoadedAsset<T>>,
}

impl<T> Default for LoadQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LoadQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    #[must_use]
    pub fn sender(&self) -> Sender<LoadedAsset<T>> {
        self.sender.clone()
    }

    /// Everything that has arrived so far, without blocking.
    pub fn drain(&self) -> impl Iterator<Item = LoadedAsset<T>> + '_ {
        self.receiver.try_iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }
}
