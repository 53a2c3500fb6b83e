//! Byte fetching
//!
//! Raw resource bytes are read off the main thread. Each request runs on its
//! own short-lived thread and reports back over a channel that the main loop
//! drains once per frame.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::ResourceError;

/// Source of raw resource bytes, keyed by URL
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ResourceError>;
}

/// Reads URLs as paths relative to a root directory
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Fetch for FileFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ResourceError> {
        let path = self.root.join(url);
        std::fs::read(&path).map_err(|e| ResourceError::from_io(url, e))
    }
}

/// A finished fetch: the URL and its bytes or error
pub type Completion = (String, Result<Vec<u8>, ResourceError>);

/// Start fetching `url` on a background thread.
///
/// The thread sends exactly one completion before it exits, unless the
/// fetcher panics. The handle lets the caller tell those two cases apart.
pub fn spawn_fetch(fetcher: Arc<dyn Fetch>, url: String, sender: Sender<Completion>) -> JoinHandle<()> {
    thread::spawn(move || {
        let result = fetcher.fetch(&url);
        // The cache may have been dropped; nothing to report to then
        let _ = sender.send((url, result));
    })
}

/// Non-blocking receive of the next finished fetch.
///
/// The cache owns a sender for the lifetime of the channel, so an empty
/// channel never means disconnected.
pub fn try_next(receiver: &Receiver<Completion>) -> Option<Completion> {
    receiver.try_recv().ok()
}
