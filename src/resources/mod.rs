//! Resource Cache
//!
//! Loads images by URL and memoizes them. Loading is asynchronous: `load`
//! starts background fetches, and `poll` (called once per frame from the
//! main loop) turns finished fetches into handles. Handles are created on
//! the calling thread, which is what GPU textures require.
//!
//! A URL that was never requested, or is still in flight, reads as `None`
//! from `get`. The [`ReadyGate`] opens exactly once, after every requested
//! URL has loaded.

mod fetch;
mod gate;
pub mod texture;

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use thiserror::Error;

pub use fetch::{Fetch, FileFetcher};
pub use gate::ReadyGate;
use fetch::{spawn_fetch, try_next, Completion};

/// Errors from fetching or decoding a resource
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error reading {url}: {message}")]
    Io { url: String, message: String },

    #[error("could not decode {url}: {message}")]
    Decode { url: String, message: String },

    #[error("loader for {0} exited without reporting")]
    Disconnected(String),
}

impl ResourceError {
    pub(crate) fn from_io(url: &str, e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => ResourceError::NotFound(url.to_string()),
            _ => ResourceError::Io {
                url: url.to_string(),
                message: e.to_string(),
            },
        }
    }
}

/// Load state of one URL
#[derive(Debug)]
enum Slot<H> {
    /// In flight on the given loader thread
    Pending(JoinHandle<()>),
    Loaded(H),
    Failed(ResourceError),
}

/// Memoizing asynchronous resource cache, generic over the handle type
pub struct ResourceCache<H> {
    slots: HashMap<String, Slot<H>>,
    fetcher: Arc<dyn Fetch>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    gate: ReadyGate,
}

impl<H> ResourceCache<H> {
    pub fn new(fetcher: impl Fetch) -> Self {
        Self::with_fetcher(Arc::new(fetcher))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetch>) -> Self {
        let (sender, receiver) = channel();
        Self {
            slots: HashMap::new(),
            fetcher,
            sender,
            receiver,
            gate: ReadyGate::new(),
        }
    }

    /// Start loading every URL not already known to the cache
    pub fn load<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for url in urls {
            self.load_one(url);
        }
    }

    /// Start loading one URL. Returns false if it was already requested.
    pub fn load_one(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.slots.contains_key(&url) {
            return false;
        }
        self.gate.arm();
        let loader = spawn_fetch(Arc::clone(&self.fetcher), url.clone(), self.sender.clone());
        self.slots.insert(url, Slot::Pending(loader));
        true
    }

    /// Drain finished fetches, turning bytes into handles with `decode`.
    ///
    /// Returns the URLs that failed during this poll, with their errors.
    pub fn poll<F>(&mut self, mut decode: F) -> Vec<(String, ResourceError)>
    where
        F: FnMut(&str, &[u8]) -> Result<H, ResourceError>,
    {
        // A loader sends before it exits, so one that had already exited
        // here and is still pending after the drain died without sending.
        let exited: Vec<String> = self
            .slots
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Pending(loader) if loader.is_finished()))
            .map(|(url, _)| url.clone())
            .collect();

        let mut failures = Vec::new();
        while let Some((url, fetched)) = try_next(&self.receiver) {
            let result = fetched.and_then(|bytes| decode(&url, &bytes));
            self.finish(url, result, &mut failures);
        }
        for url in exited {
            let lost = ResourceError::Disconnected(url.clone());
            self.finish(url, Err(lost), &mut failures);
        }
        failures
    }

    /// Settle a pending slot. Completions for slots that are not pending
    /// are dropped.
    fn finish(
        &mut self,
        url: String,
        result: Result<H, ResourceError>,
        failures: &mut Vec<(String, ResourceError)>,
    ) {
        let Some(slot) = self.slots.get_mut(&url) else { return };
        if !matches!(slot, Slot::Pending(_)) {
            return;
        }
        match result {
            Ok(handle) => {
                *slot = Slot::Loaded(handle);
                self.gate.arrive(true);
            }
            Err(e) => {
                *slot = Slot::Failed(e.clone());
                self.gate.arrive(false);
                failures.push((url, e));
            }
        }
    }

    /// The loaded handle, or `None` if unknown, pending or failed
    pub fn get(&self, url: &str) -> Option<&H> {
        match self.slots.get(url) {
            Some(Slot::Loaded(handle)) => Some(handle),
            _ => None,
        }
    }

    /// Every requested URL has loaded
    pub fn is_ready(&self) -> bool {
        self.gate.is_open()
    }

    /// One-shot ready signal: true on the first call after everything loaded
    pub fn take_ready(&mut self) -> bool {
        self.gate.try_fire()
    }

    /// (loaded or failed, requested)
    pub fn progress(&self) -> (usize, usize) {
        (self.gate.completed(), self.gate.requested())
    }

    /// URLs still in flight
    pub fn pending(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .slots
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Pending(_)))
            .map(|(url, _)| url.as_str())
            .collect();
        out.sort_unstable();
        out
    }

    /// URLs that failed to load, with their errors, sorted by URL
    pub fn failures(&self) -> Vec<(&str, &ResourceError)> {
        let mut out: Vec<(&str, &ResourceError)> = self
            .slots
            .iter()
            .filter_map(|(url, slot)| match slot {
                Slot::Failed(e) => Some((url.as_str(), e)),
                _ => None,
            })
            .collect();
        out.sort_unstable_by_key(|(url, _)| *url);
        out
    }
}
