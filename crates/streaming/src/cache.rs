use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::residency::{LoadProbe, ResidencyState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    UnknownKey(String),
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::UnknownKey(key) => write!(f, "unknown image cache key: {key}"),
        }
    }
}

impl std::error::Error for CacheError {}

#[derive(Debug)]
struct ImageEntry<H> {
    state: ResidencyState,
    handle: Option<H>,
    error: Option<String>,
}

/// Image handles keyed by file id, loaded at most once each.
///
/// The host owns decoding: `request` starts a load and stores its handle,
/// then `poll` (once per frame) or `mark_*` (from a completion callback)
/// settles it. Entries are never evicted individually; `reset` drops all of
/// them when the file list is replaced.
///
/// Entries live in a `BTreeMap` so iteration order is stable.
#[derive(Debug)]
pub struct ImageCache<H> {
    entries: BTreeMap<String, ImageEntry<H>>,
}

impl<H> Default for ImageCache<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ImageCache<H> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn state(&self, key: &str) -> Option<ResidencyState> {
        self.entries.get(key).map(|e| e.state)
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|e| e.error.as_deref())
    }

    /// Start loading `key` unless an entry for it already exists.
    ///
    /// Returns `true` if `load` was invoked. A load that fails to start is
    /// recorded as `Failed` and is not retried.
    pub fn request<E: std::fmt::Display>(
        &mut self,
        key: &str,
        load: impl FnOnce() -> Result<H, E>,
    ) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }

        let entry = match load() {
            Ok(handle) => ImageEntry {
                state: ResidencyState::Loading,
                handle: Some(handle),
                error: None,
            },
            Err(err) => {
                debug!(key, %err, "image load could not start");
                ImageEntry {
                    state: ResidencyState::Failed,
                    handle: None,
                    error: Some(err.to_string()),
                }
            }
        };
        self.entries.insert(key.to_string(), entry);
        true
    }

    /// Settle loading entries by asking the host about each handle.
    ///
    /// Returns the number of entries that changed state.
    pub fn poll(&mut self, mut probe: impl FnMut(&H) -> LoadProbe) -> usize {
        let mut changed = 0;
        for (key, entry) in self.entries.iter_mut() {
            if entry.state != ResidencyState::Loading {
                continue;
            }
            let Some(handle) = entry.handle.as_ref() else {
                continue;
            };
            match probe(handle) {
                LoadProbe::Pending => {}
                LoadProbe::Ready => {
                    trace!(key = key.as_str(), "image resident");
                    entry.state = ResidencyState::Resident;
                    changed += 1;
                }
                LoadProbe::Failed => {
                    debug!(key = key.as_str(), "image decode failed");
                    entry.state = ResidencyState::Failed;
                    entry.error = Some("decode failed".to_string());
                    changed += 1;
                }
            }
        }
        changed
    }

    pub fn mark_resident(&mut self, key: &str) -> Result<(), CacheError> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| CacheError::UnknownKey(key.to_string()))?;
        if entry.handle.is_some() {
            entry.state = ResidencyState::Resident;
        }
        Ok(())
    }

    pub fn mark_failed(&mut self, key: &str, reason: impl Into<String>) -> Result<(), CacheError> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| CacheError::UnknownKey(key.to_string()))?;
        entry.state = ResidencyState::Failed;
        entry.error = Some(reason.into());
        Ok(())
    }

    /// The decoded handle for `key`, if it is resident.
    pub fn ready(&self, key: &str) -> Option<&H> {
        let entry = self.entries.get(key)?;
        match entry.state {
            ResidencyState::Resident => entry.handle.as_ref(),
            _ => None,
        }
    }

    /// Drop every entry. In-flight host loads are not cancelled; their
    /// handles are simply released here.
    pub fn reset(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        if n > 0 {
            debug!(entries = n, "image cache reset");
        }
        n
    }
}
