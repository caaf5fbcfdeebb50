//! Simulated offline map-pack cache.
//!
//! Packs move `absent → downloading → cached`, monotonically: there is no
//! eviction, no re-download and no failure state for the transfer itself.
//! The "download" is a timer — after the configured delay the pack name is
//! appended to the cached set and the whole set is persisted. Requests for
//! packs already cached or already in flight are rejected as no-ops.
//! Distinct packs may download concurrently and complete independently.

use crate::error::Result;
use crate::prefs::{keys, PreferenceStore};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Lifecycle state of a named map pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackState {
    Absent,
    Downloading,
    Cached,
}

/// Outcome of a download request.
#[derive(Debug)]
pub enum DownloadStart {
    /// Download started; the handle resolves once the pack is cached.
    Started(JoinHandle<Result<()>>),
    /// The pack is already in flight; nothing was scheduled.
    AlreadyDownloading,
    /// The pack is already cached; nothing was scheduled.
    AlreadyCached,
}

#[derive(Debug, Default)]
struct CacheState {
    cached: Vec<String>,
    downloading: HashSet<String>,
}

/// Tracks simulated downloads and the persisted cached set.
///
/// Cheap to clone; clones share state. The lock is never held across an
/// await — the simulated transfer sleeps outside it.
#[derive(Debug, Clone)]
pub struct MapPackCache {
    store: Arc<PreferenceStore>,
    delay: Duration,
    state: Arc<Mutex<CacheState>>,
}

impl MapPackCache {
    /// Default simulated transfer time.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

    /// Create a cache, loading the persisted cached set from the store.
    pub fn new(store: Arc<PreferenceStore>, delay: Duration) -> Self {
        let cached = store.load(keys::DOWNLOADED_MAPS);
        debug!("Map pack cache starting with {} cached packs", cached.len());
        Self {
            store,
            delay,
            state: Arc::new(Mutex::new(CacheState {
                cached,
                downloading: HashSet::new(),
            })),
        }
    }

    /// Current state of a pack.
    pub fn state(&self, pack: &str) -> PackState {
        let state = self.state.lock().unwrap();
        if state.cached.iter().any(|p| p == pack) {
            PackState::Cached
        } else if state.downloading.contains(pack) {
            PackState::Downloading
        } else {
            PackState::Absent
        }
    }

    /// Cached pack names, oldest first.
    pub fn cached(&self) -> Vec<String> {
        self.state.lock().unwrap().cached.clone()
    }

    /// Pack names currently in flight.
    pub fn downloading(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let mut names: Vec<String> = state.downloading.iter().cloned().collect();
        names.sort();
        names
    }

    /// Request a download. Already-cached and already-downloading packs are
    /// no-ops; otherwise the pack enters `downloading` and a task is
    /// scheduled that caches it after the configured delay.
    pub fn start_download(&self, pack: &str) -> DownloadStart {
        let pack = pack.trim();
        {
            let mut state = self.state.lock().unwrap();
            if state.cached.iter().any(|p| p == pack) {
                debug!("Pack already cached: {}", pack);
                return DownloadStart::AlreadyCached;
            }
            if !state.downloading.insert(pack.to_string()) {
                debug!("Pack already downloading: {}", pack);
                return DownloadStart::AlreadyDownloading;
            }
        }

        info!("Starting simulated download of {}", pack);
        let cache = self.clone();
        let pack = pack.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(cache.delay).await;
            cache.commit(&pack)
        });
        DownloadStart::Started(handle)
    }

    /// Move a finished pack into the cached set and persist the set.
    fn commit(&self, pack: &str) -> Result<()> {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            state.downloading.remove(pack);
            if !state.cached.iter().any(|p| p == pack) {
                state.cached.push(pack.to_string());
            }
            state.cached.clone()
        };
        self.store.save(keys::DOWNLOADED_MAPS, &snapshot)?;
        info!("Map pack cached: {}", pack);
        Ok(())
    }
}
