//! Cache-first image loader bound to one display surface.
//!
//! Each loader resolves at most one source at a time. Assigning a new source
//! bumps a generation counter and aborts the previous resolution task; any
//! completion that still slips through is discarded because its generation no
//! longer matches.
//!
//! The display callback runs with only the delivery lock held. That lock is
//! reentrant and is also taken by `set_source`, `clear_source` and `Drop`, so a
//! display may query or even reassign its own loader, while another thread
//! reassigning the source waits for an in-progress delivery to finish.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::{Mutex, ReentrantMutex};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::domain::entities::{ImageSource, LoadStatus, SourceId};
use crate::domain::errors::{CacheResult, FetchError};
use crate::domain::ports::{ImageCachePort, ImageDisplayPort, ImageFetcherPort};

/// Resolves image sources from the cache or the network and hands the bytes
/// to a display.
pub struct LazyImageLoader {
    shared: Arc<Shared>,
    runtime: Handle,
    cache: Arc<dyn ImageCachePort>,
    fetcher: Arc<dyn ImageFetcherPort>,
}

impl std::fmt::Debug for LazyImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (generation, source) = {
            let slot = self.shared.slot.lock();
            (slot.generation, slot.source.clone())
        };
        f.debug_struct("LazyImageLoader")
            .field("generation", &generation)
            .field("source", &source)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

/// State reachable from resolution tasks.
struct Shared {
    delivery: ReentrantMutex<()>,
    slot: Mutex<Slot>,
    status_tx: watch::Sender<LoadStatus>,
    display: Arc<dyn ImageDisplayPort>,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    source: Option<SourceId>,
    task: Option<JoinHandle<()>>,
}

impl Slot {
    /// Invalidates the current resolution and aborts its task.
    fn supersede(&mut self) -> u64 {
        self.generation += 1;
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation
    }
}

impl Shared {
    fn is_current(&self, generation: u64) -> bool {
        self.slot.lock().generation == generation
    }

    /// Hands bytes to the display if `generation` is still current.
    fn deliver(
        &self,
        generation: u64,
        source: &SourceId,
        bytes: Bytes,
        origin: ImageSource,
    ) -> bool {
        let _delivering = self.delivery.lock();
        if !self.is_current(generation) {
            return false;
        }

        self.display.display(source, bytes);

        // The display may have reassigned the source from inside the callback.
        let slot = self.slot.lock();
        if slot.generation == generation {
            self.status_tx.send_replace(LoadStatus::Delivered(origin));
        }
        true
    }

    /// Marks the resolution failed if `generation` is still current.
    fn fail(&self, generation: u64, error: &FetchError) -> bool {
        let slot = self.slot.lock();
        if slot.generation != generation {
            return false;
        }

        self.status_tx
            .send_replace(LoadStatus::Failed(error.to_string()));
        true
    }
}

impl LazyImageLoader {
    /// Creates an idle loader whose resolutions run on `runtime`.
    ///
    /// The loader can then be driven from any thread, including ones that are
    /// not part of the runtime.
    #[must_use]
    pub fn new(
        runtime: Handle,
        cache: Arc<dyn ImageCachePort>,
        fetcher: Arc<dyn ImageFetcherPort>,
        display: Arc<dyn ImageDisplayPort>,
    ) -> Self {
        let (status_tx, _) = watch::channel(LoadStatus::Idle);
        Self {
            shared: Arc::new(Shared {
                delivery: ReentrantMutex::new(()),
                slot: Mutex::new(Slot::default()),
                status_tx,
                display,
            }),
            runtime,
            cache,
            fetcher,
        }
    }

    /// Starts resolving `source`, superseding whatever was in flight.
    ///
    /// Setting the source that is already resolving is a no-op. Setting it
    /// again after it was delivered or failed resolves it again.
    pub fn set_source(&self, source: impl Into<SourceId>) {
        let source = source.into();
        let _delivery = self.shared.delivery.lock();
        let mut slot = self.shared.slot.lock();

        if slot.source.as_ref() == Some(&source) && self.shared.status_tx.borrow().is_resolving()
        {
            trace!(source = %source, "Source already resolving");
            return;
        }

        let generation = slot.supersede();
        slot.source = Some(source.clone());
        self.shared.status_tx.send_replace(LoadStatus::Resolving);
        debug!(source = %source, generation, "Resolving image");

        let task = self.runtime.spawn(resolve(
            self.shared.clone(),
            self.cache.clone(),
            self.fetcher.clone(),
            generation,
            source,
        ));
        slot.task = Some(task);
    }

    /// Drops the current source and cancels its resolution.
    pub fn clear_source(&self) {
        let _delivery = self.shared.delivery.lock();
        let mut slot = self.shared.slot.lock();
        slot.supersede();
        slot.source = None;
        self.shared.status_tx.send_replace(LoadStatus::Idle);
    }

    /// Returns the source currently assigned.
    #[must_use]
    pub fn current_source(&self) -> Option<SourceId> {
        self.shared.slot.lock().source.clone()
    }

    /// Returns the current load status.
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.shared.status_tx.borrow().clone()
    }

    /// Subscribes to status changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoadStatus> {
        self.shared.status_tx.subscribe()
    }

    /// Removes every image from `cache`, without needing a loader.
    ///
    /// # Errors
    /// Returns error if the cache directory cannot be listed or an entry cannot be removed.
    pub async fn purge_cache(cache: &dyn ImageCachePort) -> CacheResult<()> {
        cache.clear_all().await?;
        info!("Cleared image cache");
        Ok(())
    }

    /// Removes the image for `source` from `cache`, without needing a loader.
    pub async fn purge_cache_entry(cache: &dyn ImageCachePort, source: &SourceId) {
        cache.clear_one(source).await;
    }

    /// Removes every cached image. In-flight resolutions are not affected.
    pub async fn clear_cache(&self) {
        if let Err(e) = Self::purge_cache(self.cache.as_ref()).await {
            warn!(error = %e, "Failed to clear image cache");
        }
    }

    /// Removes the cached image for `source`. In-flight resolutions are not affected.
    pub async fn clear_cache_entry(&self, source: &SourceId) {
        Self::purge_cache_entry(self.cache.as_ref(), source).await;
    }
}

impl Drop for LazyImageLoader {
    fn drop(&mut self) {
        let _delivery = self.shared.delivery.lock();
        self.shared.slot.lock().supersede();
    }
}

async fn resolve(
    shared: Arc<Shared>,
    cache: Arc<dyn ImageCachePort>,
    fetcher: Arc<dyn ImageFetcherPort>,
    generation: u64,
    source: SourceId,
) {
    if let Some(bytes) = cache.get(&source).await {
        if shared.deliver(generation, &source, bytes, ImageSource::DiskCache) {
            debug!(source = %source, "Delivered image from disk cache");
        } else {
            debug!(source = %source, "Discarding stale cache hit");
        }
        return;
    }

    if !shared.is_current(generation) {
        return;
    }

    match fetcher.fetch(&source).await {
        Ok(bytes) => {
            if !shared.is_current(generation) {
                debug!(source = %source, "Discarding stale download");
                return;
            }

            if let Err(e) = cache.put(&source, bytes.clone()).await {
                warn!(source = %source, error = %e, "Failed to cache image, delivering anyway");
            }

            if shared.deliver(generation, &source, bytes, ImageSource::Network) {
                debug!(source = %source, "Delivered image from network");
            } else {
                debug!(source = %source, "Discarding stale download");
            }
        }
        Err(e) => {
            if shared.fail(generation, &e) {
                warn!(
                    source = %source,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Image fetch failed"
                );
            } else {
                debug!(source = %source, error = %e, "Ignoring failure of stale fetch");
            }
        }
    }
}
