use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};

use super::{BoundingBox, builtin_locks};
use crate::{Error, model::Lock};

/// Remote source of lock candidates for an area
pub trait LockSource {
    fn fetch_locks(
        &self,
        bbox: &BoundingBox,
    ) -> impl Future<Output = Result<Vec<Lock>, Error>> + Send;
}

/// Turns a fetch outcome into a usable candidate set
///
/// Failures and empty results both fall back to [`builtin_locks`].
pub fn resolve_locks(result: Result<Vec<Lock>, Error>) -> Vec<Lock> {
    match result {
        Ok(locks) if !locks.is_empty() => {
            info!("Loaded {} locks from remote source", locks.len());
            locks
        }
        Ok(_) => {
            warn!("Remote source returned no locks, using built-in lock set");
            builtin_locks()
        }
        Err(e) => {
            warn!("Lock fetch failed ({e}), using built-in lock set");
            builtin_locks()
        }
    }
}

/// Issues at most one lock fetch for its whole lifetime
///
/// The fetch waits for a readiness signal carrying the area to query, the
/// way a map view only knows its bounds once it has loaded.
#[derive(Debug)]
pub struct LockLoader<S> {
    source: S,
    issued: AtomicBool,
}

impl<S: LockSource> LockLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            issued: AtomicBool::new(false),
        }
    }

    /// Whether the single load has already been started
    pub fn is_issued(&self) -> bool {
        self.issued.load(Ordering::Acquire)
    }

    /// Waits for `ready`, then fetches locks for the area it yields
    ///
    /// Returns `None` when a load was already issued by an earlier call.
    /// When `ready` yields no area the built-in set is returned without
    /// contacting the source. Fetch failures never surface: they resolve to
    /// the built-in set as well.
    pub async fn load_when_ready<F>(&self, ready: F) -> Option<Vec<Lock>>
    where
        F: Future<Output = Option<BoundingBox>>,
    {
        if self.issued.swap(true, Ordering::AcqRel) {
            info!("Lock load already issued, ignoring repeated trigger");
            return None;
        }

        let Some(bbox) = ready.await else {
            warn!("No map area available, using built-in lock set");
            return Some(builtin_locks());
        };

        Some(resolve_locks(self.source.fetch_locks(&bbox).await))
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
