use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lockroute_core::{BoundingBox, RoutePlanner};
use tokio::sync::oneshot;
use tracing::info;

pub type SharedPlanner = Arc<Mutex<RoutePlanner>>;

/// Locks the planner, recovering the state if a handler panicked while
/// holding it
pub fn lock_planner(planner: &SharedPlanner) -> MutexGuard<'_, RoutePlanner> {
    planner.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone)]
pub struct AppState {
    pub planner: SharedPlanner,
    /// Fires the one lock load; taken on first use
    viewport: Arc<Mutex<Option<oneshot::Sender<BoundingBox>>>>,
}

impl AppState {
    pub fn new(planner: RoutePlanner, viewport: oneshot::Sender<BoundingBox>) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            viewport: Arc::new(Mutex::new(Some(viewport))),
        }
    }

    pub fn planner(&self) -> MutexGuard<'_, RoutePlanner> {
        lock_planner(&self.planner)
    }

    /// Hands the visible map area to the lock loader
    ///
    /// Returns false when an area was already submitted or the loader is
    /// gone.
    pub fn submit_viewport(&self, bbox: BoundingBox) -> bool {
        let sender = self
            .viewport
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender {
            Some(sender) => {
                info!("Map area {bbox} ready, triggering lock load");
                sender.send(bbox).is_ok()
            }
            None => false,
        }
    }
}
