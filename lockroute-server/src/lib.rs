//! HTTP surface for the river route planner
//!
//! One shared [`RoutePlanner`] session sits behind the API. Lock candidates
//! start out empty and are loaded once, after a client reports the visible
//! map area or the configured startup area is used.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use std::sync::Arc;

use lockroute_core::{BoundingBox, LockLoader, LockSource, OverpassClient, RoutePlanner};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub use config::ServerConfig;
pub use state::AppState;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Core(#[from] lockroute_core::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Starts the single lock load in the background
///
/// The load waits until `ready` delivers an area. When the sender side is
/// dropped without sending, the built-in lock set is used instead.
pub fn spawn_lock_loader<S>(
    planner: state::SharedPlanner,
    loader: Arc<LockLoader<S>>,
    ready: oneshot::Receiver<BoundingBox>,
) -> JoinHandle<()>
where
    S: LockSource + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let Some(locks) = loader.load_when_ready(async move { ready.await.ok() }).await else {
            return;
        };
        info!("Installing {} lock candidates", locks.len());
        state::lock_planner(&planner).replace_locks(locks);
    })
}

/// Runs the server until Ctrl-C
///
/// # Errors
///
/// Returns an error for invalid configuration, an unusable Overpass client,
/// or when the listener cannot be bound.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    let source = OverpassClient::new(config.overpass.url.clone(), config.overpass_timeout())?;
    let mut planner = RoutePlanner::new(config.planner);
    planner.set_signs(lockroute_core::builtin_signs());

    let (viewport_tx, viewport_rx) = oneshot::channel();
    let state = AppState::new(planner, viewport_tx);
    let loader = spawn_lock_loader(
        state.planner.clone(),
        Arc::new(LockLoader::new(source)),
        viewport_rx,
    );

    if let Some(bbox) = config.overpass.initial_bbox
        && !state.submit_viewport(bbox)
    {
        warn!("Startup area {bbox} was not submitted");
    }

    let app = api::router(state, &config);
    let listener = TcpListener::bind(config.bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    loader.abort();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
