use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::BlobStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: donut_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Local blob store for uploaded audio files.
    pub storage: Arc<BlobStore>,
}
