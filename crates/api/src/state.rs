use std::sync::Arc;

use poli_core::directory::StudentDirectory;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Registered students, looked up by CPF.
    pub directory: Arc<dyn StudentDirectory>,
}
