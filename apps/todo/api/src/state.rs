//! Shared application state.

use domain_items::ItemStore;

/// Cloned into routers and the shutdown task; both fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Pooled item store; disconnected once during shutdown
    pub store: ItemStore,
}
