use axum::Router;

pub mod health;
pub mod items;

/// Resource routes without the base path; `create_router` mounts them under
/// `API_BASE_PATH`. Every sub-router already has its state applied.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().merge(items::router(state))
}

/// `/ready`, checked against the live store. Merged next to `/health` at the root.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
