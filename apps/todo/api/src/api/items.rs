use axum::Router;
use domain_items::{ItemService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let service = ItemService::new(state.store.clone());
    handlers::router(service)
}
