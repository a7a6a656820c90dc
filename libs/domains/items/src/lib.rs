//! Items Domain
//!
//! Todo items persisted in a relational `item` table and served over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints under {base}/items
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Paging, sort allow-list, id and flag coercion
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + ItemStore (SeaORM) and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Item, Page, request DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::postgres::PostgresConfig;
//! use domain_items::{ItemService, ItemStore, handlers};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ItemStore::connect(PostgresConfig::new("postgres://localhost/todo")).await?;
//! let service = ItemService::new(store.clone());
//!
//! let router = handlers::router(service);
//! // ... serve, then on shutdown:
//! store.disconnect().await?;
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use models::{
    Item, ListParams, PAGE_SIZE, Page, PageQuery, SaveItem, SaveParams, SortDirection, SortField,
};
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
pub use store::ItemStore;
