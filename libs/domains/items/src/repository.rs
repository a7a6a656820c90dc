use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, PageQuery, SortDirection, SortField};

/// Repository trait for Item persistence
///
/// `ItemStore` is the SQL implementation; `InMemoryItemRepository` backs tests
/// and local runs without a database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item and return it with its assigned id
    async fn create(&self, description: Option<String>, done: bool) -> ItemResult<Item>;

    /// Get an item by ID
    async fn read(&self, id: i64) -> ItemResult<Item>;

    /// Overwrite description and done of an existing item
    async fn update(&self, id: i64, description: Option<String>, done: bool) -> ItemResult<Item>;

    /// Delete an item, returning it as it was before deletion
    async fn destroy(&self, id: i64) -> ItemResult<Item>;

    async fn count_all(&self) -> ItemResult<u64>;

    /// One page of items in the requested order
    async fn list_all(&self, query: PageQuery) -> ItemResult<Vec<Item>>;

    /// Verify the backend is reachable
    async fn ping(&self) -> ItemResult<()>;
}

#[derive(Default)]
struct InMemoryState {
    last_id: i64,
    items: BTreeMap<i64, Item>,
}

/// In-memory repository with the same ordering and paging as the SQL store
#[derive(Clone, Default)]
pub struct InMemoryItemRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Order by the requested column, ties broken by ascending id.
fn compare(a: &Item, b: &Item, query: &PageQuery) -> Ordering {
    let ordering = match query.sort_field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Description => a.description.cmp(&b.description),
        SortField::Done => a.done.cmp(&b.done),
    };

    let ordering = match query.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };

    ordering.then(a.id.cmp(&b.id))
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, description: Option<String>, done: bool) -> ItemResult<Item> {
        let mut state = self.state.write().await;

        state.last_id += 1;
        let item = Item {
            id: state.last_id,
            description,
            done,
        };
        state.items.insert(item.id, item.clone());

        tracing::info!(item_id = item.id, "Created item");
        Ok(item)
    }

    async fn read(&self, id: i64) -> ItemResult<Item> {
        let state = self.state.read().await;
        state.items.get(&id).cloned().ok_or(ItemError::NotFound(id))
    }

    async fn update(&self, id: i64, description: Option<String>, done: bool) -> ItemResult<Item> {
        let mut state = self.state.write().await;
        let item = state.items.get_mut(&id).ok_or(ItemError::NotFound(id))?;

        item.description = description;
        item.done = done;

        tracing::info!(item_id = id, "Updated item");
        Ok(item.clone())
    }

    async fn destroy(&self, id: i64) -> ItemResult<Item> {
        let mut state = self.state.write().await;
        let item = state.items.remove(&id).ok_or(ItemError::NotFound(id))?;

        tracing::info!(item_id = id, "Deleted item");
        Ok(item)
    }

    async fn count_all(&self) -> ItemResult<u64> {
        Ok(self.state.read().await.items.len() as u64)
    }

    async fn list_all(&self, query: PageQuery) -> ItemResult<Vec<Item>> {
        let state = self.state.read().await;

        let mut items: Vec<Item> = state.items.values().cloned().collect();
        items.sort_by(|a, b| compare(a, b, &query));

        Ok(items
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit() as usize)
            .collect())
    }

    async fn ping(&self) -> ItemResult<()> {
        Ok(())
    }
}
