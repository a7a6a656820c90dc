//! Item Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ListParams, PAGE_SIZE, Page, PageQuery, SaveItem};
use crate::repository::ItemRepository;

/// Item service providing business logic operations
///
/// Input is validated here, before the repository is touched.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// One sorted page plus the total number of items
    #[instrument(skip(self))]
    pub async fn list_items(&self, params: ListParams) -> ItemResult<Page> {
        let query = PageQuery::try_from(params)?;

        let list = self.repository.list_all(query).await?;
        let total_results = self.repository.count_all().await?;

        Ok(Page {
            current_page: query.page,
            list,
            page_size: PAGE_SIZE,
            sort_fields: query.sort_field,
            sort_directions: query.direction,
            total_results,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i64) -> ItemResult<Item> {
        self.repository.read(id).await
    }

    /// Update the item named by `input.id`, or create one when no id is given
    #[instrument(skip(self, input))]
    pub async fn save_item(&self, input: SaveItem) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let done = input.is_done();
        match input.target_id()? {
            Some(id) => self.repository.update(id, input.description, done).await,
            None => self.repository.create(input.description, done).await,
        }
    }

    /// Delete an item, returning its last state
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i64) -> ItemResult<Item> {
        self.repository.destroy(id).await
    }

    #[instrument(skip(self))]
    pub async fn ping(&self) -> ItemResult<()> {
        self.repository.ping().await
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
