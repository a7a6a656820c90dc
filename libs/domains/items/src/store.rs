//! SQL-backed item store

use async_trait::async_trait;
use database::common::RetryConfig;
use database::postgres::{self, PostgresConfig};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait, QueryOrder,
    QuerySelect, TransactionTrait,
};

use crate::entity;
use crate::error::{ItemError, ItemResult};
use crate::models::{Item, PageQuery, SortDirection, SortField};
use crate::repository::ItemRepository;

/// Item persistence over a pooled SeaORM connection.
///
/// Cloning shares the pool. Every backend failure is returned to the caller
/// as-is; nothing is retried after [`ItemStore::connect`].
#[derive(Clone)]
pub struct ItemStore {
    db: DatabaseConnection,
}

impl ItemStore {
    /// Connect with the startup retry policy and declare the `item` table.
    pub async fn connect(config: PostgresConfig) -> ItemResult<Self> {
        tracing::info!(url = %config.redacted_url(), "Connecting item store");

        let db = postgres::connect_from_config_with_retry(config, Some(RetryConfig::startup()))
            .await
            .map_err(|e| ItemError::Connection(e.to_string()))?;

        let store = Self::from_connection(db);
        store
            .declare_schema()
            .await
            .map_err(|e| ItemError::Connection(e.to_string()))?;

        Ok(store)
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// `CREATE TABLE IF NOT EXISTS item`; existing data is left alone.
    pub async fn declare_schema(&self) -> ItemResult<()> {
        postgres::create_table_if_not_exists(&self.db, entity::Entity).await?;
        Ok(())
    }

    /// Close the pool shared by this store and all of its clones.
    ///
    /// Clones stay callable, but every operation on them then fails with
    /// [`ItemError::Connection`] (503 over HTTP).
    pub async fn disconnect(self) -> ItemResult<()> {
        self.db
            .close()
            .await
            .map_err(|e| ItemError::Connection(e.to_string()))?;

        tracing::info!("Item store disconnected");
        Ok(())
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn sort_column(field: SortField) -> entity::Column {
    match field {
        SortField::Id => entity::Column::Id,
        SortField::Description => entity::Column::Description,
        SortField::Done => entity::Column::Done,
    }
}

fn sort_order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

#[async_trait]
impl ItemRepository for ItemStore {
    async fn create(&self, description: Option<String>, done: bool) -> ItemResult<Item> {
        let model = entity::ActiveModel {
            description: Set(description),
            done: Set(Some(done)),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(item_id = model.id, "Created item");
        Ok(model.into())
    }

    async fn read(&self, id: i64) -> ItemResult<Item> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Item::from)
            .ok_or(ItemError::NotFound(id))
    }

    async fn update(&self, id: i64, description: Option<String>, done: bool) -> ItemResult<Item> {
        // One conditional UPDATE; no row matched means the id does not exist.
        let result = entity::ActiveModel {
            id: Unchanged(id),
            description: Set(description),
            done: Set(Some(done)),
        }
        .update(&self.db)
        .await;

        match result {
            Ok(model) => {
                tracing::info!(item_id = id, "Updated item");
                Ok(model.into())
            }
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
                Err(ItemError::NotFound(id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn destroy(&self, id: i64) -> ItemResult<Item> {
        let txn = self.db.begin().await?;

        // Dropping the transaction on an early return rolls it back.
        let model = entity::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        let deleted = entity::Entity::delete_by_id(id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            return Err(ItemError::NotFound(id));
        }

        txn.commit().await?;

        tracing::info!(item_id = id, "Deleted item");
        Ok(model.into())
    }

    async fn count_all(&self) -> ItemResult<u64> {
        Ok(entity::Entity::find().count(&self.db).await?)
    }

    async fn list_all(&self, query: PageQuery) -> ItemResult<Vec<Item>> {
        let mut select = entity::Entity::find()
            .order_by(sort_column(query.sort_field), sort_order(query.direction));

        if query.sort_field != SortField::Id {
            select = select.order_by_asc(entity::Column::Id);
        }

        let models = select
            .limit(query.limit())
            .offset(query.offset())
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Item::from).collect())
    }

    async fn ping(&self) -> ItemResult<()> {
        postgres::check_health(&self.db)
            .await
            .map_err(|e| ItemError::Connection(e.to_string()))
    }
}
