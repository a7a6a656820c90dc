//! Integration tests for the item store
//!
//! The SQL path runs against in-memory SQLite by default. The `postgres_*` tests
//! repeat the core checks on PostgreSQL via testcontainers and need Docker:
//! `cargo test -p domain_items -- --ignored`

use domain_items::*;
use sea_orm::ConnectionTrait;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

async fn sqlite_store() -> (TestDatabase, ItemStore) {
    let db = TestDatabase::in_memory().await;
    let store = ItemStore::from_connection(db.connection());
    store.declare_schema().await.unwrap();
    (db, store)
}

async fn postgres_store() -> (TestDatabase, ItemStore) {
    let db = TestDatabase::postgres().await;
    let store = ItemStore::from_connection(db.connection());
    store.declare_schema().await.unwrap();
    (db, store)
}

async fn seed(store: &ItemStore, builder: &TestDataBuilder, n: usize) -> Vec<Item> {
    let mut items = Vec::with_capacity(n);
    for i in 1..=n {
        let item = store
            .create(Some(builder.description("item", i)), builder.done(i))
            .await
            .unwrap();
        items.push(item);
    }
    items
}

// ============================================================================
// Shared checks
// ============================================================================

async fn check_create_read_update_destroy(store: &ItemStore) {
    let created = store.create(Some("buy milk".into()), false).await.unwrap();
    assert!(!created.done);

    let read = store.read(created.id).await.unwrap();
    assert_eq!(read, created);
    // Idempotent without writes in between
    assert_eq!(store.read(created.id).await.unwrap(), read);

    let updated = store
        .update(created.id, Some("buy milk".into()), true)
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert!(store.read(created.id).await.unwrap().done);

    let removed = store.destroy(created.id).await.unwrap();
    assert_eq!(removed, updated);
    assert!(matches!(
        store.read(created.id).await,
        Err(ItemError::NotFound(_))
    ));
}

async fn check_paging(store: &ItemStore) {
    let builder = TestDataBuilder::from_test_name("paging");
    let items = seed(store, &builder, 25).await;
    let ids: Vec<i64> = items.iter().map(|i| i.id).collect();

    let page = |n| PageQuery::new(n, SortField::Id, SortDirection::Asc);

    let first = store.list_all(page(1)).await.unwrap();
    assert_eq!(first.iter().map(|i| i.id).collect::<Vec<_>>(), ids[..10]);

    let third = store.list_all(page(3)).await.unwrap();
    assert_eq!(third.iter().map(|i| i.id).collect::<Vec<_>>(), ids[20..]);

    assert_eq!(store.count_all().await.unwrap(), 25);
}

// ============================================================================
// SQLite
// ============================================================================

#[tokio::test]
async fn test_create_read_update_destroy() {
    let (_db, store) = sqlite_store().await;
    check_create_read_update_destroy(&store).await;
}

#[tokio::test]
async fn test_ids_are_unique() {
    let (_db, store) = sqlite_store().await;
    let builder = TestDataBuilder::from_test_name("ids_are_unique");

    let items = seed(&store, &builder, 5).await;
    let mut ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 5);
    assert_non_decreasing(&ids, "ids in creation order");
}

#[tokio::test]
async fn test_create_keeps_null_description() {
    let (_db, store) = sqlite_store().await;

    let item = store.create(None, true).await.unwrap();
    let read = store.read(item.id).await.unwrap();
    assert_eq!(read.description, None);
    assert!(read.done);
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let (_db, store) = sqlite_store().await;
    let builder = TestDataBuilder::from_test_name("missing_ids");
    seed(&store, &builder, 3).await;

    assert!(matches!(store.read(1000).await, Err(ItemError::NotFound(1000))));
    assert!(matches!(
        store.update(1000, None, false).await,
        Err(ItemError::NotFound(1000))
    ));
    assert!(matches!(
        store.destroy(1000).await,
        Err(ItemError::NotFound(1000))
    ));
    assert_eq!(store.count_all().await.unwrap(), 3);
}

#[tokio::test]
async fn test_paging_over_25_items() {
    let (_db, store) = sqlite_store().await;
    check_paging(&store).await;
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let (_db, store) = sqlite_store().await;
    let builder = TestDataBuilder::from_test_name("past_the_end");
    seed(&store, &builder, 4).await;

    let query = PageQuery::new(2, SortField::Id, SortDirection::Asc);
    assert!(store.list_all(query).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sort_directions() {
    let (_db, store) = sqlite_store().await;
    let builder = TestDataBuilder::from_test_name("sort_directions");
    seed(&store, &builder, 15).await;

    for page in 1..=2 {
        let asc = store
            .list_all(PageQuery::new(page, SortField::Id, SortDirection::Asc))
            .await
            .unwrap();
        assert!(asc.len() <= PAGE_SIZE as usize);
        let ids: Vec<i64> = asc.iter().map(|i| i.id).collect();
        assert_non_decreasing(&ids, "id asc");

        let desc = store
            .list_all(PageQuery::new(page, SortField::Id, SortDirection::Desc))
            .await
            .unwrap();
        let ids: Vec<i64> = desc.iter().map(|i| i.id).collect();
        assert_non_increasing(&ids, "id desc");
    }

    let by_description = store
        .list_all(PageQuery::new(1, SortField::Description, SortDirection::Desc))
        .await
        .unwrap();
    let descriptions: Vec<String> = by_description
        .into_iter()
        .map(|i| assert_some(i.description, "seeded description"))
        .collect();
    assert_non_increasing(&descriptions, "description desc");

    let by_done = store
        .list_all(PageQuery::new(1, SortField::Done, SortDirection::Asc))
        .await
        .unwrap();
    let flags: Vec<bool> = by_done.iter().map(|i| i.done).collect();
    assert_non_decreasing(&flags, "done asc");
}

#[tokio::test]
async fn test_count_matches_sum_of_pages() {
    let (_db, store) = sqlite_store().await;
    let builder = TestDataBuilder::from_test_name("count_matches_pages");
    seed(&store, &builder, 23).await;

    let mut total = 0;
    for page in 1..=4 {
        total += store
            .list_all(PageQuery::new(page, SortField::Done, SortDirection::Desc))
            .await
            .unwrap()
            .len() as u64;
    }
    assert_eq!(total, store.count_all().await.unwrap());
}

#[tokio::test]
async fn test_paging_is_stable_across_ties() {
    let (_db, store) = sqlite_store().await;
    for _ in 0..12 {
        store.create(Some("same".into()), false).await.unwrap();
    }

    let query = |n| PageQuery::new(n, SortField::Description, SortDirection::Asc);
    let mut ids: Vec<i64> = store.list_all(query(1)).await.unwrap().iter().map(|i| i.id).collect();
    ids.extend(store.list_all(query(2)).await.unwrap().iter().map(|i| i.id));

    assert_eq!(ids, (1..=12).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_null_done_written_elsewhere_reads_false() {
    let (db, store) = sqlite_store().await;
    db.connection
        .execute_unprepared("INSERT INTO item (description, done) VALUES ('legacy', NULL)")
        .await
        .unwrap();

    let items = store.list_all(PageQuery::default()).await.unwrap();
    assert_eq!(items.len(), 1);
    assert!(!items[0].done);
}

// ============================================================================
// PostgreSQL (Docker)
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn postgres_create_read_update_destroy() {
    let (db, store) = postgres_store().await;
    assert!(db.is_container());
    check_create_read_update_destroy(&store).await;
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn postgres_paging_over_25_items() {
    let (_db, store) = postgres_store().await;
    check_paging(&store).await;
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn postgres_concurrent_destroy_succeeds_once() {
    let (_db, store) = postgres_store().await;
    let item = store.create(Some("contended".into()), false).await.unwrap();

    let (a, b) = tokio::join!(store.destroy(item.id), store.destroy(item.id));
    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();

    assert_eq!(successes, 1);
    assert_eq!(store.count_all().await.unwrap(), 0);
}
