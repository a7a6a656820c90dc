//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: in-memory SQLite or a PostgreSQL container (feature: "postgres")
//! - `TestDataBuilder`: deterministic test data generation
//! - `assertions`: ordering and option helpers
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_store_test() {
//!     let db = TestDatabase::in_memory().await;
//!     let builder = TestDataBuilder::from_test_name("my_store_test");
//!
//!     let description = builder.description("groceries", 1);
//!     let done = builder.done(1);
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic variation
///
/// The same seed always yields the same values, so failing tests are reproducible.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name, the usual way to build one.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_item");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Item description unique within the test.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.description("chore", 3), "test-chore-7-3");
    /// ```
    pub fn description(&self, prefix: &str, n: usize) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, n)
    }

    /// Deterministic done flag for the `n`th item.
    pub fn done(&self, n: usize) -> bool {
        (self.seed.wrapping_add(n as u64)) % 2 == 0
    }
}

/// Test assertion helpers
pub mod assertions {
    use std::fmt::Debug;

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `values` never decreases
    pub fn assert_non_decreasing<T: PartialOrd + Debug>(values: &[T], context: &str) {
        for pair in values.windows(2) {
            assert!(
                pair[0] <= pair[1],
                "{}: {:?} comes before {:?} in {:?}",
                context,
                pair[0],
                pair[1],
                values
            );
        }
    }

    /// Assert that `values` never increases
    pub fn assert_non_increasing<T: PartialOrd + Debug>(values: &[T], context: &str) {
        for pair in values.windows(2) {
            assert!(
                pair[0] >= pair[1],
                "{}: {:?} comes before {:?} in {:?}",
                context,
                pair[0],
                pair[1],
                values
            );
        }
    }
}
