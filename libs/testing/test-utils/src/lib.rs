//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic product fixtures
//! - `assertions`: envelope assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!     let code = builder.product_code("main");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// Values derive from a seed so reruns of the same test see the same data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name, so parallel tests against one database don't collide
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Unique product code, e.g. `P-12345-main`
    pub fn product_code(&self, suffix: &str) -> String {
        format!("P-{}-{}", self.seed, suffix)
    }

    /// Unique product name, e.g. `test-widget-12345-main`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert a JSON failure envelope: `success` is false and `message` matches.
    pub fn assert_failure(body: &serde_json::Value, expected_message: &str) {
        assert_eq!(body["success"], false, "expected failure envelope, got {}", body);
        assert_eq!(
            body["message"], expected_message,
            "unexpected failure message in {}",
            body
        );
    }

    /// Assert a JSON success envelope and return its `data` member.
    pub fn assert_success(body: &serde_json::Value) -> &serde_json::Value {
        assert_eq!(body["success"], true, "expected success envelope, got {}", body);
        &body["data"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.product_code("a"), builder2.product_code("a"));
        assert_eq!(
            builder1.name("widget", "test"),
            builder2.name("widget", "test")
        );
    }

    #[test]
    fn test_assert_failure_matches_envelope() {
        let body = serde_json::json!({"success": false, "message": "Product not found with id: 7"});
        assertions::assert_failure(&body, "Product not found with id: 7");
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.product_code("x"), builder2.product_code("x"));
    }
}
