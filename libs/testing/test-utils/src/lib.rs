//! Shared test utilities for the estimation crates
//!
//! - `TestDataBuilder`: deterministic identifiers, ARNs and names
//! - `PriceDocumentBuilder`: AWS bulk price-list JSON for catalog tests
//! - `assertions`: custom assertion helpers
//!
//! # Usage
//!
//! ```
//! use test_utils::{PriceDocumentBuilder, TestDataBuilder};
//!
//! let builder = TestDataBuilder::from_test_name("my_test");
//! let arn = builder.arn("ec2", "instance");
//!
//! let document = PriceDocumentBuilder::new("AmazonEC2")
//!     .product("Compute Instance", &[("instanceType", "t3.micro")], "Hrs", 0.0104)
//!     .build();
//! assert!(!document.is_empty());
//! ```

mod fixtures;

pub use fixtures::PriceDocumentBuilder;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by deriving everything from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_batch_correlation");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A stable resource identifier, e.g. `res-1a2b3c4d-main`.
    pub fn resource_id(&self, suffix: &str) -> String {
        format!("res-{:08x}-{}", self.seed as u32, suffix)
    }

    /// A provider-native locator shaped like an AWS ARN.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let arn = TestDataBuilder::new(7).arn("ec2", "instance");
    /// assert!(arn.starts_with("arn:aws:ec2:us-east-1:"));
    /// ```
    pub fn arn(&self, service: &str, kind: &str) -> String {
        format!(
            "arn:aws:{}:us-east-1:{:012}:{}/{}-{:x}",
            service,
            self.seed % 1_000_000_000_000,
            kind,
            kind,
            self.seed
        )
    }

    /// Generate a unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(42);
    /// assert_eq!(builder.name("web", "primary"), "test-web-42-primary");
    /// ```
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

    /// Assert two floats agree within an absolute tolerance.
    pub fn assert_approx_eq(actual: f64, expected: f64, tolerance: f64, context: &str) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "{}: expected {} (±{}), got {}",
            context,
            expected,
            tolerance,
            actual
        );
    }

    /// Assert that `haystack` contains `needle`, printing both on failure.
    pub fn assert_contains(haystack: &str, needle: &str, context: &str) {
        assert!(
            haystack.contains(needle),
            "{}: expected {:?} to contain {:?}",
            context,
            haystack,
            needle
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.resource_id("a"), builder2.resource_id("a"));
        assert_eq!(builder1.arn("s3", "bucket"), builder2.arn("s3", "bucket"));
        assert_eq!(builder1.name("project", "test"), builder2.name("project", "test"));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.resource_id("x"), builder2.resource_id("x"));
    }

    #[test]
    #[should_panic(expected = "expected 1")]
    fn test_assert_approx_eq_reports_expected_value() {
        assertions::assert_approx_eq(1.5, 1.0, 0.1, "approx");
    }
}
