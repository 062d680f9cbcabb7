//! Entry points for running comparisons.

use tracing::debug;

use memberdiff_core::{Comparable, CompareConfig, MemberWalker};
use memberdiff_types::{CompareResult, DifferenceReport, Scalar};

/// A reusable, configured comparison entry point.
///
/// Each call runs on a fresh [`MemberWalker`], so one `Comparer` can be shared
/// freely between threads.
#[derive(Clone, Debug, Default)]
pub struct Comparer {
    config: CompareConfig,
}

impl Comparer {
    /// Create a comparer with the given configuration, rejecting invalid
    /// settings with [`CompareError::Config`](memberdiff_types::CompareError::Config).
    pub fn new(config: CompareConfig) -> CompareResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a comparer from a TOML configuration document.
    pub fn from_toml_str(source: &str) -> CompareResult<Self> {
        CompareConfig::from_toml_str(source).and_then(Self::new)
    }

    /// The active configuration.
    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare two values member by member.
    pub fn compare<T: Comparable>(&self, left: &T, right: &T) -> CompareResult<DifferenceReport> {
        let report = MemberWalker::new(self.config.clone()).compare(left, right)?;
        debug!(
            type_name = T::type_name(),
            differences = report.len(),
            "comparison finished"
        );
        Ok(report)
    }

    /// Compare two lists as multisets of structurally compared elements.
    pub fn reconcile_lists<V>(&self, left: &[V], right: &[V]) -> CompareResult<DifferenceReport>
    where
        V: Comparable + Scalar,
    {
        let report = MemberWalker::new(self.config.clone()).reconcile(left, right)?;
        debug!(
            element = V::type_name(),
            differences = report.len(),
            "list reconciliation finished"
        );
        Ok(report)
    }
}

/// Method-call form of [`crate::compare`], available on every [`Comparable`].
pub trait DeepCompare: Comparable {
    fn deep_compare(&self, other: &Self) -> CompareResult<DifferenceReport> {
        memberdiff_core::compare(self, other)
    }

    fn deep_compare_with(&self, other: &Self, comparer: &Comparer) -> CompareResult<DifferenceReport> {
        comparer.compare(self, other)
    }
}

impl<T: Comparable> DeepCompare for T {}

/// Method-call form of [`crate::reconcile_lists`] for slices.
pub trait SliceDeepCompare<V> {
    fn reconcile_with(&self, other: &[V]) -> CompareResult<DifferenceReport>;
}

impl<V: Comparable + Scalar> SliceDeepCompare<V> for [V] {
    fn reconcile_with(&self, other: &[V]) -> CompareResult<DifferenceReport> {
        memberdiff_core::reconcile_lists(self, other)
    }
}
