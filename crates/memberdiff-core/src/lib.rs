//! Comparison engine for memberdiff.
//!
//! Walks the registered members of two values of the same type and reports
//! every member that differs. Collection members are diffed as multisets:
//! elements are paired greedily by recursive structural equality, and whatever
//! cannot be paired is reported as one record per collection.
//!
//! # Key Types
//!
//! - [`Comparable`] / [`Members`] / [`Member`] -- Per-type description of comparable members
//! - [`MemberWalker`] -- Recursive member traversal
//! - [`CollectionReconciler`] -- Greedy multiset reconciliation of two slices
//! - [`CompareConfig`] / [`Attribution`] -- Naming, depth and cycle settings

pub mod config;
pub mod member;
pub mod reconcile;
pub mod walker;

pub use config::{Attribution, CompareConfig};
pub use member::{short_type_name, Comparable, Member, MemberKind, Members};
pub use reconcile::CollectionReconciler;
pub use walker::MemberWalker;

pub use memberdiff_types::{
    CompareError, CompareResult, DifferenceRecord, DifferenceReport, Reportable, Scalar, Value,
};

/// Compare two values with the default configuration.
pub fn compare<T: Comparable>(left: &T, right: &T) -> CompareResult<DifferenceReport> {
    MemberWalker::new(CompareConfig::default()).compare(left, right)
}

/// Reconcile two slices as multisets with the default configuration.
pub fn reconcile_lists<V>(left: &[V], right: &[V]) -> CompareResult<DifferenceReport>
where
    V: Comparable + Scalar,
{
    MemberWalker::new(CompareConfig::default()).reconcile(left, right)
}
