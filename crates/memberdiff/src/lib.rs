//! Structural comparison reports for tests and debugging.
//!
//! `memberdiff` compares two values of the same type member by member and
//! returns a [`DifferenceReport`] describing what changed, instead of a bare
//! `bool`. Collections are compared as multisets, so element order does not
//! matter while duplicates still count.
//!
//! ```
//! use memberdiff::{Comparable, DeepCompare, Members};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Comparable for Point {
//!     fn describe(members: &mut Members<Self>) {
//!         members.scalar("x", |p| &p.x);
//!         members.scalar("y", |p| &p.y);
//!     }
//! }
//!
//! let report = Point { x: 1, y: 2 }.deep_compare(&Point { x: 1, y: 3 }).unwrap();
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.render_lines().unwrap(), vec!["y: 2 != 3"]);
//!
//! memberdiff::assert_no_differences!(Point { x: 1, y: 2 }, Point { x: 1, y: 2 });
//! ```

pub mod comparer;
mod macros;

pub use comparer::{Comparer, DeepCompare, SliceDeepCompare};

// Re-export key types
pub use memberdiff_core::{
    compare, reconcile_lists, short_type_name, Attribution, CollectionReconciler, Comparable,
    CompareConfig, Member, MemberKind, MemberWalker, Members,
};
pub use memberdiff_types::{
    CompareError, CompareResult, DifferenceRecord, DifferenceReport, Reportable, Scalar, Value,
};
