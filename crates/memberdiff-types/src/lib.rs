//! Foundation types for memberdiff.
//!
//! This crate provides the report model produced by a structural comparison
//! and the error type shared by every memberdiff crate.
//!
//! # Key Types
//!
//! - [`DifferenceRecord`] — One observed inequality at one member
//! - [`DifferenceReport`] — Ordered list of records, in traversal order
//! - [`Value`] — Type-erased snapshot of a compared value (`null`, scalar, or sequence)
//! - [`Reportable`] / [`Scalar`] — Capabilities a value needs to appear in a report
//! - [`CompareError`] — Contract violations raised during a comparison

pub mod error;
pub mod record;
pub mod value;

pub use error::{CompareError, CompareResult};
pub use record::{DifferenceRecord, DifferenceReport};
pub use value::{Reportable, Scalar, Value};
