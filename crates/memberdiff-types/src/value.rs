//! Type-erased snapshots of compared values.
//!
//! A [`DifferenceRecord`](crate::DifferenceRecord) has to carry the two values
//! it reports on regardless of their concrete type. [`Value`] holds an owned
//! copy behind a [`Reportable`] trait object, which keeps just enough of the
//! original type to render it and test it for equality.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A value that can be carried inside a difference report.
///
/// Implemented for every `Debug + PartialEq + Send + Sync + 'static` type, so
/// user code never implements it by hand.
pub trait Reportable: fmt::Debug + Send + Sync + 'static {
    /// Upcast for downcasting back to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Value equality against another reportable. Values of different
    /// concrete types are never equal.
    fn eq_reportable(&self, other: &dyn Reportable) -> bool;
}

impl<T> Reportable for T
where
    T: fmt::Debug + PartialEq + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_reportable(&self, other: &dyn Reportable) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// A member value that is compared by plain value equality and copied into
/// the report when it differs.
pub trait Scalar: Reportable + PartialEq + Clone {}

impl<T> Scalar for T where T: Reportable + PartialEq + Clone {}

/// Owned snapshot of one side of a difference.
#[derive(Clone)]
pub enum Value {
    /// An absent value (`None` on an optional member).
    Null,
    /// A single value.
    Scalar(Arc<dyn Reportable>),
    /// An ordered collection of values, e.g. the leftovers of a reconciliation.
    Sequence(Vec<Value>),
}

impl Value {
    /// Snapshot a value by cloning it.
    pub fn of<V: Scalar>(value: &V) -> Self {
        Self::Scalar(Arc::new(value.clone()))
    }

    /// Snapshot an owned value without cloning.
    pub fn owned<V: Reportable>(value: V) -> Self {
        Self::Scalar(Arc::new(value))
    }

    /// Snapshot an optional value, mapping `None` to [`Value::Null`].
    pub fn optional<V: Scalar>(value: Option<&V>) -> Self {
        value.map_or(Self::Null, Self::of)
    }

    /// Snapshot every element of a slice into a [`Value::Sequence`].
    pub fn sequence<V: Scalar>(values: &[V]) -> Self {
        Self::Sequence(values.iter().map(Self::of).collect())
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The elements, if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Downcast a scalar back to its concrete type.
    pub fn downcast_ref<V: 'static>(&self) -> Option<&V> {
        match self {
            Self::Scalar(inner) => inner.as_any().downcast_ref::<V>(),
            _ => None,
        }
    }

    /// Returns `true` if this is a scalar equal to `expected`.
    pub fn is<V: Reportable + PartialEq>(&self, expected: &V) -> bool {
        self.downcast_ref::<V>() == Some(expected)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Scalar(a), Self::Scalar(b)) => a.eq_reportable(b.as_ref()),
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Scalar(inner) => fmt::Debug::fmt(inner, f),
            Self::Sequence(items) => f.debug_list().entries(items).finish(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl<V: Scalar> From<Option<V>> for Value {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Null, Self::owned)
    }
}
