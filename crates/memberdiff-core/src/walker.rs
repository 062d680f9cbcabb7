//! Member-level traversal.
//!
//! [`MemberWalker`] visits the registered members of two values, appends a
//! record for every member that differs and recurses into nested values.
//! Collection members are handed to the [`CollectionReconciler`], which in
//! turn calls back into the walker to test element pairs.
//!
//! # Invariants
//!
//! - Excluded members are skipped before either side's accessor runs.
//! - The inputs are only ever borrowed immutably.
//! - A pair of values that is reached again while it is still being walked
//!   is a cycle and aborts the comparison. Collections that are equal
//!   element-wise are accepted through `PartialEq` without a walk, so that
//!   guard only covers sequence elements whose `PartialEq` terminates.
//! - A value is always equal to itself: scalars at the same address are not
//!   compared, which keeps `f64::NAN` members reflexive.
//! - Each type's member list is built once per walker.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::trace;

use memberdiff_types::{
    CompareError, CompareResult, DifferenceRecord, DifferenceReport, Scalar, Value,
};

use crate::config::{Attribution, CompareConfig};
use crate::member::{short_type_name, Comparable, Members};
use crate::reconcile::CollectionReconciler;

/// Identity of a pair under comparison: both addresses plus the type, since a
/// struct and its first field share an address.
type PairKey = (usize, usize, TypeId);

/// Recursive member traversal for one comparison.
///
/// A walker holds per-call state (current path, depth, active pairs) and is
/// cheap to create; use one per top-level comparison.
///
/// The configuration is validated on every [`compare`](Self::compare) and
/// [`reconcile`](Self::reconcile) call.
#[derive(Debug)]
pub struct MemberWalker {
    config: CompareConfig,
    report: DifferenceReport,
    path: Vec<&'static str>,
    depth: usize,
    active: HashSet<PairKey>,
    registry: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl MemberWalker {
    pub fn new(config: CompareConfig) -> Self {
        Self {
            config,
            report: DifferenceReport::new(),
            path: Vec::new(),
            depth: 0,
            active: HashSet::new(),
            registry: HashMap::new(),
        }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare every registered member of `left` and `right`.
    pub fn compare<T: Comparable>(&mut self, left: &T, right: &T) -> CompareResult<DifferenceReport> {
        self.config.validate()?;
        self.walk(left, right)
    }

    /// Reconcile two slices of comparable elements as multisets. The record,
    /// if any, is named after the element type.
    pub fn reconcile<V>(&mut self, left: &[V], right: &[V]) -> CompareResult<DifferenceReport>
    where
        V: Comparable + Scalar,
    {
        self.config.validate()?;
        CollectionReconciler::new(self).reconcile(left, right)
    }

    /// Walk one pair into a fresh report, leaving the caller's report intact.
    pub(crate) fn walk<T: Comparable>(&mut self, left: &T, right: &T) -> CompareResult<DifferenceReport> {
        if self.depth >= self.config.max_depth {
            return Err(CompareError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }

        let key: PairKey = (
            left as *const T as usize,
            right as *const T as usize,
            TypeId::of::<T>(),
        );
        if self.config.detect_cycles && !self.active.insert(key) {
            return Err(CompareError::CycleDetected {
                type_name: T::type_name().to_owned(),
            });
        }

        self.depth += 1;
        let outer = std::mem::take(&mut self.report);
        let result = self.walk_members(left, right);
        let inner = std::mem::replace(&mut self.report, outer);
        self.depth -= 1;
        if self.config.detect_cycles {
            self.active.remove(&key);
        }

        result.map(|()| inner)
    }

    fn walk_members<T: Comparable>(&mut self, left: &T, right: &T) -> CompareResult<()> {
        let members = self.members_of::<T>();
        for member in members.iter() {
            if member.is_excluded() {
                trace!(member = member.name(), "skipping excluded member");
                continue;
            }
            member.probe(left, right, self)?;
        }
        Ok(())
    }

    /// Registered members of `T`, described on first use.
    fn members_of<T: Comparable>(&mut self) -> Arc<Members<T>> {
        let cached = self
            .registry
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(T::members()) as Arc<dyn Any + Send + Sync>);
        Arc::clone(cached)
            .downcast::<Members<T>>()
            .unwrap_or_else(|_| Arc::new(T::members()))
    }

    pub(crate) fn scalar<V: Scalar>(&mut self, name: &str, left: Option<&V>, right: Option<&V>) {
        let same = match (left, right) {
            (Some(l), Some(r)) => std::ptr::eq(l, r) || l == r,
            (l, r) => l == r,
        };
        if !same {
            self.record(name, Value::optional(left), Value::optional(right));
        }
    }

    pub(crate) fn owned_scalar<V: Scalar>(&mut self, name: &str, left: V, right: V) {
        if left != right {
            self.record(name, Value::owned(left), Value::owned(right));
        }
    }

    pub(crate) fn nested<V: Comparable>(&mut self, name: &'static str, left: &V, right: &V) -> CompareResult<()> {
        self.path.push(name);
        let result = self.walk(left, right);
        self.path.pop();
        self.report.extend(result?);
        Ok(())
    }

    pub(crate) fn optional_nested<V: Comparable + Scalar>(
        &mut self,
        name: &'static str,
        left: Option<&V>,
        right: Option<&V>,
    ) -> CompareResult<()> {
        match (left, right) {
            (Some(l), Some(r)) => self.nested(name, l, r),
            (None, None) => Ok(()),
            (l, r) => {
                self.record(name, Value::optional(l), Value::optional(r));
                Ok(())
            }
        }
    }

    pub(crate) fn sequence<V: Comparable + Scalar>(
        &mut self,
        name: &str,
        left: Option<&[V]>,
        right: Option<&[V]>,
    ) -> CompareResult<()> {
        match (left, right) {
            (Some(l), Some(r)) => {
                let record_name = self.collection_record_name(name, V::type_name());
                let report = CollectionReconciler::new(self).reconcile_named(record_name, l, r)?;
                self.report.extend(report);
                Ok(())
            }
            (None, None) => Ok(()),
            (l, r) => {
                self.record(name, optional_sequence(l), optional_sequence(r));
                Ok(())
            }
        }
    }

    pub(crate) fn values<V: Scalar>(&mut self, name: &str, left: &[V], right: &[V]) -> CompareResult<()> {
        let record_name = self.collection_record_name(name, short_type_name::<V>());
        let report = CollectionReconciler::new(self).reconcile_values_named(record_name, left, right)?;
        self.report.extend(report);
        Ok(())
    }

    fn record(&mut self, member: &str, left: Value, right: Value) {
        let name = self.member_path(member);
        trace!(member = %name, %left, %right, "member differs");
        self.report.push(DifferenceRecord::new(name, left, right));
    }

    fn member_path(&self, member: &str) -> String {
        match self.config.attribution {
            Attribution::ElementType => member.to_owned(),
            Attribution::MemberPath => {
                let mut path = self.path.join(".");
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(member);
                path
            }
        }
    }

    fn collection_record_name(&self, member: &str, element_type: &str) -> String {
        match self.config.attribution {
            Attribution::ElementType => element_type.to_owned(),
            Attribution::MemberPath => self.member_path(member),
        }
    }
}

fn optional_sequence<V: Scalar>(values: Option<&[V]>) -> Value {
    values.map_or(Value::Null, Value::sequence)
}
