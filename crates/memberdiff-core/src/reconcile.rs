//! Multiset reconciliation of two collections.
//!
//! Elements are paired greedily: each left element consumes the first
//! not-yet-consumed right element it matches. Duplicates are tracked per
//! occurrence through an index-based consumed flag, so element types need not
//! be hashable. Whatever remains unpaired on either side is reported as a
//! single record carrying both leftover collections.
//!
//! Greedy first-match pairing does not search for an optimal assignment. It
//! answers whether every element has a counterpart, which is all the report
//! needs.
//!
//! The same slice on both sides, or slices equal under `PartialEq`, produce an
//! empty report without walking any element. Element `PartialEq` therefore has
//! to terminate; on cyclic graphs compare by key or identity instead of
//! deriving it.

use tracing::debug;

use memberdiff_types::{CompareResult, DifferenceRecord, DifferenceReport, Scalar, Value};

use crate::member::{short_type_name, Comparable};
use crate::walker::MemberWalker;

/// Reconciles two slices using a [`MemberWalker`] as the element equality
/// test.
pub struct CollectionReconciler<'w> {
    walker: &'w mut MemberWalker,
}

impl<'w> CollectionReconciler<'w> {
    pub fn new(walker: &'w mut MemberWalker) -> Self {
        Self { walker }
    }

    /// Reconcile comparable elements. Two elements match when walking them
    /// yields an empty report. The record is named after the element type.
    pub fn reconcile<V>(&mut self, left: &[V], right: &[V]) -> CompareResult<DifferenceReport>
    where
        V: Comparable + Scalar,
    {
        self.reconcile_named(V::type_name().to_owned(), left, right)
    }

    /// Reconcile plain values, matching by value equality.
    pub fn reconcile_values<V: Scalar>(
        &mut self,
        left: &[V],
        right: &[V],
    ) -> CompareResult<DifferenceReport> {
        self.reconcile_values_named(short_type_name::<V>().to_owned(), left, right)
    }

    pub(crate) fn reconcile_named<V>(
        &mut self,
        name: String,
        left: &[V],
        right: &[V],
    ) -> CompareResult<DifferenceReport>
    where
        V: Comparable + Scalar,
    {
        self.reconcile_by(name, left, right, |walker, x, y| {
            Ok(walker.walk(x, y)?.is_empty())
        })
    }

    pub(crate) fn reconcile_values_named<V: Scalar>(
        &mut self,
        name: String,
        left: &[V],
        right: &[V],
    ) -> CompareResult<DifferenceReport> {
        self.reconcile_by(name, left, right, |_, x, y| Ok(x == y))
    }

    fn reconcile_by<V, F>(
        &mut self,
        name: String,
        left: &[V],
        right: &[V],
        mut matches: F,
    ) -> CompareResult<DifferenceReport>
    where
        V: Scalar,
        F: FnMut(&mut MemberWalker, &V, &V) -> CompareResult<bool>,
    {
        let mut report = DifferenceReport::new();

        if std::ptr::eq(left, right) || left == right {
            debug!(element = %name, len = left.len(), "sequences equal element-wise");
            return Ok(report);
        }

        let mut consumed = vec![false; right.len()];
        let mut left_over = Vec::new();

        for x in left {
            let mut paired = None;
            for (j, y) in right.iter().enumerate() {
                if consumed[j] {
                    continue;
                }
                if matches(&mut *self.walker, x, y)? {
                    paired = Some(j);
                    break;
                }
            }
            match paired {
                Some(j) => consumed[j] = true,
                None => left_over.push(Value::of(x)),
            }
        }

        let right_over: Vec<Value> = right
            .iter()
            .zip(&consumed)
            .filter(|(_, used)| !**used)
            .map(|(y, _)| Value::of(y))
            .collect();

        debug!(
            element = %name,
            left_len = left.len(),
            right_len = right.len(),
            left_unmatched = left_over.len(),
            right_unmatched = right_over.len(),
            "sequences reconciled"
        );

        if !left_over.is_empty() || !right_over.is_empty() {
            report.push(DifferenceRecord::new(
                name,
                Value::Sequence(left_over),
                Value::Sequence(right_over),
            ));
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::config::CompareConfig;
    use crate::member::Members;

    #[derive(Clone, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Comparable for Point {
        fn describe(members: &mut Members<Self>) {
            members.scalar("x", |p| &p.x);
            members.scalar("y", |p| &p.y);
        }
    }

    fn p(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    fn reconcile(left: &[Point], right: &[Point]) -> DifferenceReport {
        MemberWalker::new(CompareConfig::default())
            .reconcile(left, right)
            .unwrap()
    }

    fn leftovers(report: &DifferenceReport) -> (Vec<Value>, Vec<Value>) {
        assert_eq!(report.len(), 1, "expected exactly one record: {report}");
        let record = &report.records()[0];
        (
            record.left().as_sequence().unwrap_or_default().to_vec(),
            record.right().as_sequence().unwrap_or_default().to_vec(),
        )
    }

    #[test]
    fn equal_sequences_are_empty() {
        assert!(reconcile(&[p(1, 1), p(2, 2)], &[p(1, 1), p(2, 2)]).is_empty());
        assert!(reconcile(&[], &[]).is_empty());
    }

    #[test]
    fn order_is_ignored() {
        assert!(reconcile(&[p(1, 1), p(2, 2)], &[p(2, 2), p(1, 1)]).is_empty());
    }

    #[test]
    fn duplicates_are_counted() {
        let a = p(1, 1);
        let b = p(2, 2);
        let report = reconcile(&[a.clone(), a.clone(), b.clone()], &[a.clone(), b.clone(), b.clone()]);
        let (left, right) = leftovers(&report);
        assert_eq!(left, vec![Value::of(&a)]);
        assert_eq!(right, vec![Value::of(&b)]);
    }

    #[test]
    fn surplus_on_right() {
        let report = reconcile(&[p(1, 1)], &[p(1, 1), p(2, 2)]);
        let (left, right) = leftovers(&report);
        assert!(left.is_empty());
        assert_eq!(right, vec![Value::of(&p(2, 2))]);
        assert_eq!(report.records()[0].member_name(), "Point");
    }

    #[test]
    fn one_side_empty() {
        let report = reconcile(&[p(1, 1), p(1, 1)], &[]);
        let (left, right) = leftovers(&report);
        assert_eq!(left.len(), 2);
        assert!(right.is_empty());
    }

    #[test]
    fn unmatched_pairs_are_not_diffed_field_by_field() {
        let report = reconcile(&[p(1, 1)], &[p(1, 2)]);
        assert_eq!(report.len(), 1);
        assert_eq!(report.records()[0].member_name(), "Point");
        assert_eq!(report.to_string(), "Point: [Point { x: 1, y: 1 }] != [Point { x: 1, y: 2 }]");
    }

    #[test]
    fn inputs_are_untouched() {
        let left = vec![p(1, 1), p(3, 3)];
        let right = vec![p(3, 3), p(4, 4)];
        let _ = reconcile(&left, &right);
        assert_eq!(left, vec![p(1, 1), p(3, 3)]);
        assert_eq!(right, vec![p(3, 3), p(4, 4)]);
    }

    #[test]
    fn plain_values_match_by_equality() {
        let mut walker = MemberWalker::new(CompareConfig::default());
        let mut reconciler = CollectionReconciler::new(&mut walker);

        let left = ["a".to_string(), "b".to_string(), "b".to_string()];
        let right = ["b".to_string(), "a".to_string(), "c".to_string()];
        let report = reconciler.reconcile_values(&left, &right).unwrap();

        let (l, r) = leftovers(&report);
        assert_eq!(report.records()[0].member_name(), "String");
        assert_eq!(l, vec![Value::of(&"b".to_string())]);
        assert_eq!(r, vec![Value::of(&"c".to_string())]);
    }

    // Elements that compare structurally equal while differing in an
    // excluded member: they pair up, but the fast path does not apply.
    #[derive(Clone, Debug, PartialEq)]
    struct Tagged {
        key: u8,
        note: &'static str,
    }

    impl Comparable for Tagged {
        fn describe(members: &mut Members<Self>) {
            members.scalar("key", |t| &t.key);
            members.scalar("note", |t| &t.note).excluded();
        }
    }

    #[test]
    fn pairs_by_structure_not_value_equality() {
        let left = [Tagged { key: 1, note: "x" }];
        let right = [Tagged { key: 1, note: "y" }];
        let report = MemberWalker::new(CompareConfig::default())
            .reconcile(&left, &right)
            .unwrap();
        assert!(report.is_empty());
    }

    static PROBES: AtomicUsize = AtomicUsize::new(0);

    #[derive(Clone, Debug, PartialEq)]
    struct Counted(u32);

    impl Counted {
        fn probed(&self) -> u32 {
            PROBES.fetch_add(1, Ordering::SeqCst);
            self.0
        }
    }

    impl Comparable for Counted {
        fn describe(members: &mut Members<Self>) {
            members.computed("value", Counted::probed);
        }
    }

    #[test]
    fn fast_path_skips_nested_comparison() {
        let items = vec![Counted(1), Counted(2), Counted(2)];
        let mut walker = MemberWalker::new(CompareConfig::default());

        let before = PROBES.load(Ordering::SeqCst);
        assert!(walker.reconcile(&items, &items.clone()).unwrap().is_empty());
        assert_eq!(PROBES.load(Ordering::SeqCst), before);

        let reversed: Vec<_> = items.iter().rev().cloned().collect();
        assert!(walker.reconcile(&items, &reversed).unwrap().is_empty());
        assert!(PROBES.load(Ordering::SeqCst) > before);
    }

    #[test]
    fn member_path_naming_for_collection_members() {
        struct Polygon {
            vertices: Vec<Point>,
        }

        impl Comparable for Polygon {
            fn describe(members: &mut Members<Self>) {
                members.sequence("vertices", |poly| poly.vertices.as_slice());
            }
        }

        let left = Polygon {
            vertices: vec![p(0, 0), p(1, 0)],
        };
        let right = Polygon {
            vertices: vec![p(0, 0), p(0, 1)],
        };

        let legacy = MemberWalker::new(CompareConfig::default())
            .compare(&left, &right)
            .unwrap();
        assert_eq!(legacy.member_names(), vec!["Point"]);

        let pathed = MemberWalker::new(CompareConfig::with_paths())
            .compare(&left, &right)
            .unwrap();
        assert_eq!(pathed.member_names(), vec!["vertices"]);
    }
}
