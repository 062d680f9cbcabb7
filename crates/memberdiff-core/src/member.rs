//! Per-type description of comparable members.
//!
//! A type opts into structural comparison by implementing [`Comparable`] and
//! registering one accessor per member in [`Comparable::describe`]. The kind of
//! accessor decides how the member is compared:
//!
//! | Registration | Compared by |
//! |--------------|-------------|
//! | [`Members::scalar`], [`Members::optional`] | value equality |
//! | [`Members::computed`], [`Members::fallible`] | value equality of the returned value |
//! | [`Members::nested`], [`Members::optional_nested`] | recursive member walk |
//! | [`Members::sequence`], [`Members::optional_sequence`] | multiset reconciliation by member walk |
//! | [`Members::values`] | multiset reconciliation by value equality |
//!
//! Strings are registered as scalars and are therefore never decomposed into
//! characters.
//!
//! ```
//! use memberdiff_core::{Comparable, Members};
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
//! let report = memberdiff_core::compare(&Point { x: 1, y: 2 }, &Point { x: 1, y: 3 }).unwrap();
//! assert_eq!(report.to_string(), "y: 2 != 3");
//! ```

use std::fmt;

use memberdiff_types::{CompareError, CompareResult, Scalar};

use crate::walker::MemberWalker;

/// A type whose members can be compared structurally.
pub trait Comparable: Sized + 'static {
    /// Register every comparable member, in comparison order.
    fn describe(members: &mut Members<Self>);

    /// Name used for collection records of this element type.
    fn type_name() -> &'static str {
        short_type_name::<Self>()
    }

    /// The registered members.
    fn members() -> Members<Self> {
        let mut members = Members::new();
        Self::describe(&mut members);
        members
    }
}

/// Rust type name without module path or generic arguments:
/// `shop::order::Line<u32>` becomes `Line`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// How a member is compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberKind {
    /// Stored value compared by equality.
    Scalar,
    /// Value produced by a zero-argument accessor, compared by equality.
    Computed,
    /// Comparable value walked recursively.
    Nested,
    /// Collection reconciled as a multiset.
    Sequence,
}

type Probe<T> = Box<dyn Fn(&T, &T, &mut MemberWalker) -> CompareResult<()> + Send + Sync>;

/// One registered member: name, kind, exclusion flag and accessor.
pub struct Member<T> {
    name: &'static str,
    kind: MemberKind,
    excluded: bool,
    probe: Probe<T>,
}

impl<T> Member<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    /// Skip this member in every comparison. Its accessor is never called.
    pub fn excluded(&mut self) -> &mut Self {
        self.excluded = true;
        self
    }

    pub(crate) fn probe(&self, left: &T, right: &T, walker: &mut MemberWalker) -> CompareResult<()> {
        (self.probe)(left, right, walker)
    }
}

impl<T> fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("excluded", &self.excluded)
            .finish()
    }
}

/// The ordered member list of a [`Comparable`] type.
pub struct Members<T> {
    members: Vec<Member<T>>,
}

impl<T> Default for Members<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Members<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.members).finish()
    }
}

impl<T: 'static> Members<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Member<T>> {
        self.members.iter()
    }

    /// Look up a member by name.
    pub fn get(&self, name: &str) -> Option<&Member<T>> {
        self.members.iter().find(|m| m.name == name)
    }

    /// A stored field compared by equality.
    pub fn scalar<V: Scalar>(&mut self, name: &'static str, get: fn(&T) -> &V) -> &mut Member<T> {
        self.push(
            name,
            MemberKind::Scalar,
            Box::new(move |left: &T, right: &T, walker: &mut MemberWalker| {
                walker.scalar(name, Some(get(left)), Some(get(right)));
                Ok(())
            }),
        )
    }

    /// An optional field; `None` on both sides is equal.
    pub fn optional<V: Scalar>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> Option<&V>,
    ) -> &mut Member<T> {
        self.push(
            name,
            MemberKind::Scalar,
            Box::new(move |left: &T, right: &T, walker: &mut MemberWalker| {
                walker.scalar(name, get(left), get(right));
                Ok(())
            }),
        )
    }

    /// A zero-argument accessor returning an owned value.
    pub fn computed<V: Scalar>(&mut self, name: &'static str, get: fn(&T) -> V) -> &mut Member<T> {
        self.push(
            name,
            MemberKind::Computed,
            Box::new(move |left: &T, right: &T, walker: &mut MemberWalker| {
                walker.owned_scalar(name, get(left), get(right));
                Ok(())
            }),
        )
    }

    /// A zero-argument accessor that can fail. A failure aborts the whole
    /// comparison with [`CompareError::Getter`].
    pub fn fallible<V, E>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> Result<V, E>,
    ) -> &mut Member<T>
    where
        V: Scalar,
        E: fmt::Display + 'static,
    {
        self.push(
            name,
            MemberKind::Computed,
            Box::new(move |left: &T, right: &T, walker: &mut MemberWalker| {
                let l = get(left).map_err(|e| CompareError::getter(name, e))?;
                let r = get(right).map_err(|e| CompareError::getter(name, e))?;
                walker.owned_scalar(name, l, r);
                Ok(())
            }),
        )
    }

    /// A nested comparable value, walked recursively.
    pub fn nested<V: Comparable>(&mut self, name: &'static str, get: fn(&T) -> &V) -> &mut Member<T> {
        self.push(
            name,
            MemberKind::Nested,
            Box::new(move |left: &T, right: &T, walker: &mut MemberWalker| {
                walker.nested(name, get(left), get(right))
            }),
        )
    }

    /// An optional nested value. Present on both sides: walked recursively.
    /// Present on one side only: reported as a single record.
    pub fn optional_nested<V: Comparable + Scalar>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> Option<&V>,
    ) -> &mut Member<T> {
        self.push(
            name,
            MemberKind::Nested,
            Box::new(move |left: &T, right: &T, walker: &mut MemberWalker| {
                walker.optional_nested(name, get(left), get(right))
            }),
        )
    }

    /// A collection of comparable elements, reconciled as a multiset.
    ///
    /// Element-wise equal collections are accepted through the element's
    /// `PartialEq` before any element is walked, so that `PartialEq` must
    /// terminate: on cyclic element graphs compare by identity or key rather
    /// than deriving it.
    pub fn sequence<V: Comparable + Scalar>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &[V],
    ) -> &mut Member<T> {
        self.push(
            name,
            MemberKind::Sequence,
            Box::new(move |left: &T, right: &T, walker: &mut MemberWalker| {
                walker.sequence(name, Some(get(left)), Some(get(right)))
            }),
        )
    }

    /// An optional collection. Reconciled when present on both sides.
    pub fn optional_sequence<V: Comparable + Scalar>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> Option<&[V]>,
    ) -> &mut Member<T> {
        self.push(
            name,
            MemberKind::Sequence,
            Box::new(move |left: &T, right: &T, walker: &mut MemberWalker| {
                walker.sequence(name, get(left), get(right))
            }),
        )
    }

    /// A collection of plain values, reconciled as a multiset using value
    /// equality as the matching test.
    pub fn values<V: Scalar>(&mut self, name: &'static str, get: fn(&T) -> &[V]) -> &mut Member<T> {
        self.push(
            name,
            MemberKind::Sequence,
            Box::new(move |left: &T, right: &T, walker: &mut MemberWalker| {
                walker.values(name, get(left), get(right))
            }),
        )
    }

    fn push(&mut self, name: &'static str, kind: MemberKind, probe: Probe<T>) -> &mut Member<T> {
        let index = self.members.len();
        self.members.push(Member {
            name,
            kind,
            excluded: false,
            probe,
        });
        &mut self.members[index]
    }
}

impl<'a, T> IntoIterator for &'a Members<T> {
    type Item = &'a Member<T>;
    type IntoIter = std::slice::Iter<'a, Member<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
