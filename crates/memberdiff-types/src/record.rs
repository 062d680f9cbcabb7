//! Difference records and the report that collects them.

use std::fmt;

use crate::error::{CompareError, CompareResult};
use crate::value::Value;

/// One observed inequality at one member.
///
/// Records are immutable once created. For a mismatched collection the two
/// values are [`Value::Sequence`]s holding the unmatched elements of each side.
#[derive(Clone, Debug, PartialEq)]
pub struct DifferenceRecord {
    member_name: String,
    left: Value,
    right: Value,
}

impl DifferenceRecord {
    pub fn new(member_name: impl Into<String>, left: Value, right: Value) -> Self {
        Self {
            member_name: member_name.into(),
            left,
            right,
        }
    }

    /// The member (or element type) this record is attributed to.
    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    /// Value observed on the left-hand side.
    pub fn left(&self) -> &Value {
        &self.left
    }

    /// Value observed on the right-hand side.
    pub fn right(&self) -> &Value {
        &self.right
    }

    /// Whether the two carried values are equal.
    pub fn values_equal(&self) -> bool {
        self.left == self.right
    }

    /// The same record with left and right exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            member_name: self.member_name.clone(),
            left: self.right.clone(),
            right: self.left.clone(),
        }
    }

    /// Render as `"<name>: <left> == <right>"` or `"<name>: <left> != <right>"`.
    ///
    /// Fails with [`CompareError::NullLeftValue`] when the left value is null,
    /// since the equality half of the rendering is defined on the left value.
    pub fn render(&self) -> CompareResult<String> {
        if self.left.is_null() {
            return Err(CompareError::NullLeftValue {
                member: self.member_name.clone(),
            });
        }
        Ok(self.to_string())
    }

    pub fn into_parts(self) -> (String, Value, Value) {
        (self.member_name, self.left, self.right)
    }
}

/// Total rendering; a null left value prints as `null` instead of failing.
impl fmt::Display for DifferenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.values_equal() { "==" } else { "!=" };
        write!(f, "{}: {} {} {}", self.member_name, self.left, op, self.right)
    }
}

/// The ordered list of records produced by one comparison.
///
/// Order follows traversal order and carries no meaning beyond readability.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DifferenceReport {
    records: Vec<DifferenceRecord>,
}

impl DifferenceReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no differences were found.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn push(&mut self, record: DifferenceRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[DifferenceRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DifferenceRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<DifferenceRecord> {
        self.records
    }

    /// Names of all reported members, in report order.
    pub fn member_names(&self) -> Vec<&str> {
        self.records.iter().map(DifferenceRecord::member_name).collect()
    }

    /// First record attributed to `member_name`.
    pub fn find(&self, member_name: &str) -> Option<&DifferenceRecord> {
        self.records.iter().find(|r| r.member_name() == member_name)
    }

    /// Every record with its values exchanged.
    pub fn swapped(&self) -> Self {
        self.records.iter().map(DifferenceRecord::swapped).collect()
    }

    /// Render every record with [`DifferenceRecord::render`], failing on the
    /// first record whose left value is null.
    pub fn render_lines(&self) -> CompareResult<Vec<String>> {
        self.records.iter().map(DifferenceRecord::render).collect()
    }
}

impl fmt::Display for DifferenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{record}")?;
        }
        Ok(())
    }
}

impl Extend<DifferenceRecord> for DifferenceReport {
    fn extend<I: IntoIterator<Item = DifferenceRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl FromIterator<DifferenceRecord> for DifferenceReport {
    fn from_iter<I: IntoIterator<Item = DifferenceRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DifferenceReport {
    type Item = DifferenceRecord;
    type IntoIter = std::vec::IntoIter<DifferenceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a DifferenceReport {
    type Item = &'a DifferenceRecord;
    type IntoIter = std::slice::Iter<'a, DifferenceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, left: i32, right: i32) -> DifferenceRecord {
        DifferenceRecord::new(name, Value::of(&left), Value::of(&right))
    }

    #[test]
    fn render_unequal_values() {
        assert_eq!(record("y", 2, 3).render().unwrap(), "y: 2 != 3");
    }

    #[test]
    fn render_equal_values() {
        assert_eq!(record("x", 1, 1).render().unwrap(), "x: 1 == 1");
    }

    #[test]
    fn render_fails_on_null_left() {
        let rec = DifferenceRecord::new("nickname", Value::Null, Value::of(&"bob".to_string()));
        assert_eq!(
            rec.render(),
            Err(CompareError::NullLeftValue {
                member: "nickname".into()
            })
        );
        // Display stays total.
        assert_eq!(rec.to_string(), "nickname: null != \"bob\"");
    }

    #[test]
    fn null_right_renders() {
        let rec = DifferenceRecord::new("nickname", Value::of(&"bob".to_string()), Value::Null);
        assert_eq!(rec.render().unwrap(), "nickname: \"bob\" != null");
    }

    #[test]
    fn sequence_values_render_as_lists() {
        let rec = DifferenceRecord::new("Point", Value::sequence(&[1]), Value::sequence(&[2, 3]));
        assert_eq!(rec.render().unwrap(), "Point: [1] != [2, 3]");
    }

    #[test]
    fn swapped_exchanges_values() {
        let rec = record("y", 2, 3).swapped();
        assert_eq!(rec.member_name(), "y");
        assert!(rec.left().is(&3));
        assert!(rec.right().is(&2));
    }

    #[test]
    fn report_accessors() {
        let mut report = DifferenceReport::new();
        assert!(report.is_empty());

        report.push(record("a", 1, 2));
        report.extend([record("b", 3, 4)]);

        assert_eq!(report.len(), 2);
        assert_eq!(report.member_names(), vec!["a", "b"]);
        assert!(report.find("b").is_some_and(|r| r.left().is(&3)));
        assert!(report.find("c").is_none());
        assert_eq!(report.to_string(), "a: 1 != 2\nb: 3 != 4");
        assert_eq!(report.render_lines().unwrap(), vec!["a: 1 != 2", "b: 3 != 4"]);
    }

    #[test]
    fn render_lines_propagates_null_left() {
        let report: DifferenceReport = [
            record("a", 1, 2),
            DifferenceRecord::new("b", Value::Null, Value::of(&1)),
        ]
        .into_iter()
        .collect();
        assert!(matches!(
            report.render_lines(),
            Err(CompareError::NullLeftValue { member }) if member == "b"
        ));
    }

    #[test]
    fn swapped_report() {
        let report: DifferenceReport = [record("a", 1, 2)].into_iter().collect();
        let swapped = report.swapped();
        assert_eq!(swapped.records()[0], record("a", 2, 1));
        assert_eq!(swapped.swapped(), report);
    }
}
