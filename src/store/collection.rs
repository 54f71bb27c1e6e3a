/// Record storage: the chronological tree plus the month index.
///
/// `RecordCollection` is the single owner of both structures. The tree is the
/// canonical, date-ordered view and keeps at most one record per day. The
/// month index keeps every record it is given, in arrival order, and is what
/// all statistics read from.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::model::WeatherRecord;
use crate::store::tree::OrderedTree;

// ---------------------------------------------------------------------------
// Month index
// ---------------------------------------------------------------------------

/// Records grouped by calendar month (1–12), in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MonthIndex {
    buckets: BTreeMap<u32, Vec<WeatherRecord>>,
}

impl MonthIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` to its month's bucket, creating the bucket on first use.
    pub fn append(&mut self, record: WeatherRecord) {
        self.buckets.entry(record.month()).or_default().push(record);
    }

    /// The bucket for `month`, or an empty slice if nothing was recorded.
    pub fn get(&self, month: u32) -> &[WeatherRecord] {
        self.buckets.get(&month).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of indexed records across all months.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Months that have at least one record, ascending.
    pub fn months(&self) -> impl Iterator<Item = u32> + '_ {
        self.buckets.keys().copied()
    }
}

// ---------------------------------------------------------------------------
// Record collection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RecordCollection {
    tree: OrderedTree<WeatherRecord>,
    by_month: MonthIndex,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record.
    ///
    /// The tree drops a record whose date is already present; the month index
    /// keeps it regardless. Returns whether the tree accepted the date.
    pub fn add(&mut self, record: WeatherRecord) -> bool {
        let accepted = self.tree.insert(record);
        self.by_month.append(record);
        accepted
    }

    /// Every indexed record for `month` across all years.
    pub fn records_for_month(&self, month: u32) -> &[WeatherRecord] {
        self.by_month.get(month)
    }

    /// Indexed records for `month` whose year is exactly `year`.
    pub fn records_for_year_month(&self, year: i32, month: u32) -> Vec<WeatherRecord> {
        self.by_month
            .get(month)
            .iter()
            .filter(|r| r.year() == year)
            .copied()
            .collect()
    }

    /// Number of distinct dates held by the tree.
    pub fn total_count(&self) -> usize {
        self.tree.size()
    }

    /// Number of records held by the month index, duplicates included.
    pub fn indexed_count(&self) -> usize {
        self.by_month.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = Vec::new();
        self.tree.in_order_with(&mut years, |record, acc| {
            if acc.last() != Some(&record.year()) {
                acc.push(record.year());
            }
        });
        years
    }

    pub fn tree(&self) -> &OrderedTree<WeatherRecord> {
        &self.tree
    }

    pub fn month_index(&self) -> &MonthIndex {
        &self.by_month
    }

    /// Writes every record in date order, one per line.
    pub fn display_all<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "=== All Weather Data (In-Order Traversal) ===")?;
        for record in &self.tree {
            writeln!(out, "{}", record)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(d: u32, m: u32, y: i32, ws: f64, t: f64, sr: f64) -> WeatherRecord {
        WeatherRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), ws, t, sr)
    }

    #[test]
    fn test_empty_collection() {
        let c = RecordCollection::new();
        assert!(c.is_empty());
        assert_eq!(c.total_count(), 0);
        assert_eq!(c.indexed_count(), 0);
        assert!(c.records_for_month(3).is_empty());
        assert!(c.years().is_empty());
    }

    #[test]
    fn test_year_month_filter_selects_exact_year() {
        let mut c = RecordCollection::new();
        c.add(record(15, 3, 2020, 4.0, 20.0, 500.0));
        c.add(record(20, 3, 2021, 6.0, 22.0, 700.0));

        assert_eq!(c.records_for_month(3).len(), 2);
        let only_2020 = c.records_for_year_month(2020, 3);
        assert_eq!(only_2020.len(), 1);
        assert_eq!(only_2020[0].day(), 15);
        assert!(c.records_for_year_month(2019, 3).is_empty());
    }

    #[test]
    fn test_month_index_keeps_insertion_order() {
        let mut c = RecordCollection::new();
        c.add(record(20, 5, 2020, 1.0, 0.0, 0.0));
        c.add(record(3, 5, 2020, 2.0, 0.0, 0.0));
        c.add(record(11, 5, 2020, 3.0, 0.0, 0.0));

        let days: Vec<u32> = c.records_for_month(5).iter().map(WeatherRecord::day).collect();
        assert_eq!(days, vec![20, 3, 11]);
    }

    #[test]
    fn test_same_day_record_kept_by_index_only() {
        let mut c = RecordCollection::new();
        assert!(c.add(record(1, 6, 2022, 3.0, 15.0, 100.0)));
        assert!(!c.add(record(1, 6, 2022, 5.0, 16.0, 200.0)));

        assert_eq!(c.total_count(), 1);
        assert_eq!(c.indexed_count(), 2);
        assert_eq!(c.records_for_month(6).len(), 2);
    }

    #[test]
    fn test_years_are_distinct_and_ascending() {
        let mut c = RecordCollection::new();
        c.add(record(1, 1, 2021, 0.0, 0.0, 0.0));
        c.add(record(1, 1, 2019, 0.0, 0.0, 0.0));
        c.add(record(5, 7, 2021, 0.0, 0.0, 0.0));
        c.add(record(9, 9, 2020, 0.0, 0.0, 0.0));
        assert_eq!(c.years(), vec![2019, 2020, 2021]);
    }

    #[test]
    fn test_display_all_is_chronological() {
        let mut c = RecordCollection::new();
        c.add(record(2, 1, 2020, 1.0, 2.0, 3.0));
        c.add(record(1, 1, 2020, 4.0, 5.0, 6.0));

        let mut out = Vec::new();
        c.display_all(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1/1/2020"));
        assert!(lines[2].starts_with("2/1/2020"));
    }

    #[test]
    fn test_tree_invariant_holds_for_records() {
        let mut c = RecordCollection::new();
        for day in [15, 3, 28, 1, 9, 22] {
            c.add(record(day, 2, 2024, 0.0, 0.0, 0.0));
        }
        assert!(c.tree().check_invariant());
        assert_eq!(c.month_index().months().collect::<Vec<_>>(), vec![2]);
    }
}
