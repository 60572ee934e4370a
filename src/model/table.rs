use super::Record;
use std::collections::HashSet;

/// Records from one logical query, in fetch order.
///
/// A table may hold the same item more than once when it was merged from
/// overlapping listings; call [`Table::dedup_by_id`] when uniqueness matters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Concatenates tables in iteration order.
    pub fn concat<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = Table>,
    {
        let mut merged = Table::new();
        for table in tables {
            merged.append(table);
        }
        merged
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = Record>) {
        self.records.extend(records);
    }

    pub fn append(&mut self, mut other: Table) {
        self.records.append(&mut other.records);
    }

    /// Drops later occurrences of an already-seen `id`, returning how many
    /// were removed. Records without an `id` are always kept.
    pub fn dedup_by_id(&mut self) -> usize {
        let before = self.records.len();
        let mut seen = HashSet::new();
        self.records.retain(|record| match record.id() {
            Some(id) => seen.insert(id.to_string()),
            None => true,
        });
        before - self.records.len()
    }
}

impl IntoIterator for Table {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
