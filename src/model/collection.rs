use super::Record;
use std::cmp::Reverse;

/// Changes to apply to a record. Fields left to `None` are kept.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RecordUpdate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub coursework: [Option<i64>; 3],
    pub exam: Option<i64>,
}

impl RecordUpdate {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.name.is_none()
            && self.coursework.iter().all(Option::is_none)
            && self.exam.is_none()
    }

    /// Blank identifiers and names are ignored.
    fn apply_to(&self, record: &mut Record) {
        if let Some(id) = self.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            record.id = id.to_owned();
        }
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            record.name = name.to_owned();
        }
        for (mark, change) in record.coursework.iter_mut().zip(self.coursework) {
            if let Some(change) = change {
                *mark = change;
            }
        }
        if let Some(exam) = self.exam {
            record.exam = exam;
        }
    }
}

/// Records in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collection {
    pub records: Vec<Record>,
}

impl Collection {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    fn position(&self, query: &str) -> Option<usize> {
        let query = query.trim().to_lowercase();
        self.records
            .iter()
            .position(|r| r.id.to_lowercase() == query || r.name.to_lowercase().contains(&query))
    }

    /// Find the first record whose identifier is `query` or whose name
    /// contains `query`, ignoring case.
    pub fn find(&self, query: &str) -> Option<&Record> {
        self.position(query).map(|idx| &self.records[idx])
    }

    /// Record with the highest overall total, the earliest one on ties.
    pub fn highest(&self) -> Option<&Record> {
        self.records
            .iter()
            .reduce(|best, r| if r.total() > best.total() { r } else { best })
    }

    /// Record with the lowest overall total, the earliest one on ties.
    pub fn lowest(&self) -> Option<&Record> {
        self.records
            .iter()
            .reduce(|best, r| if r.total() < best.total() { r } else { best })
    }

    pub fn sort(&mut self, ascending: bool) {
        if ascending {
            self.records.sort_by_key(Record::total);
        } else {
            self.records.sort_by_key(|r| Reverse(r.total()));
        }
    }

    pub fn class_average(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.records.iter().map(Record::percentage).sum::<f64>() / self.len() as f64)
    }

    pub fn add(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Remove every record with this exact identifier and return how many
    /// were removed.
    pub fn delete(&mut self, id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        before - self.records.len()
    }

    /// Apply `changes` to the record `find` would return.
    pub fn update(&mut self, query: &str, changes: &RecordUpdate) -> Option<&Record> {
        let idx = self.position(query)?;
        let record = &mut self.records[idx];
        changes.apply_to(record);
        Some(record)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
