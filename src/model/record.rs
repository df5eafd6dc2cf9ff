use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;

/// Maximum number of points a student is graded against.
///
/// This does not match the accepted input ranges (3 × 50 for coursework and
/// 100 for the exam), so percentages above 100 are possible. Existing data
/// files rely on this divisor and it is kept as is.
pub const POTENTIAL_MAX: f64 = 160.0;

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 70.0 => Self::A,
            p if p >= 60.0 => Self::B,
            p if p >= 50.0 => Self::C,
            p if p >= 40.0 => Self::D,
            _ => Self::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.pad(letter)
    }
}

/// A student's marks. Totals, percentage and grade are always derived from
/// the stored marks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub coursework: [i64; 3],
    pub exam: i64,
}

/// A line of the marks file, before numeric conversion.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub name: String,
    pub cw1: String,
    pub cw2: String,
    pub cw3: String,
    pub exam: String,
}

fn parse_mark(field: &'static str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|source| Error::InvalidRecordData {
            field,
            value: value.to_owned(),
            source,
        })
}

impl Record {
    pub fn new(id: &str, name: &str, coursework: [i64; 3], exam: i64) -> Self {
        Self {
            id: id.trim().to_owned(),
            name: name.trim().to_owned(),
            coursework,
            exam,
        }
    }

    /// Build a record from its textual fields. No range check is done here.
    pub fn from_fields(
        id: &str,
        name: &str,
        cw1: &str,
        cw2: &str,
        cw3: &str,
        exam: &str,
    ) -> Result<Self> {
        Ok(Self::new(
            id,
            name,
            [
                parse_mark("coursework 1", cw1)?,
                parse_mark("coursework 2", cw2)?,
                parse_mark("coursework 3", cw3)?,
            ],
            parse_mark("exam", exam)?,
        ))
    }

    /// Marks are not range checked when loaded, so sums are computed on a
    /// wider type and cannot overflow.
    pub fn coursework_total(&self) -> i128 {
        self.coursework.iter().copied().map(i128::from).sum()
    }

    pub fn total(&self) -> i128 {
        self.coursework_total() + i128::from(self.exam)
    }

    pub fn percentage(&self) -> f64 {
        self.total() as f64 * 100.0 / POTENTIAL_MAX
    }

    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.percentage())
    }

    /// Fields in file order, as written to the marks file.
    pub fn to_fields(&self) -> [String; 6] {
        [
            self.id.clone(),
            self.name.clone(),
            self.coursework[0].to_string(),
            self.coursework[1].to_string(),
            self.coursework[2].to_string(),
            self.exam.to_string(),
        ]
    }
}

impl TryFrom<RawRecord> for Record {
    type Error = Error;

    fn try_from(raw: RawRecord) -> Result<Self> {
        Self::from_fields(&raw.id, &raw.name, &raw.cw1, &raw.cw2, &raw.cw3, &raw.exam)
    }
}
