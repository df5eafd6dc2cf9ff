use crate::model::RecordUpdate;
use eyre::ensure;
use std::ops::RangeInclusive;

pub const COURSEWORK_RANGE: RangeInclusive<i64> = 0..=50;
pub const EXAM_RANGE: RangeInclusive<i64> = 0..=100;

fn check_marks<'a>(
    coursework: impl IntoIterator<Item = &'a i64>,
    exam: Option<i64>,
) -> eyre::Result<()> {
    ensure!(
        coursework.into_iter().all(|m| COURSEWORK_RANGE.contains(m)),
        "Coursework marks must be 0-50."
    );
    ensure!(
        exam.is_none_or(|e| EXAM_RANGE.contains(&e)),
        "Exam mark must be 0-100."
    );
    Ok(())
}

/// Check user input before a record gets added.
pub fn validate_new(id: &str, name: &str, coursework: &[i64; 3], exam: i64) -> eyre::Result<()> {
    ensure!(
        !id.trim().is_empty() && !name.trim().is_empty(),
        "ID and Name are required."
    );
    check_marks(coursework, Some(exam))
}

/// Check the marks of an update. Blank identifiers and names are accepted
/// and later ignored.
pub fn validate_update(changes: &RecordUpdate) -> eyre::Result<()> {
    check_marks(changes.coursework.iter().flatten(), changes.exam)
}
