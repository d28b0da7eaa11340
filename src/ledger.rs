// 📒 Grade Ledger - ordered, position-addressed grade entries
//
// The presentation layer maps table rows to ledger positions, so:
// - iteration order is insertion order
// - editing an entry never moves any entry
// - deleting an entry shifts every later entry down by exactly one
//
// Filters (`by_student`, `by_subject`) are lazy scans; there is no index to
// keep in sync.

use crate::error::{RecordsError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lowest score on the grading scale
pub const MIN_SCORE: f64 = 0.0;

/// Highest score on the grading scale
pub const MAX_SCORE: f64 = 5.0;

pub const MAX_WEIGHT: f64 = 100.0;

// ============================================================================
// GRADE ENTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    /// Student code (must resolve in the student registry)
    pub student: String,

    /// Subject code (must resolve in the subject registry)
    pub subject: String,

    /// Score on the 0.0 - 5.0 scale
    pub score: f64,

    /// Weight as a percentage (0 - 100)
    pub weight: f64,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,
}

impl GradeEntry {
    pub fn new(
        student: impl Into<String>,
        subject: impl Into<String>,
        score: f64,
        weight: f64,
        date: NaiveDate,
    ) -> Self {
        GradeEntry {
            student: student.into(),
            subject: subject.into(),
            score,
            weight,
            date,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Field-level checks; reference checks need the registries and live in
    /// `AcademicSystem`.
    pub fn validate(&self) -> Result<()> {
        if self.student.trim().is_empty() {
            return Err(RecordsError::validation("student", "must not be empty"));
        }
        if self.subject.trim().is_empty() {
            return Err(RecordsError::validation("subject", "must not be empty"));
        }
        if !self.score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&self.score) {
            return Err(RecordsError::validation(
                "score",
                format!("{} is outside {}-{}", self.score, MIN_SCORE, MAX_SCORE),
            ));
        }
        if !self.weight.is_finite() || !(0.0..=MAX_WEIGHT).contains(&self.weight) {
            return Err(RecordsError::validation(
                "weight",
                format!("{} is outside 0-{}", self.weight, MAX_WEIGHT),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// GRADE LEDGER
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GradeLedger {
    entries: Vec<GradeEntry>,
}

impl GradeLedger {
    pub fn new() -> Self {
        GradeLedger {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry in positional order
    pub fn all(&self) -> &[GradeEntry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&GradeEntry> {
        self.entries.get(position)
    }

    pub fn by_student<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a GradeEntry> + 'a {
        self.entries.iter().filter(move |e| e.student == code)
    }

    pub fn by_subject<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a GradeEntry> + 'a {
        self.entries.iter().filter(move |e| e.subject == code)
    }

    /// Ledger positions of a student's entries, for views that edit a filtered list
    pub fn positions_for_student(&self, code: &str) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.student == code)
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn push(&mut self, entry: GradeEntry) -> Result<()> {
        entry.validate()?;
        self.entries.push(entry);
        Ok(())
    }

    pub(crate) fn replace_at(&mut self, position: usize, entry: GradeEntry) -> Result<GradeEntry> {
        self.check_position(position)?;
        entry.validate()?;
        Ok(std::mem::replace(&mut self.entries[position], entry))
    }

    pub(crate) fn remove_at(&mut self, position: usize) -> Result<GradeEntry> {
        self.check_position(position)?;
        Ok(self.entries.remove(position))
    }

    /// Drop every entry matching `pred`, returning how many were removed.
    /// Survivors keep their relative order.
    pub(crate) fn remove_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&GradeEntry) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|e| !pred(e));
        before - self.entries.len()
    }

    pub(crate) fn rename_student(&mut self, old: &str, new: &str) -> usize {
        let mut renamed = 0;
        for entry in self.entries.iter_mut().filter(|e| e.student == old) {
            entry.student = new.to_string();
            renamed += 1;
        }
        renamed
    }

    pub(crate) fn rename_subject(&mut self, old: &str, new: &str) -> usize {
        let mut renamed = 0;
        for entry in self.entries.iter_mut().filter(|e| e.subject == old) {
            entry.subject = new.to_string();
            renamed += 1;
        }
        renamed
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position >= self.entries.len() {
            return Err(RecordsError::PositionOutOfRange {
                position,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn ledger_with(entries: &[(&str, &str, f64)]) -> GradeLedger {
        let mut ledger = GradeLedger::new();
        for (i, (student, subject, score)) in entries.iter().enumerate() {
            ledger
                .push(GradeEntry::new(*student, *subject, *score, 50.0, date(i as u32 + 1)))
                .unwrap();
        }
        ledger
    }

    #[test]
    fn test_validate_score_and_weight_ranges() {
        assert!(GradeEntry::new("S1", "M1", 5.0, 100.0, date(1)).validate().is_ok());
        assert!(GradeEntry::new("S1", "M1", 0.0, 0.0, date(1)).validate().is_ok());
        assert!(GradeEntry::new("S1", "M1", 5.1, 10.0, date(1)).validate().is_err());
        assert!(GradeEntry::new("S1", "M1", -0.5, 10.0, date(1)).validate().is_err());
        assert!(GradeEntry::new("S1", "M1", f64::NAN, 10.0, date(1)).validate().is_err());
        assert!(GradeEntry::new("S1", "M1", 3.0, 100.5, date(1)).validate().is_err());
        assert!(GradeEntry::new("", "M1", 3.0, 10.0, date(1)).validate().is_err());
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let ledger = ledger_with(&[("S1", "M1", 4.0), ("S2", "M1", 3.0), ("S1", "M2", 2.0)]);

        let scores: Vec<f64> = ledger.all().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![4.0, 3.0, 2.0]);
    }

    #[test]
    fn test_replace_at_keeps_other_positions() {
        let mut ledger = ledger_with(&[("S1", "M1", 4.0), ("S2", "M1", 3.0), ("S1", "M2", 2.0)]);
        let before = ledger.clone();

        ledger
            .replace_at(1, GradeEntry::new("S2", "M2", 1.5, 20.0, date(9)))
            .unwrap();

        assert_eq!(ledger.len(), before.len());
        assert_eq!(ledger.get(0), before.get(0));
        assert_eq!(ledger.get(2), before.get(2));
        assert_eq!(ledger.get(1).unwrap().score, 1.5);
    }

    #[test]
    fn test_replace_at_rejects_invalid_entry() {
        let mut ledger = ledger_with(&[("S1", "M1", 4.0)]);
        let before = ledger.clone();

        assert!(ledger
            .replace_at(0, GradeEntry::new("S1", "M1", 7.0, 20.0, date(2)))
            .is_err());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_remove_at_shifts_later_entries() {
        let mut ledger = ledger_with(&[("S1", "M1", 4.0), ("S2", "M1", 3.0), ("S1", "M2", 2.0)]);

        let removed = ledger.remove_at(0).unwrap();

        assert_eq!(removed.score, 4.0);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(0).unwrap().score, 3.0);
        assert_eq!(ledger.get(1).unwrap().score, 2.0);
    }

    #[test]
    fn test_out_of_range_positions() {
        let mut ledger = ledger_with(&[("S1", "M1", 4.0)]);

        let err = ledger.remove_at(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = ledger
            .replace_at(5, GradeEntry::new("S1", "M1", 4.0, 10.0, date(1)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_filters() {
        let ledger = ledger_with(&[("S1", "M1", 4.0), ("S2", "M1", 3.0), ("S1", "M2", 2.0)]);

        assert_eq!(ledger.by_student("S1").count(), 2);
        assert_eq!(ledger.by_subject("M1").count(), 2);
        assert_eq!(ledger.by_student("S9").count(), 0);
        assert_eq!(ledger.positions_for_student("S1"), vec![0, 2]);
    }

    #[test]
    fn test_remove_where_and_rename() {
        let mut ledger = ledger_with(&[("S1", "M1", 4.0), ("S2", "M1", 3.0), ("S1", "M2", 2.0)]);

        assert_eq!(ledger.rename_student("S1", "S7"), 2);
        assert_eq!(ledger.by_student("S7").count(), 2);

        assert_eq!(ledger.remove_where(|e| e.subject == "M1"), 2);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(0).unwrap().subject, "M2");
    }
}
