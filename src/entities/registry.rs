// 🗂️ Keyed registry shared by students, subjects and professors
//
// Records live in a Vec in insertion order; the code is the key. Lookups are
// linear, which is fine for a class-sized dataset and keeps listing order
// stable for the tables that render it.

use crate::error::{EntityKind, RecordsError, Result};
use serde::Serialize;

// ============================================================================
// RECORD TRAIT
// ============================================================================

pub trait Record: Clone {
    const KIND: EntityKind;

    fn code(&self) -> &str;

    fn validate(&self) -> Result<()>;
}

// ============================================================================
// REGISTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Registry<T> {
    records: Vec<T>,
}

impl<T: Record> Registry<T> {
    pub fn new() -> Self {
        Registry {
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.position(code).is_some()
    }

    pub fn get(&self, code: &str) -> Option<&T> {
        self.records.iter().find(|r| r.code() == code)
    }

    /// All records in registration order
    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.code())
    }

    /// Register a new record. Fails without mutation on invalid fields or a taken code.
    pub fn add(&mut self, record: T) -> Result<()> {
        record.validate()?;
        if self.contains(record.code()) {
            return Err(RecordsError::DuplicateKey {
                kind: T::KIND,
                code: record.code().to_string(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Replace the record stored under `code`, returning the previous value.
    ///
    /// The replacement may carry a different code (a rekey); it must not
    /// collide with any *other* record. The slot keeps its position.
    pub fn replace(&mut self, code: &str, record: T) -> Result<T> {
        let index = self.position(code).ok_or_else(|| RecordsError::NotFound {
            kind: T::KIND,
            code: code.to_string(),
        })?;
        record.validate()?;
        if record.code() != code && self.contains(record.code()) {
            return Err(RecordsError::DuplicateKey {
                kind: T::KIND,
                code: record.code().to_string(),
            });
        }
        Ok(std::mem::replace(&mut self.records[index], record))
    }

    pub fn remove(&mut self, code: &str) -> Result<T> {
        let index = self.position(code).ok_or_else(|| RecordsError::NotFound {
            kind: T::KIND,
            code: code.to_string(),
        })?;
        Ok(self.records.remove(index))
    }

    /// Insert or overwrite by code (used when merging an import)
    pub(crate) fn upsert(&mut self, record: T) -> Result<()> {
        record.validate()?;
        match self.position(record.code()) {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
        Ok(())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.records.iter_mut()
    }

    fn position(&self, code: &str) -> Option<usize> {
        self.records.iter().position(|r| r.code() == code)
    }
}

impl<T: Record> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Student;
    use crate::error::ErrorKind;

    fn registry_with(codes: &[&str]) -> Registry<Student> {
        let mut registry = Registry::new();
        for code in codes {
            registry
                .add(Student::new(*code, format!("Student {}", code), "Engineering"))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_add_rejects_duplicate_without_mutation() {
        let mut registry = registry_with(&["S1"]);

        let err = registry
            .add(Student::new("S1", "Someone Else", "Law"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("S1").unwrap().name, "Student S1");
    }

    #[test]
    fn test_add_rejects_invalid_record() {
        let mut registry: Registry<Student> = Registry::new();
        let err = registry.add(Student::new("", "Nobody", "Law")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_replace_keeps_slot_position() {
        let mut registry = registry_with(&["S1", "S2", "S3"]);

        let old = registry
            .replace("S2", Student::new("S2", "Renamed", "Law"))
            .unwrap();

        assert_eq!(old.name, "Student S2");
        let codes: Vec<&str> = registry.codes().collect();
        assert_eq!(codes, vec!["S1", "S2", "S3"]);
        assert_eq!(registry.get("S2").unwrap().name, "Renamed");
    }

    #[test]
    fn test_replace_rekey_collision_leaves_state_unchanged() {
        let mut registry = registry_with(&["S1", "S2"]);
        let before = registry.clone();

        let err = registry
            .replace("S1", Student::new("S2", "Clash", "Law"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert_eq!(registry, before);
    }

    #[test]
    fn test_replace_rekey_to_free_code() {
        let mut registry = registry_with(&["S1", "S2"]);

        registry
            .replace("S1", Student::new("S9", "Moved", "Law"))
            .unwrap();

        assert!(!registry.contains("S1"));
        assert_eq!(registry.list()[0].code, "S9");
    }

    #[test]
    fn test_replace_and_remove_missing_code() {
        let mut registry = registry_with(&["S1"]);

        let err = registry
            .replace("S7", Student::new("S7", "Ghost", "Law"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = registry.remove("S7").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let mut registry = registry_with(&["S1", "S2"]);

        registry
            .upsert(Student::new("S1", "Updated", "Law"))
            .unwrap();
        registry
            .upsert(Student::new("S3", "New", "Law"))
            .unwrap();

        let codes: Vec<&str> = registry.codes().collect();
        assert_eq!(codes, vec!["S1", "S2", "S3"]);
        assert_eq!(registry.get("S1").unwrap().name, "Updated");
    }
}
