// ❗ Error taxonomy for the records core
//
// Duplicate and not-found outcomes are routine user-input results, so every
// registry/ledger operation returns them as values. Nothing in here is fatal.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

// ============================================================================
// ENTITY KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Student,
    Subject,
    Professor,
    GradeEntry,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Student => "student",
            EntityKind::Subject => "subject",
            EntityKind::Professor => "professor",
            EntityKind::GradeEntry => "grade entry",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ERROR KIND (coarse taxonomy surfaced to callers)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    DuplicateKey,
    NotFound,
    DanglingReference,
    Validation,
    IoFailure,
}

// ============================================================================
// RECORDS ERROR
// ============================================================================

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("{kind} code '{code}' already exists")]
    DuplicateKey { kind: EntityKind, code: String },

    #[error("{kind} '{code}' not found")]
    NotFound { kind: EntityKind, code: String },

    #[error("grade position {position} out of range (ledger holds {len} entries)")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("{referenced_by} references unknown {kind} code '{code}'")]
    DanglingReference {
        kind: EntityKind,
        code: String,
        referenced_by: String,
    },

    /// Professor still assigned to subjects; deletion is refused.
    #[error("professor '{code}' is still assigned to {subjects} subject(s)")]
    InUse { code: String, subjects: usize },

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("import rejected at line {line}: {reason}")]
    Import { line: u64, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl RecordsError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        RecordsError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordsError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            RecordsError::NotFound { .. } | RecordsError::PositionOutOfRange { .. } => {
                ErrorKind::NotFound
            }
            RecordsError::DanglingReference { .. } | RecordsError::InUse { .. } => {
                ErrorKind::DanglingReference
            }
            RecordsError::Validation { .. } | RecordsError::Import { .. } => {
                ErrorKind::Validation
            }
            RecordsError::Io(_) | RecordsError::Csv(_) => ErrorKind::IoFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;

// ============================================================================
// TESTS
// ============================================================================
