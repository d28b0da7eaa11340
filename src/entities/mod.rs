// Entity Models - Students, Subjects, Professors
//
// Each entity has:
// - A caller-chosen identity code, unique within its registry
// - Plain value fields replaced wholesale on edit
// - A `validate()` that enforces field presence and ranges

pub mod professor;
pub mod registry;
pub mod student;
pub mod subject;

pub use professor::Professor;
pub use registry::{Record, Registry};
pub use student::Student;
pub use subject::Subject;

use crate::error::{RecordsError, Result};

/// Identity codes must be non-empty and carry no surrounding whitespace
pub(crate) fn require_code(code: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(RecordsError::validation("code", "must not be empty"));
    }
    if code.trim() != code {
        return Err(RecordsError::validation(
            "code",
            format!("'{}' has leading or trailing whitespace", code),
        ));
    }
    Ok(())
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RecordsError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Contact email is optional, but when present it needs an `@`
pub(crate) fn check_email(email: &str) -> Result<()> {
    if !email.is_empty() && !email.contains('@') {
        return Err(RecordsError::validation(
            "email",
            format!("'{}' is not an email address", email),
        ));
    }
    Ok(())
}
