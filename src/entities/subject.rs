// 📚 Subject Entity
//
// The professor reference is always present as a field and nullable, so
// callers never have to probe whether a subject "has" a professor attribute.

use super::{require_code, require_text, Record};
use crate::error::{EntityKind, RecordsError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub code: String,
    pub name: String,

    /// Credit count, at least 1
    pub credits: u32,

    /// Code of the assigned professor, if any
    #[serde(default)]
    pub professor: Option<String>,
}

impl Subject {
    pub fn new(code: impl Into<String>, name: impl Into<String>, credits: u32) -> Self {
        Subject {
            code: code.into(),
            name: name.into(),
            credits,
            professor: None,
        }
    }

    pub fn with_professor(mut self, professor: impl Into<String>) -> Self {
        self.professor = Some(professor.into());
        self
    }

    pub fn is_taught_by(&self, professor: &str) -> bool {
        self.professor.as_deref() == Some(professor)
    }
}

impl Record for Subject {
    const KIND: EntityKind = EntityKind::Subject;

    fn code(&self) -> &str {
        &self.code
    }

    fn validate(&self) -> Result<()> {
        require_code(&self.code)?;
        require_text("name", &self.name)?;
        if self.credits == 0 {
            return Err(RecordsError::validation("credits", "must be at least 1"));
        }
        if let Some(professor) = &self.professor {
            require_code(professor)
                .map_err(|_| RecordsError::validation("professor", "empty professor reference"))?;
        }
        Ok(())
    }
}
