// 👩‍🏫 Professor Entity
//
// Subjects point at professors through an optional code. A professor that is
// still referenced cannot be deleted (see `AcademicSystem::delete_professor`).

use super::{check_email, require_code, require_text, Record};
use crate::error::{EntityKind, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    pub code: String,
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    /// Specialty or department
    #[serde(default)]
    pub specialty: String,
}

impl Professor {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Professor {
            code: code.into(),
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            specialty: String::new(),
        }
    }

    pub fn with_contact(mut self, email: impl Into<String>, phone: impl Into<String>) -> Self {
        self.email = email.into();
        self.phone = phone.into();
        self
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = specialty.into();
        self
    }
}

impl Record for Professor {
    const KIND: EntityKind = EntityKind::Professor;

    fn code(&self) -> &str {
        &self.code
    }

    fn validate(&self) -> Result<()> {
        require_code(&self.code)?;
        require_text("name", &self.name)?;
        check_email(&self.email)
    }
}
