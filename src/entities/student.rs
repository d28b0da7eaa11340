// 🎓 Student Entity
//
// Identity: code (chosen by the registrar, unique)
// Values: name, program, contact details (replaced wholesale on edit)

use super::{check_email, require_code, require_text, Record};
use crate::error::{EntityKind, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Identity code - unique within the student registry
    pub code: String,

    /// Display name
    pub name: String,

    /// Program / major the student is enrolled in
    pub program: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,
}

impl Student {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        program: impl Into<String>,
    ) -> Self {
        Student {
            code: code.into(),
            name: name.into(),
            program: program.into(),
            email: String::new(),
            phone: String::new(),
        }
    }

    pub fn with_contact(mut self, email: impl Into<String>, phone: impl Into<String>) -> Self {
        self.email = email.into();
        self.phone = phone.into();
        self
    }

    /// Case-insensitive match against code, name and program
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.code.to_lowercase().contains(&query)
            || self.name.to_lowercase().contains(&query)
            || self.program.to_lowercase().contains(&query)
    }
}

impl Record for Student {
    const KIND: EntityKind = EntityKind::Student;

    fn code(&self) -> &str {
        &self.code
    }

    fn validate(&self) -> Result<()> {
        require_code(&self.code)?;
        require_text("name", &self.name)?;
        require_text("program", &self.program)?;
        check_email(&self.email)
    }
}
