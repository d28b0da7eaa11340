// 🏫 Academic System - the single aggregate owning all four collections
//
// Every consumer (CLI, dashboard, import/export) receives a reference to one
// `AcademicSystem`; nothing keeps a second copy of the registries.
//
// Cross-entity rules enforced here:
// - grade entries and subjects may only reference existing records
// - deleting a student or subject removes its grade entries in the same call
// - deleting a professor is refused while any subject still references it
// - a rekeying edit rewrites dependent references in the same call
//
// Single-threaded by contract: callers must not mutate while an import is in
// flight. There is no locking.

use crate::entities::{Professor, Record, Registry, Student, Subject};
use crate::error::{EntityKind, RecordsError, Result};
use crate::ledger::{GradeEntry, GradeLedger};
use serde::Serialize;
use tracing::{debug, info};

// ============================================================================
// CASCADE REPORT
// ============================================================================

/// Full blast radius of a delete: the removed parent plus every dependent
/// grade entry that went with it (irreversible).
#[derive(Debug, Clone, PartialEq)]
pub struct Removal<T> {
    pub record: T,
    pub removed_grades: Vec<GradeEntry>,
}

// ============================================================================
// ACADEMIC SYSTEM
// ============================================================================

/// Populated only through the checked mutators below (imports included);
/// there is no `Deserialize`, so nothing can bypass them.
///
/// ```compile_fail
/// let _: academic_records::AcademicSystem = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AcademicSystem {
    students: Registry<Student>,
    subjects: Registry<Subject>,
    professors: Registry<Professor>,
    grades: GradeLedger,
}

impl AcademicSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn students(&self) -> &Registry<Student> {
        &self.students
    }

    pub fn subjects(&self) -> &Registry<Subject> {
        &self.subjects
    }

    pub fn professors(&self) -> &Registry<Professor> {
        &self.professors
    }

    pub fn grades(&self) -> &GradeLedger {
        &self.grades
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
            && self.subjects.is_empty()
            && self.professors.is_empty()
            && self.grades.is_empty()
    }

    // ========================================================================
    // STUDENTS
    // ========================================================================

    pub fn add_student(&mut self, student: Student) -> Result<()> {
        let code = student.code.clone();
        self.students.add(student)?;
        debug!(code = %code, "student added");
        Ok(())
    }

    /// Replace a student. A new code is propagated to the student's grade entries.
    pub fn edit_student(&mut self, code: &str, student: Student) -> Result<()> {
        let new_code = student.code.clone();
        self.students.replace(code, student)?;
        if new_code != code {
            let renamed = self.grades.rename_student(code, &new_code);
            info!(old = %code, new = %new_code, grades = renamed, "student rekeyed");
        } else {
            debug!(code = %code, "student edited");
        }
        Ok(())
    }

    /// Remove a student and every grade entry that references it.
    pub fn delete_student(&mut self, code: &str) -> Result<Removal<Student>> {
        if !self.students.contains(code) {
            return Err(not_found(EntityKind::Student, code));
        }
        let removed_grades = self.take_grades(|e| e.student == code);
        let record = self.students.remove(code)?;
        info!(code = %code, grades = removed_grades.len(), "student deleted with cascade");
        Ok(Removal {
            record,
            removed_grades,
        })
    }

    pub fn student(&self, code: &str) -> Option<&Student> {
        self.students.get(code)
    }

    pub fn search_students(&self, query: &str) -> Vec<&Student> {
        self.students.iter().filter(|s| s.matches(query)).collect()
    }

    pub fn students_in_program(&self, program: &str) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.program == program)
            .collect()
    }

    // ========================================================================
    // SUBJECTS
    // ========================================================================

    pub fn add_subject(&mut self, subject: Subject) -> Result<()> {
        self.check_professor_reference(&subject)?;
        let code = subject.code.clone();
        self.subjects.add(subject)?;
        debug!(code = %code, "subject added");
        Ok(())
    }

    /// Replace a subject. A new code is propagated to the subject's grade entries.
    pub fn edit_subject(&mut self, code: &str, subject: Subject) -> Result<()> {
        self.check_professor_reference(&subject)?;
        let new_code = subject.code.clone();
        self.subjects.replace(code, subject)?;
        if new_code != code {
            let renamed = self.grades.rename_subject(code, &new_code);
            info!(old = %code, new = %new_code, grades = renamed, "subject rekeyed");
        } else {
            debug!(code = %code, "subject edited");
        }
        Ok(())
    }

    /// Remove a subject and every grade entry that references it.
    pub fn delete_subject(&mut self, code: &str) -> Result<Removal<Subject>> {
        if !self.subjects.contains(code) {
            return Err(not_found(EntityKind::Subject, code));
        }
        let removed_grades = self.take_grades(|e| e.subject == code);
        let record = self.subjects.remove(code)?;
        info!(code = %code, grades = removed_grades.len(), "subject deleted with cascade");
        Ok(Removal {
            record,
            removed_grades,
        })
    }

    pub fn subject(&self, code: &str) -> Option<&Subject> {
        self.subjects.get(code)
    }

    pub fn subjects_for_professor(&self, code: &str) -> Vec<&Subject> {
        self.subjects
            .iter()
            .filter(|s| s.is_taught_by(code))
            .collect()
    }

    // ========================================================================
    // PROFESSORS
    // ========================================================================

    pub fn add_professor(&mut self, professor: Professor) -> Result<()> {
        let code = professor.code.clone();
        self.professors.add(professor)?;
        debug!(code = %code, "professor added");
        Ok(())
    }

    /// Replace a professor. A new code is propagated to assigned subjects.
    pub fn edit_professor(&mut self, code: &str, professor: Professor) -> Result<()> {
        let new_code = professor.code.clone();
        self.professors.replace(code, professor)?;
        if new_code != code {
            let mut reassigned = 0;
            for subject in self.subjects.iter_mut().filter(|s| s.is_taught_by(code)) {
                subject.professor = Some(new_code.clone());
                reassigned += 1;
            }
            info!(old = %code, new = %new_code, subjects = reassigned, "professor rekeyed");
        } else {
            debug!(code = %code, "professor edited");
        }
        Ok(())
    }

    /// Remove a professor. Refused while any subject is still assigned to it.
    pub fn delete_professor(&mut self, code: &str) -> Result<Professor> {
        if !self.professors.contains(code) {
            return Err(not_found(EntityKind::Professor, code));
        }
        let assigned = self.subjects.iter().filter(|s| s.is_taught_by(code)).count();
        if assigned > 0 {
            return Err(RecordsError::InUse {
                code: code.to_string(),
                subjects: assigned,
            });
        }
        let record = self.professors.remove(code)?;
        debug!(code = %code, "professor deleted");
        Ok(record)
    }

    pub fn professor(&self, code: &str) -> Option<&Professor> {
        self.professors.get(code)
    }

    // ========================================================================
    // GRADES
    // ========================================================================

    /// Append a grade entry. Both referenced codes must exist.
    pub fn add_grade(&mut self, entry: GradeEntry) -> Result<usize> {
        self.check_grade_references(&entry)?;
        self.grades.push(entry)?;
        let position = self.grades.len() - 1;
        debug!(position, "grade entry added");
        Ok(position)
    }

    /// Replace the entry at `position`. No other position changes.
    pub fn edit_grade_at(&mut self, position: usize, entry: GradeEntry) -> Result<GradeEntry> {
        if position >= self.grades.len() {
            return Err(RecordsError::PositionOutOfRange {
                position,
                len: self.grades.len(),
            });
        }
        self.check_grade_references(&entry)?;
        let old = self.grades.replace_at(position, entry)?;
        debug!(position, "grade entry edited");
        Ok(old)
    }

    /// Remove the entry at `position`; later entries shift down by one.
    pub fn delete_grade_at(&mut self, position: usize) -> Result<GradeEntry> {
        let removed = self.grades.remove_at(position)?;
        debug!(position, "grade entry deleted");
        Ok(removed)
    }

    // ========================================================================
    // INTEGRITY
    // ========================================================================

    /// Check every cross-entity reference. Used to vet staged imports.
    pub fn check_integrity(&self) -> Result<()> {
        for subject in self.subjects.iter() {
            self.check_professor_reference(subject)?;
        }
        for entry in self.grades.all() {
            self.check_grade_references(entry)?;
        }
        Ok(())
    }

    pub(crate) fn students_mut(&mut self) -> &mut Registry<Student> {
        &mut self.students
    }

    pub(crate) fn subjects_mut(&mut self) -> &mut Registry<Subject> {
        &mut self.subjects
    }

    pub(crate) fn professors_mut(&mut self) -> &mut Registry<Professor> {
        &mut self.professors
    }

    fn take_grades<F>(&mut self, pred: F) -> Vec<GradeEntry>
    where
        F: Fn(&GradeEntry) -> bool,
    {
        let removed: Vec<GradeEntry> = self
            .grades
            .all()
            .iter()
            .filter(|&e| pred(e))
            .cloned()
            .collect();
        let count = self.grades.remove_where(pred);
        debug_assert_eq!(count, removed.len());
        removed
    }

    fn check_professor_reference(&self, subject: &Subject) -> Result<()> {
        match &subject.professor {
            Some(code) if !self.professors.contains(code) => Err(RecordsError::DanglingReference {
                kind: EntityKind::Professor,
                code: code.clone(),
                referenced_by: format!("subject '{}'", subject.code()),
            }),
            _ => Ok(()),
        }
    }

    fn check_grade_references(&self, entry: &GradeEntry) -> Result<()> {
        if !self.students.contains(&entry.student) {
            return Err(RecordsError::DanglingReference {
                kind: EntityKind::Student,
                code: entry.student.clone(),
                referenced_by: "grade entry".to_string(),
            });
        }
        if !self.subjects.contains(&entry.subject) {
            return Err(RecordsError::DanglingReference {
                kind: EntityKind::Subject,
                code: entry.subject.clone(),
                referenced_by: "grade entry".to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(kind: EntityKind, code: &str) -> RecordsError {
    RecordsError::NotFound {
        kind,
        code: code.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
