// 🔁 Interchange Layer - CSV export / import of the whole academic system
//
// One CSV document, no header row, flexible record length. The first field of
// every row names its kind:
//
//   professor,<code>,<name>,<email>,<phone>,<specialty>
//   student,<code>,<name>,<program>,<email>,<phone>
//   subject,<code>,<name>,<credits>,<professor code or empty>
//   grade,<student>,<subject>,<score>,<weight>,<YYYY-MM-DD>,<description>
//
// Lines starting with `#` are comments; the exporter writes one legend line
// per kind. Floats use Rust's shortest round-trip formatting so scores and
// weights survive export -> import bit for bit.
//
// Import is all-or-nothing: rows are parsed and applied to a *staged* copy,
// every reference is checked there, and only a fully valid stage replaces
// the live system.

use crate::entities::{Professor, Record, Student, Subject};
use crate::error::{EntityKind, RecordsError, Result};
use crate::ledger::GradeEntry;
use crate::system::AcademicSystem;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Canonical date format for grade entries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const PROFESSOR_TAG: &str = "professor";
const STUDENT_TAG: &str = "student";
const SUBJECT_TAG: &str = "subject";
const GRADE_TAG: &str = "grade";

// ============================================================================
// IMPORT MODE / REPORT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportMode {
    /// Imported data becomes the whole system
    Replace,
    /// Imported entities overwrite same-code records; grades are appended
    Merge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub mode: ImportMode,
    pub students: usize,
    pub subjects: usize,
    pub professors: usize,
    pub grades: usize,
}

impl ImportReport {
    pub fn message(&self) -> String {
        format!(
            "Imported {} students, {} subjects, {} professors and {} grade entries",
            self.students, self.subjects, self.professors, self.grades
        )
    }
}

// ============================================================================
// EXPORT
// ============================================================================

/// Write the whole system to `path`, replacing it atomically.
pub fn export_all(system: &AcademicSystem, path: &Path) -> Result<()> {
    replace_file(path, |file| write_csv(system, file))?;

    info!(
        path = %path.display(),
        students = system.students().len(),
        subjects = system.subjects().len(),
        professors = system.professors().len(),
        grades = system.grades().len(),
        "exported academic records"
    );
    Ok(())
}

/// The content goes to a sibling temp file that is renamed over `path`, so a
/// failed write leaves the old file intact.
pub(crate) fn replace_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn write_csv<W: Write>(system: &AcademicSystem, mut out: W) -> Result<()> {
    section(&mut out, "# professor,code,name,email,phone,specialty", |wtr| {
        for p in system.professors().iter() {
            wtr.write_record([
                PROFESSOR_TAG,
                p.code.as_str(),
                p.name.as_str(),
                p.email.as_str(),
                p.phone.as_str(),
                p.specialty.as_str(),
            ])?;
        }
        Ok(())
    })?;

    section(&mut out, "# student,code,name,program,email,phone", |wtr| {
        for s in system.students().iter() {
            wtr.write_record([
                STUDENT_TAG,
                s.code.as_str(),
                s.name.as_str(),
                s.program.as_str(),
                s.email.as_str(),
                s.phone.as_str(),
            ])?;
        }
        Ok(())
    })?;

    section(&mut out, "# subject,code,name,credits,professor", |wtr| {
        for s in system.subjects().iter() {
            let credits = s.credits.to_string();
            let professor = s.professor.as_deref().unwrap_or("");
            wtr.write_record([
                SUBJECT_TAG,
                s.code.as_str(),
                s.name.as_str(),
                credits.as_str(),
                professor,
            ])?;
        }
        Ok(())
    })?;

    section(&mut out, "# grade,student,subject,score,weight,date,description", |wtr| {
        for g in system.grades().all() {
            let score = g.score.to_string();
            let weight = g.weight.to_string();
            let date = g.date.format(DATE_FORMAT).to_string();
            wtr.write_record([
                GRADE_TAG,
                g.student.as_str(),
                g.subject.as_str(),
                score.as_str(),
                weight.as_str(),
                date.as_str(),
                g.description.as_str(),
            ])?;
        }
        Ok(())
    })?;

    out.flush()?;
    Ok(())
}

/// One kind's block: a raw `#` legend line (never quoted), then its records
fn section<W, F>(out: &mut W, legend: &str, write_rows: F) -> Result<()>
where
    W: Write,
    F: FnOnce(&mut csv::Writer<&mut W>) -> Result<()>,
{
    out.write_all(legend.as_bytes())?;
    out.write_all(b"\n")?;

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(out);
    write_rows(&mut wtr)?;
    wtr.flush()?;
    Ok(())
}

// ============================================================================
// IMPORT
// ============================================================================

/// Parsed rows, each tagged with its source line for error reporting
#[derive(Debug, Default)]
struct ParsedRows {
    professors: Vec<(u64, Professor)>,
    students: Vec<(u64, Student)>,
    subjects: Vec<(u64, Subject)>,
    grades: Vec<(u64, GradeEntry)>,
}

/// Import `path` into `system`. On any failure `system` is left untouched and
/// the error names the offending line.
pub fn import_all(system: &mut AcademicSystem, path: &Path, mode: ImportMode) -> Result<ImportReport> {
    let file = fs::File::open(path)?;
    match import_from_reader(system, file, mode) {
        Ok(report) => {
            info!(path = %path.display(), mode = ?mode, "{}", report.message());
            Ok(report)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "import rejected");
            Err(err)
        }
    }
}

pub fn import_from_reader<R: io::Read>(
    system: &mut AcademicSystem,
    reader: R,
    mode: ImportMode,
) -> Result<ImportReport> {
    let rows = parse_rows(reader)?;

    let mut staged = match mode {
        ImportMode::Replace => AcademicSystem::new(),
        ImportMode::Merge => system.clone(),
    };
    let report = apply_rows(&mut staged, rows, mode)?;

    // Stage is fully valid: swap it in
    *system = staged;
    Ok(report)
}

/// Load a data file into a fresh system
pub fn load(path: &Path) -> Result<AcademicSystem> {
    let mut system = AcademicSystem::new();
    import_all(&mut system, path, ImportMode::Replace)?;
    Ok(system)
}

fn parse_rows<R: io::Read>(reader: R) -> Result<ParsedRows> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut rows = ParsedRows::default();
    for result in rdr.records() {
        let record = result.map_err(|e| RecordsError::Import {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: e.to_string(),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row = Row { record: &record, line };

        match row.field(0)?.trim() {
            "" if record.len() == 1 => continue,
            PROFESSOR_TAG => {
                row.expect_len(6)?;
                rows.professors.push((
                    line,
                    Professor {
                        code: row.field(1)?.to_string(),
                        name: row.field(2)?.to_string(),
                        email: row.field(3)?.to_string(),
                        phone: row.field(4)?.to_string(),
                        specialty: row.field(5)?.to_string(),
                    },
                ));
            }
            STUDENT_TAG => {
                row.expect_len(6)?;
                rows.students.push((
                    line,
                    Student {
                        code: row.field(1)?.to_string(),
                        name: row.field(2)?.to_string(),
                        program: row.field(3)?.to_string(),
                        email: row.field(4)?.to_string(),
                        phone: row.field(5)?.to_string(),
                    },
                ));
            }
            SUBJECT_TAG => {
                row.expect_len(5)?;
                let professor = row.field(4)?;
                rows.subjects.push((
                    line,
                    Subject {
                        code: row.field(1)?.to_string(),
                        name: row.field(2)?.to_string(),
                        credits: row.parse("credits", 3)?,
                        professor: if professor.is_empty() {
                            None
                        } else {
                            Some(professor.to_string())
                        },
                    },
                ));
            }
            GRADE_TAG => {
                row.expect_len(7)?;
                let date = NaiveDate::parse_from_str(row.field(5)?.trim(), DATE_FORMAT)
                    .map_err(|e| row.error(format!("invalid date '{}': {}", row.field(5).unwrap_or(""), e)))?;
                rows.grades.push((
                    line,
                    GradeEntry {
                        student: row.field(1)?.to_string(),
                        subject: row.field(2)?.to_string(),
                        score: row.parse("score", 3)?,
                        weight: row.parse("weight", 4)?,
                        date,
                        description: row.field(6)?.to_string(),
                    },
                ));
            }
            other => return Err(row.error(format!("unknown record kind '{}'", other))),
        }
    }
    Ok(rows)
}

fn apply_rows(staged: &mut AcademicSystem, rows: ParsedRows, mode: ImportMode) -> Result<ImportReport> {
    let report = ImportReport {
        mode,
        students: rows.students.len(),
        subjects: rows.subjects.len(),
        professors: rows.professors.len(),
        grades: rows.grades.len(),
    };

    // Parents first so references may point forward within the file
    let mut seen = HashSet::new();
    for (line, professor) in rows.professors {
        check_unique(&mut seen, &professor, line)?;
        staged.professors_mut().upsert(professor).map_err(|e| at_line(line, e))?;
    }

    seen.clear();
    for (line, student) in rows.students {
        check_unique(&mut seen, &student, line)?;
        staged.students_mut().upsert(student).map_err(|e| at_line(line, e))?;
    }

    seen.clear();
    for (line, subject) in rows.subjects {
        check_unique(&mut seen, &subject, line)?;
        if let Some(professor) = &subject.professor {
            if staged.professor(professor).is_none() {
                return Err(at_line(
                    line,
                    RecordsError::DanglingReference {
                        kind: EntityKind::Professor,
                        code: professor.clone(),
                        referenced_by: format!("subject '{}'", subject.code),
                    },
                ));
            }
        }
        staged.subjects_mut().upsert(subject).map_err(|e| at_line(line, e))?;
    }

    for (line, grade) in rows.grades {
        staged.add_grade(grade).map_err(|e| at_line(line, e))?;
    }

    // Merged-over subjects may have dropped professors other subjects still use;
    // a final sweep keeps the stage honest.
    staged.check_integrity().map_err(|e| at_line(0, e))?;
    Ok(report)
}

fn check_unique<T: Record>(seen: &mut HashSet<String>, record: &T, line: u64) -> Result<()> {
    if !seen.insert(record.code().to_string()) {
        return Err(at_line(
            line,
            RecordsError::DuplicateKey {
                kind: T::KIND,
                code: record.code().to_string(),
            },
        ));
    }
    Ok(())
}

fn at_line(line: u64, err: RecordsError) -> RecordsError {
    RecordsError::Import {
        line,
        reason: err.to_string(),
    }
}

struct Row<'r> {
    record: &'r StringRecord,
    line: u64,
}

impl<'r> Row<'r> {
    fn field(&self, index: usize) -> Result<&'r str> {
        self.record
            .get(index)
            .ok_or_else(|| self.error(format!("missing field {}", index + 1)))
    }

    fn expect_len(&self, len: usize) -> Result<()> {
        if self.record.len() != len {
            return Err(self.error(format!(
                "expected {} fields, found {}",
                len,
                self.record.len()
            )));
        }
        Ok(())
    }

    fn parse<T: std::str::FromStr>(&self, name: &str, index: usize) -> Result<T> {
        let raw = self.field(index)?;
        raw.trim()
            .parse()
            .map_err(|_| self.error(format!("invalid {} '{}'", name, raw)))
    }

    fn error(&self, reason: String) -> RecordsError {
        RecordsError::Import {
            line: self.line,
            reason,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
