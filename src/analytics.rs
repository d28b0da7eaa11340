// 📊 Analytics Engine - averages, rankings, risk lists and summaries
//
// Every query is recomputed from the current registries and ledger on each
// call. Nothing is cached, so there is nothing to invalidate after a mutation.
//
// "No data" is `None`: a student without grade entries has no average, is
// never ranked and is never at risk.

use crate::entities::{Professor, Student, Subject};
use crate::ledger::{GradeEntry, MAX_SCORE, MIN_SCORE};
use crate::system::AcademicSystem;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Threshold used for the at-risk count in `SystemSummary`
pub const REFERENCE_RISK_THRESHOLD: f64 = 3.0;

// ============================================================================
// RESULT SHAPES
// ============================================================================

/// (code, average) pair used by rankings, risk lists and best/worst lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub code: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSummary {
    pub total_students: usize,
    pub total_subjects: usize,
    pub total_professors: usize,
    pub total_grades: usize,

    /// Mean of every score in the ledger (None when the ledger is empty)
    pub overall_mean: Option<f64>,

    /// Students below `REFERENCE_RISK_THRESHOLD`
    pub at_risk_count: usize,

    pub best_student: Option<Standing>,
    pub worst_student: Option<Standing>,
    pub best_subject: Option<Standing>,
    pub worst_subject: Option<Standing>,
}

impl SystemSummary {
    pub fn summary(&self) -> String {
        let mean = self
            .overall_mean
            .map(|m| format!("{:.2}", m))
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "Students: {}, Subjects: {}, Professors: {}, Grades: {}, Mean: {}, At risk: {}",
            self.total_students,
            self.total_subjects,
            self.total_professors,
            self.total_grades,
            mean,
            self.at_risk_count
        )
    }
}

// ============================================================================
// PERFORMANCE BANDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceBand {
    /// 4.5 and above
    Excellent,
    /// 4.0 up to 4.5
    Good,
    /// 3.0 up to 4.0
    Fair,
    /// Below 3.0
    Failing,
}

impl PerformanceBand {
    pub fn classify(score: f64) -> Self {
        if score >= 4.5 {
            PerformanceBand::Excellent
        } else if score >= 4.0 {
            PerformanceBand::Good
        } else if score >= 3.0 {
            PerformanceBand::Fair
        } else {
            PerformanceBand::Failing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceBand::Excellent => "Excellent",
            PerformanceBand::Good => "Good",
            PerformanceBand::Fair => "Fair",
            PerformanceBand::Failing => "Failing",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeDistribution {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub failing: usize,
}

impl GradeDistribution {
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut dist = GradeDistribution::default();
        for score in scores {
            match PerformanceBand::classify(score) {
                PerformanceBand::Excellent => dist.excellent += 1,
                PerformanceBand::Good => dist.good += 1,
                PerformanceBand::Fair => dist.fair += 1,
                PerformanceBand::Failing => dist.failing += 1,
            }
        }
        dist
    }

    pub fn total(&self) -> usize {
        self.excellent + self.good + self.fair + self.failing
    }
}

// ============================================================================
// SUBJECT STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectStatus {
    NoGrades,
    NoProfessor,
    /// Average 4.0 and above
    Excellent,
    /// Average 3.0 up to 4.0
    Good,
    NeedsAttention,
}

impl SubjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectStatus::NoGrades => "No grades",
            SubjectStatus::NoProfessor => "No professor",
            SubjectStatus::Excellent => "Excellent",
            SubjectStatus::Good => "Good",
            SubjectStatus::NeedsAttention => "Needs attention",
        }
    }
}

// ============================================================================
// DETAIL / AUXILIARY SHAPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentReport {
    pub student: Student,
    pub entries: Vec<GradeEntry>,
    pub average: Option<f64>,
    pub weighted_average: Option<f64>,
    pub distribution: GradeDistribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectReport {
    pub subject: Subject,
    pub professor: Option<Professor>,
    pub entries: Vec<GradeEntry>,
    pub average: Option<f64>,
    pub distribution: GradeDistribution,
    pub status: SubjectStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverage {
    /// Calendar month as `YYYY-MM`
    pub month: String,
    pub average: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramAverage {
    pub program: String,
    pub average: f64,
    pub students: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessorLoad {
    pub code: String,
    pub name: String,
    pub subjects: usize,
    pub credits: u32,
}

// ============================================================================
// ANALYTICS ENGINE
// ============================================================================

/// Read-only view over an `AcademicSystem`. Cheap to construct; build one
/// per query batch (e.g. per redraw).
pub struct AnalyticsEngine<'a> {
    system: &'a AcademicSystem,
}

impl<'a> AnalyticsEngine<'a> {
    pub fn new(system: &'a AcademicSystem) -> Self {
        AnalyticsEngine { system }
    }

    /// Arithmetic mean of the student's scores
    pub fn average_for_student(&self, code: &str) -> Option<f64> {
        mean(self.system.grades().by_student(code).map(|e| e.score))
    }

    /// sum(score * weight) / sum(weight); falls back to the plain mean when
    /// all weights are zero.
    pub fn weighted_average_for_student(&self, code: &str) -> Option<f64> {
        let entries: Vec<&GradeEntry> = self.system.grades().by_student(code).collect();
        weighted_average(&entries)
    }

    pub fn average_for_subject(&self, code: &str) -> Option<f64> {
        mean(self.system.grades().by_subject(code).map(|e| e.score))
    }

    /// Students with at least one grade, by descending average (ties: code ascending)
    pub fn rank_students(&self) -> Vec<Standing> {
        let mut ranking = self.student_standings();
        ranking.sort_by(|a, b| {
            b.average
                .total_cmp(&a.average)
                .then_with(|| a.code.cmp(&b.code))
        });
        ranking
    }

    /// Students whose average is strictly below `threshold`, lowest first
    pub fn students_at_risk(&self, threshold: f64) -> Vec<Standing> {
        let mut at_risk: Vec<Standing> = self
            .student_standings()
            .into_iter()
            .filter(|s| s.average < threshold)
            .collect();
        at_risk.sort_by(ascending);
        at_risk
    }

    pub fn system_summary(&self) -> SystemSummary {
        let grades = self.system.grades().all();
        let students = self.student_standings();
        let subjects = self.subject_standings();

        SystemSummary {
            total_students: self.system.students().len(),
            total_subjects: self.system.subjects().len(),
            total_professors: self.system.professors().len(),
            total_grades: grades.len(),
            overall_mean: mean(grades.iter().map(|e| e.score)),
            at_risk_count: students
                .iter()
                .filter(|s| s.average < REFERENCE_RISK_THRESHOLD)
                .count(),
            best_student: best(&students),
            worst_student: worst(&students),
            best_subject: best(&subjects),
            worst_subject: worst(&subjects),
        }
    }

    // ========================================================================
    // SUPPLEMENTARY STATISTICS
    // ========================================================================

    pub fn subject_status(&self, code: &str) -> Option<SubjectStatus> {
        let subject = self.system.subject(code)?;
        let status = match self.average_for_subject(code) {
            None => SubjectStatus::NoGrades,
            Some(_) if subject.professor.is_none() => SubjectStatus::NoProfessor,
            Some(avg) if avg >= 4.0 => SubjectStatus::Excellent,
            Some(avg) if avg >= 3.0 => SubjectStatus::Good,
            Some(_) => SubjectStatus::NeedsAttention,
        };
        Some(status)
    }

    pub fn grade_distribution(&self) -> GradeDistribution {
        GradeDistribution::from_scores(self.system.grades().all().iter().map(|e| e.score))
    }

    pub fn student_report(&self, code: &str) -> Option<StudentReport> {
        let student = self.system.student(code)?.clone();
        let entries: Vec<GradeEntry> = self.system.grades().by_student(code).cloned().collect();
        let refs: Vec<&GradeEntry> = entries.iter().collect();

        Some(StudentReport {
            average: mean(entries.iter().map(|e| e.score)),
            weighted_average: weighted_average(&refs),
            distribution: GradeDistribution::from_scores(entries.iter().map(|e| e.score)),
            student,
            entries,
        })
    }

    pub fn subject_report(&self, code: &str) -> Option<SubjectReport> {
        let subject = self.system.subject(code)?.clone();
        let status = self.subject_status(code)?;
        let professor = subject
            .professor
            .as_deref()
            .and_then(|p| self.system.professor(p))
            .cloned();
        let entries: Vec<GradeEntry> = self.system.grades().by_subject(code).cloned().collect();

        Some(SubjectReport {
            average: mean(entries.iter().map(|e| e.score)),
            distribution: GradeDistribution::from_scores(entries.iter().map(|e| e.score)),
            subject,
            professor,
            entries,
            status,
        })
    }

    /// Mean score per calendar month, oldest first
    pub fn monthly_averages(&self) -> Vec<MonthlyAverage> {
        let mut by_month: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
        for entry in self.system.grades().all() {
            by_month
                .entry((entry.date.year(), entry.date.month()))
                .or_default()
                .push(entry.score);
        }

        by_month
            .into_iter()
            .filter_map(|((year, month), scores)| {
                let count = scores.len();
                mean(scores.into_iter()).map(|average| MonthlyAverage {
                    month: format!("{:04}-{:02}", year, month),
                    average,
                    count,
                })
            })
            .collect()
    }

    /// Equal-width bins over the grading scale; the top edge falls in the last bin
    pub fn score_histogram(&self, bins: usize) -> Vec<HistogramBin> {
        if bins == 0 {
            return Vec::new();
        }
        let width = (MAX_SCORE - MIN_SCORE) / bins as f64;
        let mut histogram: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: MIN_SCORE + width * i as f64,
                upper: MIN_SCORE + width * (i + 1) as f64,
                count: 0,
            })
            .collect();

        for entry in self.system.grades().all() {
            let index = (((entry.score - MIN_SCORE) / width) as usize).min(bins - 1);
            histogram[index].count += 1;
        }
        histogram
    }

    /// Mean of student averages per program (students without grades excluded)
    pub fn program_averages(&self) -> Vec<ProgramAverage> {
        let mut by_program: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for student in self.system.students().iter() {
            if let Some(avg) = self.average_for_student(&student.code) {
                by_program.entry(student.program.as_str()).or_default().push(avg);
            }
        }

        by_program
            .into_iter()
            .filter_map(|(program, averages)| {
                let students = averages.len();
                mean(averages.into_iter()).map(|average| ProgramAverage {
                    program: program.to_string(),
                    average,
                    students,
                })
            })
            .collect()
    }

    pub fn professor_load(&self) -> Vec<ProfessorLoad> {
        self.system
            .professors()
            .iter()
            .map(|p| {
                let subjects = self.system.subjects_for_professor(&p.code);
                ProfessorLoad {
                    code: p.code.clone(),
                    name: p.name.clone(),
                    subjects: subjects.len(),
                    credits: subjects.iter().map(|s| s.credits).sum(),
                }
            })
            .collect()
    }

    fn student_standings(&self) -> Vec<Standing> {
        self.system
            .students()
            .iter()
            .filter_map(|s| {
                self.average_for_student(&s.code).map(|average| Standing {
                    code: s.code.clone(),
                    average,
                })
            })
            .collect()
    }

    fn subject_standings(&self) -> Vec<Standing> {
        self.system
            .subjects()
            .iter()
            .filter_map(|s| {
                self.average_for_subject(&s.code).map(|average| Standing {
                    code: s.code.clone(),
                    average,
                })
            })
            .collect()
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn mean<I>(values: I) -> Option<f64>
where
    I: Iterator<Item = f64>,
{
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

fn weighted_average(entries: &[&GradeEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total_weight: f64 = entries.iter().map(|e| e.weight).sum();
    if total_weight <= 0.0 {
        return mean(entries.iter().map(|e| e.score));
    }
    let weighted: f64 = entries.iter().map(|e| e.score * e.weight).sum();
    Some(weighted / total_weight)
}

fn ascending(a: &Standing, b: &Standing) -> Ordering {
    a.average
        .total_cmp(&b.average)
        .then_with(|| a.code.cmp(&b.code))
}

fn best(standings: &[Standing]) -> Option<Standing> {
    standings
        .iter()
        .min_by(|a, b| {
            b.average
                .total_cmp(&a.average)
                .then_with(|| a.code.cmp(&b.code))
        })
        .cloned()
}

fn worst(standings: &[Standing]) -> Option<Standing> {
    standings.iter().min_by(|a, b| ascending(a, b)).cloned()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn system_with_grades(grades: &[(&str, &str, f64, f64)]) -> AcademicSystem {
        let mut system = AcademicSystem::new();
        system
            .add_professor(Professor::new("P1", "Dr. Ruiz"))
            .unwrap();
        for (code, program) in [("S1", "Engineering"), ("S2", "Law"), ("S3", "Engineering")] {
            system
                .add_student(Student::new(code, format!("Student {}", code), program))
                .unwrap();
        }
        system
            .add_subject(Subject::new("M1", "Calculus", 3).with_professor("P1"))
            .unwrap();
        system
            .add_subject(Subject::new("M2", "Physics", 4))
            .unwrap();
        for (student, subject, score, weight) in grades {
            system
                .add_grade(GradeEntry::new(*student, *subject, *score, *weight, date(3, 1)))
                .unwrap();
        }
        system
    }

    #[test]
    fn test_scenario_equal_weights() {
        let system = system_with_grades(&[("S1", "M1", 4.0, 50.0), ("S1", "M1", 5.0, 50.0)]);
        let engine = AnalyticsEngine::new(&system);

        assert_eq!(engine.average_for_student("S1"), Some(4.5));
        assert_eq!(engine.weighted_average_for_student("S1"), Some(4.5));
    }

    #[test]
    fn test_average_without_grades_is_none() {
        let system = system_with_grades(&[("S1", "M1", 4.0, 50.0)]);
        let engine = AnalyticsEngine::new(&system);

        assert_eq!(engine.average_for_student("S2"), None);
        assert_eq!(engine.weighted_average_for_student("S2"), None);
        assert_eq!(engine.average_for_subject("M2"), None);
    }

    #[test]
    fn test_weighted_average_uses_weights() {
        let system = system_with_grades(&[("S1", "M1", 2.0, 25.0), ("S1", "M2", 4.0, 75.0)]);
        let engine = AnalyticsEngine::new(&system);

        assert_eq!(engine.average_for_student("S1"), Some(3.0));
        assert_eq!(engine.weighted_average_for_student("S1"), Some(3.5));
    }

    #[test]
    fn test_zero_weights_fall_back_to_mean() {
        let system = system_with_grades(&[("S1", "M1", 2.0, 0.0), ("S1", "M2", 3.5, 0.0)]);
        let engine = AnalyticsEngine::new(&system);

        assert_eq!(
            engine.weighted_average_for_student("S1"),
            engine.average_for_student("S1")
        );
    }

    #[test]
    fn test_subject_average() {
        let system = system_with_grades(&[
            ("S1", "M1", 4.0, 50.0),
            ("S2", "M1", 2.0, 50.0),
            ("S3", "M2", 5.0, 50.0),
        ]);
        let engine = AnalyticsEngine::new(&system);

        assert_eq!(engine.average_for_subject("M1"), Some(3.0));
        assert_eq!(engine.average_for_subject("M2"), Some(5.0));
    }

    #[test]
    fn test_rank_students_descending_with_code_tiebreak() {
        let system = system_with_grades(&[
            ("S3", "M1", 4.0, 50.0),
            ("S1", "M1", 4.0, 50.0),
            ("S2", "M1", 4.8, 50.0),
        ]);
        let engine = AnalyticsEngine::new(&system);

        let ranking = engine.rank_students();
        let codes: Vec<&str> = ranking.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["S2", "S1", "S3"]);
        for pair in ranking.windows(2) {
            assert!(pair[0].average >= pair[1].average);
        }
    }

    #[test]
    fn test_rank_skips_students_without_grades() {
        let system = system_with_grades(&[("S1", "M1", 4.0, 50.0)]);
        let engine = AnalyticsEngine::new(&system);

        assert_eq!(engine.rank_students().len(), 1);
    }

    #[test]
    fn test_students_at_risk_strict_threshold() {
        let system = system_with_grades(&[("S1", "M1", 2.9, 50.0), ("S2", "M1", 3.0, 50.0)]);
        let engine = AnalyticsEngine::new(&system);

        let at_risk = engine.students_at_risk(3.0);
        assert_eq!(at_risk.len(), 1);
        assert_eq!(at_risk[0].code, "S1");
        assert_eq!(at_risk[0].average, 2.9);
    }

    #[test]
    fn test_students_at_risk_is_monotonic() {
        let system = system_with_grades(&[
            ("S1", "M1", 1.5, 50.0),
            ("S2", "M1", 3.2, 50.0),
            ("S3", "M1", 4.1, 50.0),
        ]);
        let engine = AnalyticsEngine::new(&system);

        let mut previous = 0;
        for threshold in [0.0, 1.5, 2.0, 3.2, 3.5, 4.5, 5.1] {
            let count = engine.students_at_risk(threshold).len();
            assert!(count >= previous);
            previous = count;
        }
        assert_eq!(previous, 3);
    }

    #[test]
    fn test_system_summary() {
        let system = system_with_grades(&[
            ("S1", "M1", 4.0, 50.0),
            ("S2", "M1", 2.0, 50.0),
            ("S3", "M2", 5.0, 50.0),
        ]);
        let engine = AnalyticsEngine::new(&system);

        let summary = engine.system_summary();
        assert_eq!(summary.total_students, 3);
        assert_eq!(summary.total_subjects, 2);
        assert_eq!(summary.total_professors, 1);
        assert_eq!(summary.total_grades, 3);
        assert_eq!(summary.overall_mean, Some(11.0 / 3.0));
        assert_eq!(summary.at_risk_count, 1);
        assert_eq!(summary.best_student.unwrap().code, "S3");
        assert_eq!(summary.worst_student.unwrap().code, "S2");
        assert_eq!(summary.best_subject.unwrap().code, "M2");
        assert_eq!(summary.worst_subject.unwrap().code, "M1");
    }

    #[test]
    fn test_system_summary_empty_state() {
        let system = AcademicSystem::new();
        let summary = AnalyticsEngine::new(&system).system_summary();

        assert_eq!(summary.total_grades, 0);
        assert_eq!(summary.overall_mean, None);
        assert_eq!(summary.at_risk_count, 0);
        assert!(summary.best_student.is_none());
        assert!(summary.worst_subject.is_none());
        assert!(summary.summary().contains("Mean: n/a"));
    }

    #[test]
    fn test_best_and_worst_tie_break_by_code() {
        let system = system_with_grades(&[("S2", "M1", 4.0, 50.0), ("S1", "M2", 4.0, 50.0)]);
        let summary = AnalyticsEngine::new(&system).system_summary();

        assert_eq!(summary.best_student.unwrap().code, "S1");
        assert_eq!(summary.worst_student.unwrap().code, "S1");
        assert_eq!(summary.best_subject.unwrap().code, "M1");
    }

    #[test]
    fn test_performance_bands() {
        assert_eq!(PerformanceBand::classify(5.0), PerformanceBand::Excellent);
        assert_eq!(PerformanceBand::classify(4.5), PerformanceBand::Excellent);
        assert_eq!(PerformanceBand::classify(4.2), PerformanceBand::Good);
        assert_eq!(PerformanceBand::classify(3.0), PerformanceBand::Fair);
        assert_eq!(PerformanceBand::classify(2.99), PerformanceBand::Failing);

        let dist = GradeDistribution::from_scores(vec![4.7, 4.0, 3.3, 1.0, 0.5]);
        assert_eq!(dist.excellent, 1);
        assert_eq!(dist.good, 1);
        assert_eq!(dist.fair, 1);
        assert_eq!(dist.failing, 2);
        assert_eq!(dist.total(), 5);
    }

    #[test]
    fn test_subject_status() {
        let system = system_with_grades(&[("S1", "M1", 2.0, 50.0), ("S1", "M2", 4.0, 50.0)]);
        let engine = AnalyticsEngine::new(&system);

        assert_eq!(engine.subject_status("M1"), Some(SubjectStatus::NeedsAttention));
        // M2 has grades but no professor
        assert_eq!(engine.subject_status("M2"), Some(SubjectStatus::NoProfessor));
        assert_eq!(engine.subject_status("M9"), None);

        let empty = system_with_grades(&[]);
        assert_eq!(
            AnalyticsEngine::new(&empty).subject_status("M1"),
            Some(SubjectStatus::NoGrades)
        );
    }

    #[test]
    fn test_monthly_averages() {
        let mut system = system_with_grades(&[]);
        system
            .add_grade(GradeEntry::new("S1", "M1", 4.0, 50.0, date(4, 10)))
            .unwrap();
        system
            .add_grade(GradeEntry::new("S1", "M1", 2.0, 50.0, date(3, 5)))
            .unwrap();
        system
            .add_grade(GradeEntry::new("S2", "M1", 3.0, 50.0, date(4, 28)))
            .unwrap();

        let months = AnalyticsEngine::new(&system).monthly_averages();
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2024-03");
        assert_eq!(months[0].average, 2.0);
        assert_eq!(months[1].month, "2024-04");
        assert_eq!(months[1].average, 3.5);
        assert_eq!(months[1].count, 2);
    }

    #[test]
    fn test_score_histogram() {
        let system = system_with_grades(&[
            ("S1", "M1", 0.0, 50.0),
            ("S1", "M1", 2.4, 50.0),
            ("S2", "M1", 2.6, 50.0),
            ("S3", "M1", 5.0, 50.0),
        ]);
        let engine = AnalyticsEngine::new(&system);

        let histogram = engine.score_histogram(2);
        assert_eq!(histogram.len(), 2);
        assert_eq!(histogram[0].count, 2);
        assert_eq!(histogram[1].count, 2);
        assert_eq!(histogram[1].upper, 5.0);

        let total: usize = engine.score_histogram(10).iter().map(|b| b.count).sum();
        assert_eq!(total, 4);
        assert!(engine.score_histogram(0).is_empty());
    }

    #[test]
    fn test_program_averages() {
        let system = system_with_grades(&[
            ("S1", "M1", 4.0, 50.0),
            ("S3", "M1", 2.0, 50.0),
            ("S2", "M1", 5.0, 50.0),
        ]);

        let programs = AnalyticsEngine::new(&system).program_averages();
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].program, "Engineering");
        assert_eq!(programs[0].average, 3.0);
        assert_eq!(programs[0].students, 2);
        assert_eq!(programs[1].program, "Law");
    }

    #[test]
    fn test_reports_and_professor_load() {
        let system = system_with_grades(&[("S1", "M1", 4.6, 40.0), ("S1", "M2", 3.0, 60.0)]);
        let engine = AnalyticsEngine::new(&system);

        let report = engine.student_report("S1").unwrap();
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.distribution.excellent, 1);
        assert!(report.weighted_average.unwrap() < report.average.unwrap());
        assert!(engine.student_report("S9").is_none());

        let subject = engine.subject_report("M1").unwrap();
        assert_eq!(subject.professor.unwrap().code, "P1");
        assert_eq!(subject.status, SubjectStatus::Excellent);

        let load = engine.professor_load();
        assert_eq!(load.len(), 1);
        assert_eq!(load[0].subjects, 1);
        assert_eq!(load[0].credits, 3);
    }
}
