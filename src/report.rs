// 📄 Statistics Report - plain-text snapshot of the system's analytics
//
// Totals, system mean, the top of the ranking and the at-risk list, stamped
// with the local time it was generated.

use crate::analytics::{AnalyticsEngine, Standing};
use crate::interchange::replace_file;
use crate::system::AcademicSystem;
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::Path;
use tracing::info;

const RULE: &str = "============================================================";

pub fn render_report(system: &AcademicSystem, risk_threshold: f64, top_n: usize) -> String {
    render_report_at(system, risk_threshold, top_n, Local::now())
}

pub fn render_report_at(
    system: &AcademicSystem,
    risk_threshold: f64,
    top_n: usize,
    generated_at: DateTime<Local>,
) -> String {
    let engine = AnalyticsEngine::new(system);
    let summary = engine.system_summary();
    let ranking = engine.rank_students();
    let at_risk = engine.students_at_risk(risk_threshold);
    let distribution = engine.grade_distribution();

    let mut lines = vec![
        RULE.to_string(),
        "ACADEMIC RECORDS - STATISTICS REPORT".to_string(),
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        RULE.to_string(),
        String::new(),
        "TOTALS".to_string(),
        format!("  Students:      {}", summary.total_students),
        format!("  Subjects:      {}", summary.total_subjects),
        format!("  Professors:    {}", summary.total_professors),
        format!("  Grade entries: {}", summary.total_grades),
        match summary.overall_mean {
            Some(mean) => format!("  System mean:   {:.2}", mean),
            None => "  System mean:   n/a (no grades recorded)".to_string(),
        },
        format!(
            "  Distribution:  {} excellent, {} good, {} fair, {} failing",
            distribution.excellent, distribution.good, distribution.fair, distribution.failing
        ),
        String::new(),
        format!("TOP {} STUDENTS", ranking.len().min(top_n)),
    ];

    if ranking.is_empty() {
        lines.push("  (no graded students)".to_string());
    }
    for (rank, standing) in ranking.iter().take(top_n).enumerate() {
        lines.push(format!("  {:>3}. {}", rank + 1, describe(system, standing)));
    }
    lines.push(String::new());

    lines.push(format!(
        "STUDENTS AT RISK (average below {:.2}): {}",
        risk_threshold,
        at_risk.len()
    ));
    if at_risk.is_empty() {
        lines.push("  none".to_string());
    }
    for standing in &at_risk {
        lines.push(format!("  - {}", describe(system, standing)));
    }
    lines.push(RULE.to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render the report and write it to `path`, replacing any previous report
pub fn write_report(
    path: &Path,
    system: &AcademicSystem,
    risk_threshold: f64,
    top_n: usize,
) -> crate::error::Result<()> {
    let report = render_report(system, risk_threshold, top_n);
    replace_file(path, |file| Ok(file.write_all(report.as_bytes())?))?;
    info!(path = %path.display(), "statistics report written");
    Ok(())
}

fn describe(system: &AcademicSystem, standing: &Standing) -> String {
    match system.student(&standing.code) {
        Some(student) => format!(
            "{} {} ({}) - {:.2}",
            student.code, student.name, student.program, standing.average
        ),
        None => format!("{} - {:.2}", standing.code, standing.average),
    }
}

// ============================================================================
// TESTS
// ============================================================================
