// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use academic_records::{
    interchange, render_report, write_report, AcademicSystem, AnalyticsEngine, Config,
    EntityKind, GradeEntry, ImportMode, Professor, RecordsError, Student, Subject,
};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "academic-records", version, about = "Student, subject and grade records")]
struct Cli {
    /// Interchange CSV holding the records (overrides the config file)
    #[arg(long, global = true, env = "ACADEMIC_RECORDS_DATA")]
    data: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// System summary: totals, mean, best/worst, at-risk count
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Students ordered by average, best first
    Ranking,

    /// Students whose average is below the threshold
    Risk {
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// List students, optionally filtered by a search term or a program
    Students {
        /// Case-insensitive match on code, name or program
        #[arg(long, conflicts_with = "program")]
        search: Option<String>,
        /// Exact program name
        #[arg(long)]
        program: Option<String>,
    },

    /// One student's grade entries (with ledger positions) and averages
    Student { code: String },

    /// One subject's professor, grade entries and status
    Subject { code: String },

    /// Mean of student averages per program
    Programs,

    /// Mean score per calendar month
    Trends,

    /// Score counts in equal-width bins over the grading scale
    Histogram {
        #[arg(long, default_value_t = 10)]
        bins: usize,
    },

    /// Plain-text statistics report (stdout unless --out is given)
    Report {
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Load records from a CSV file (all-or-nothing)
    Import {
        file: PathBuf,
        /// Merge into the current records instead of replacing them
        #[arg(long)]
        merge: bool,
    },

    /// Write every record to a CSV file
    Export { file: PathBuf },

    AddStudent {
        code: String,
        name: String,
        program: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
    },

    AddProfessor {
        code: String,
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        specialty: String,
    },

    AddSubject {
        code: String,
        name: String,
        credits: u32,
        #[arg(long)]
        professor: Option<String>,
    },

    AddGrade {
        student: String,
        subject: String,
        score: f64,
        weight: f64,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a student and all of their grade entries
    DeleteStudent { code: String },

    /// Delete a subject and all of its grade entries
    DeleteSubject { code: String },

    /// Delete a professor (refused while still assigned to subjects)
    DeleteProfessor { code: String },

    /// Delete the grade entry at a ledger position (0-based)
    DeleteGrade { position: usize },

    /// Interactive read-only dashboard
    Ui,
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data) = &cli.data {
        config.data_file = data.clone();
    }
    debug!(?config, "configuration resolved");

    run(cli.command, &config)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "academic_records=debug"
    } else {
        "academic_records=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Stats { json } => run_stats(config, json),
        Command::Ranking => run_ranking(config),
        Command::Risk { threshold } => {
            run_risk(config, threshold.unwrap_or(config.risk_threshold))
        }
        Command::Students { search, program } => {
            run_students(config, search.as_deref(), program.as_deref())
        }
        Command::Student { code } => run_student(config, &code),
        Command::Subject { code } => run_subject(config, &code),
        Command::Programs => run_programs(config),
        Command::Trends => run_trends(config),
        Command::Histogram { bins } => run_histogram(config, bins),
        Command::Report { out } => run_report(config, out.as_deref()),
        Command::Import { file, merge } => run_import(config, &file, merge),
        Command::Export { file } => {
            let system = load_system(&config.data_file)?;
            interchange::export_all(&system, &file)
                .with_context(|| format!("Failed to export to {:?}", file))?;
            println!("✓ Exported records to {}", file.display());
            Ok(())
        }
        Command::AddStudent {
            code,
            name,
            program,
            email,
            phone,
        } => mutate(config, |system| {
            system.add_student(Student::new(code, name, program).with_contact(email, phone))?;
            Ok("✓ Student added".to_string())
        }),
        Command::AddProfessor {
            code,
            name,
            email,
            phone,
            specialty,
        } => mutate(config, |system| {
            system.add_professor(
                Professor::new(code, name)
                    .with_contact(email, phone)
                    .with_specialty(specialty),
            )?;
            Ok("✓ Professor added".to_string())
        }),
        Command::AddSubject {
            code,
            name,
            credits,
            professor,
        } => mutate(config, |system| {
            let mut subject = Subject::new(code, name, credits);
            if let Some(professor) = professor {
                subject = subject.with_professor(professor);
            }
            system.add_subject(subject)?;
            Ok("✓ Subject added".to_string())
        }),
        Command::AddGrade {
            student,
            subject,
            score,
            weight,
            date,
            description,
        } => {
            let date = match date {
                Some(raw) => NaiveDate::parse_from_str(&raw, interchange::DATE_FORMAT)
                    .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw))?,
                None => Local::now().date_naive(),
            };
            mutate(config, |system| {
                let entry = GradeEntry::new(student, subject, score, weight, date)
                    .with_description(description);
                let position = system.add_grade(entry)?;
                Ok(format!("✓ Grade entry added at position {}", position))
            })
        }
        Command::DeleteStudent { code } => mutate(config, |system| {
            let removal = system.delete_student(&code)?;
            Ok(format!(
                "✓ Student {} deleted ({} grade entries removed)",
                removal.record.code,
                removal.removed_grades.len()
            ))
        }),
        Command::DeleteSubject { code } => mutate(config, |system| {
            let removal = system.delete_subject(&code)?;
            Ok(format!(
                "✓ Subject {} deleted ({} grade entries removed)",
                removal.record.code,
                removal.removed_grades.len()
            ))
        }),
        Command::DeleteProfessor { code } => mutate(config, |system| {
            let professor = system.delete_professor(&code)?;
            Ok(format!("✓ Professor {} deleted", professor.code))
        }),
        Command::DeleteGrade { position } => mutate(config, |system| {
            let entry = system.delete_grade_at(position)?;
            Ok(format!(
                "✓ Grade entry {} deleted ({} / {} / {})",
                position, entry.student, entry.subject, entry.score
            ))
        }),
        Command::Ui => run_ui_mode(config),
    }
}

// =============================================================================
// DATA FILE
// =============================================================================

/// Missing data file means a fresh, empty system
fn load_system(path: &Path) -> Result<AcademicSystem> {
    if !path.exists() {
        info!(path = %path.display(), "data file not found, starting empty");
        return Ok(AcademicSystem::new());
    }
    interchange::load(path).with_context(|| format!("Failed to load data file {:?}", path))
}

fn save_system(system: &AcademicSystem, path: &Path) -> Result<()> {
    interchange::export_all(system, path)
        .with_context(|| format!("Failed to write data file {:?}", path))
}

/// Load, apply one change, write back. Nothing is written if the change fails.
fn mutate<F>(config: &Config, change: F) -> Result<()>
where
    F: FnOnce(&mut AcademicSystem) -> academic_records::Result<String>,
{
    let mut system = load_system(&config.data_file)?;
    let message = change(&mut system)?;
    save_system(&system, &config.data_file)?;
    println!("{}", message);
    Ok(())
}

// =============================================================================
// COMMANDS
// =============================================================================

fn run_stats(config: &Config, json: bool) -> Result<()> {
    let system = load_system(&config.data_file)?;
    let summary = AnalyticsEngine::new(&system).system_summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("📊 Academic Records Summary");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", summary.summary());
    let standing = |label: &str, s: &Option<academic_records::Standing>| match s {
        Some(s) => println!("{:<15} {} ({:.2})", label, s.code, s.average),
        None => println!("{:<15} n/a", label),
    };
    standing("Best student:", &summary.best_student);
    standing("Worst student:", &summary.worst_student);
    standing("Best subject:", &summary.best_subject);
    standing("Worst subject:", &summary.worst_subject);
    Ok(())
}

fn run_ranking(config: &Config) -> Result<()> {
    let system = load_system(&config.data_file)?;
    let ranking = AnalyticsEngine::new(&system).rank_students();

    if ranking.is_empty() {
        println!("No graded students yet");
    }
    for (i, standing) in ranking.iter().enumerate() {
        let name = system
            .student(&standing.code)
            .map(|s| s.name.as_str())
            .unwrap_or("");
        println!("{:>3}. {:<10} {:<30} {:.2}", i + 1, standing.code, name, standing.average);
    }
    Ok(())
}

fn run_risk(config: &Config, threshold: f64) -> Result<()> {
    let system = load_system(&config.data_file)?;
    let at_risk = AnalyticsEngine::new(&system).students_at_risk(threshold);

    println!("⚠️  Students below {:.2}: {}", threshold, at_risk.len());
    for standing in &at_risk {
        let name = system
            .student(&standing.code)
            .map(|s| s.name.as_str())
            .unwrap_or("");
        println!("  {:<10} {:<30} {:.2}", standing.code, name, standing.average);
    }
    Ok(())
}

fn run_students(config: &Config, search: Option<&str>, program: Option<&str>) -> Result<()> {
    let system = load_system(&config.data_file)?;
    let students: Vec<&Student> = match (search, program) {
        (Some(query), _) => system.search_students(query),
        (None, Some(program)) => system.students_in_program(program),
        (None, None) => system.students().iter().collect(),
    };

    if students.is_empty() {
        println!("No matching students");
    }
    for student in students {
        println!("{:<10} {:<30} {}", student.code, student.name, student.program);
    }
    Ok(())
}

fn run_student(config: &Config, code: &str) -> Result<()> {
    let system = load_system(&config.data_file)?;
    let report = AnalyticsEngine::new(&system)
        .student_report(code)
        .ok_or_else(|| RecordsError::NotFound {
            kind: EntityKind::Student,
            code: code.to_string(),
        })?;
    let positions = system.grades().positions_for_student(code);

    let student = &report.student;
    println!("👤 {} {} ({})", student.code, student.name, student.program);
    println!("Average:          {}", format_average(report.average));
    println!("Weighted average: {}", format_average(report.weighted_average));
    println!("Entries:          {}", report.entries.len());
    for (position, entry) in positions.iter().zip(&report.entries) {
        println!(
            "  #{:<4} {:<10} {:.2} ({:.0}%) {} {}",
            position,
            entry.subject,
            entry.score,
            entry.weight,
            entry.date.format(interchange::DATE_FORMAT),
            entry.description
        );
    }
    Ok(())
}

fn run_subject(config: &Config, code: &str) -> Result<()> {
    let system = load_system(&config.data_file)?;
    let report = AnalyticsEngine::new(&system)
        .subject_report(code)
        .ok_or_else(|| RecordsError::NotFound {
            kind: EntityKind::Subject,
            code: code.to_string(),
        })?;

    let subject = &report.subject;
    println!("📚 {} {} ({} credits)", subject.code, subject.name, subject.credits);
    match &report.professor {
        Some(professor) => println!("Professor: {} {}", professor.code, professor.name),
        None => println!("Professor: unassigned"),
    }
    println!("Average:   {}", format_average(report.average));
    println!("Status:    {}", report.status.as_str());
    let dist = &report.distribution;
    println!(
        "Scores:    {} excellent, {} good, {} fair, {} failing",
        dist.excellent, dist.good, dist.fair, dist.failing
    );
    for entry in &report.entries {
        println!("  {:<10} {:.2} ({:.0}%)", entry.student, entry.score, entry.weight);
    }
    Ok(())
}

fn run_programs(config: &Config) -> Result<()> {
    let system = load_system(&config.data_file)?;
    let programs = AnalyticsEngine::new(&system).program_averages();

    if programs.is_empty() {
        println!("No graded students yet");
    }
    for program in &programs {
        println!(
            "{:<30} {:.2} ({} students)",
            program.program, program.average, program.students
        );
    }
    Ok(())
}

fn run_trends(config: &Config) -> Result<()> {
    let system = load_system(&config.data_file)?;
    let months = AnalyticsEngine::new(&system).monthly_averages();

    if months.is_empty() {
        println!("No grades recorded yet");
    }
    for month in &months {
        println!("{}  {:.2} ({} entries)", month.month, month.average, month.count);
    }
    Ok(())
}

fn run_histogram(config: &Config, bins: usize) -> Result<()> {
    if bins == 0 {
        anyhow::bail!("--bins must be at least 1");
    }
    let system = load_system(&config.data_file)?;
    for bin in AnalyticsEngine::new(&system).score_histogram(bins) {
        println!(
            "{:.2}-{:.2}  {:>4}  {}",
            bin.lower,
            bin.upper,
            bin.count,
            "█".repeat(bin.count)
        );
    }
    Ok(())
}

fn format_average(average: Option<f64>) -> String {
    average.map_or_else(|| "n/a".to_string(), |a| format!("{:.2}", a))
}

fn run_report(config: &Config, out: Option<&Path>) -> Result<()> {
    let system = load_system(&config.data_file)?;
    match out {
        Some(path) => {
            write_report(path, &system, config.risk_threshold, config.report_top_n)
                .with_context(|| format!("Failed to write report {:?}", path))?;
            println!("✓ Report written to {}", path.display());
        }
        None => print!(
            "{}",
            render_report(&system, config.risk_threshold, config.report_top_n)
        ),
    }
    Ok(())
}

fn run_import(config: &Config, file: &Path, merge: bool) -> Result<()> {
    let mut system = load_system(&config.data_file)?;
    let mode = if merge {
        ImportMode::Merge
    } else {
        ImportMode::Replace
    };

    let report = interchange::import_all(&mut system, file, mode)
        .with_context(|| format!("Import of {:?} failed, records unchanged", file))?;
    save_system(&system, &config.data_file)?;

    println!("✓ {}", report.message());
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &Config) -> Result<()> {
    let system = load_system(&config.data_file)?;
    let mut app = ui::App::new(system, config.risk_threshold);
    ui::run_ui(&mut app)?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &Config) -> Result<()> {
    anyhow::bail!("Dashboard not available: rebuild with `--features tui`")
}
