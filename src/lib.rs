// Academic Records - Core Library
// Exposes the records core for the CLI, the dashboard and tests

pub mod analytics;
pub mod config;
pub mod entities;
pub mod error;
pub mod interchange;
pub mod ledger;
pub mod report;
pub mod system;

// Re-export commonly used types
pub use analytics::{
    AnalyticsEngine, GradeDistribution, HistogramBin, MonthlyAverage, PerformanceBand,
    ProfessorLoad, ProgramAverage, Standing, StudentReport, SubjectReport, SubjectStatus,
    SystemSummary, REFERENCE_RISK_THRESHOLD,
};
pub use config::Config;
pub use entities::{Professor, Record, Registry, Student, Subject};
pub use error::{EntityKind, ErrorKind, RecordsError, Result};
pub use interchange::{export_all, import_all, ImportMode, ImportReport};
pub use ledger::{GradeEntry, GradeLedger, MAX_SCORE, MAX_WEIGHT, MIN_SCORE};
pub use report::{render_report, write_report};
pub use system::{AcademicSystem, Removal};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
