//! Report types and output formatters

pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, suggest_filename, ConsoleFormatter, OutputFormatter, ReportGenerator};
pub use report::{AnalysisReport, RankingReport, ReportMetadata, ScoreBand};
