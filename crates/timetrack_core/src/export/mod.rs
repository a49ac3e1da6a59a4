//! Report exports.
//!
//! # Responsibility
//! - Flatten time entries into report rows joined with user/project/task names.
//! - Serialize report rows as CSV documents.

pub mod csv_report;

pub use csv_report::{
    build_report_rows, export_time_entries_csv, report_file_name, ExportError, TimeEntryReportRow,
    CSV_CONTENT_TYPE,
};
