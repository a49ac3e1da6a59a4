//! Time entry CSV report.
//!
//! # Invariants
//! - Header row is `User,Project,Task,OriginalEstimate,TimeSpent`.
//! - One row per time entry, in entry id order.
//! - Unresolvable names render as `Unknown`; an unresolvable estimate is `0`.

use crate::repo::entity_repo::{RepoError, Repository};
use crate::repo::unit_of_work::UnitOfWork;
use crate::service::views::{LookupTables, UNKNOWN_LABEL};
use chrono::{DateTime, TimeZone};
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub const CSV_CONTENT_TYPE: &str = "text/csv";
const REPORT_FILE_PREFIX: &str = "time-entries-report";

/// One flattened report line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeEntryReportRow {
    pub user: String,
    pub project: String,
    pub task: String,
    pub original_estimate: f64,
    pub time_spent: f64,
}

#[derive(Debug)]
pub enum ExportError {
    Repo(RepoError),
    Csv(csv::Error),
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "csv encoding failed: {err}"),
            Self::Io(err) => write!(f, "csv buffer flush failed: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<RepoError> for ExportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Joins every time entry with its user, task, and the task's project.
pub fn build_report_rows(uow: &UnitOfWork<'_>) -> Result<Vec<TimeEntryReportRow>, RepoError> {
    let entries = uow.time_entries().list_all()?;
    let lookups = LookupTables::load(uow)?;

    Ok(entries
        .iter()
        .map(|entry| {
            let task = lookups.task(entry.task_item_id);
            TimeEntryReportRow {
                user: lookups.user_name(entry.user_id).to_string(),
                project: task
                    .map(|task| lookups.project_name(task.project_id))
                    .unwrap_or(UNKNOWN_LABEL)
                    .to_string(),
                task: lookups.task_title(entry.task_item_id).to_string(),
                original_estimate: task.map_or(0.0, |task| task.estimate_hours),
                time_spent: entry.duration_hours(),
            }
        })
        .collect())
}

/// Renders the full time entry report as UTF-8 CSV bytes.
pub fn export_time_entries_csv(uow: &UnitOfWork<'_>) -> Result<Vec<u8>, ExportError> {
    let started_at = Instant::now();
    let result = build_report_rows(uow)
        .map_err(ExportError::from)
        .and_then(|rows| encode_rows(&rows).map(|bytes| (rows.len(), bytes)));

    match result {
        Ok((row_count, bytes)) => {
            info!(
                "event=export_csv module=export status=ok rows={} bytes={} duration_ms={}",
                row_count,
                bytes.len(),
                started_at.elapsed().as_millis()
            );
            Ok(bytes)
        }
        Err(err) => {
            error!(
                "event=export_csv module=export status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Attachment name for a report generated at `at`.
pub fn report_file_name<Tz>(at: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{REPORT_FILE_PREFIX}-{}.csv",
        at.format("%Y-%m-%d-%H-%M-%S")
    )
}

fn encode_rows(rows: &[TimeEntryReportRow]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer.write_record(["User", "Project", "Task", "OriginalEstimate", "TimeSpent"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

#[cfg(test)]
mod tests {
    use super::{encode_rows, report_file_name, TimeEntryReportRow};
    use chrono::{TimeZone, Utc};

    #[test]
    fn empty_report_still_has_header() {
        let bytes = encode_rows(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "User,Project,Task,OriginalEstimate,TimeSpent\n"
        );
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let rows = vec![TimeEntryReportRow {
            user: "Doe, John".to_string(),
            project: "API".to_string(),
            task: "Design".to_string(),
            original_estimate: 8.0,
            time_spent: 1.5,
        }];
        let text = String::from_utf8(encode_rows(&rows).unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("User,Project,Task,OriginalEstimate,TimeSpent")
        );
        assert_eq!(lines.next(), Some("\"Doe, John\",API,Design,8.0,1.5"));
    }

    #[test]
    fn file_name_embeds_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap();
        assert_eq!(
            report_file_name(at),
            "time-entries-report-2024-02-03-04-05-06.csv"
        );
    }
}
