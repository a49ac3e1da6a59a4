//! Sample data seeding for empty stores.
//!
//! # Invariants
//! - Seeding is skipped when any user already exists.
//! - All sample rows are written in one transaction.

use crate::model::project::NewProject;
use crate::model::task::NewTask;
use crate::model::time_entry::NewTimeEntry;
use crate::model::user::NewUser;
use crate::repo::entity_repo::{RepoError, Repository};
use crate::repo::unit_of_work::UnitOfWork;
use crate::service::ServiceResult;
use chrono::{DateTime, Duration, Utc};
use log::info;
use rusqlite::Connection;

const SAMPLE_USERS: &[&str] = &["John Doe", "Jane Smith", "Bob Johnson"];
const SAMPLE_PROJECTS: &[&str] = &["E-commerce Platform", "Mobile App Development", "API Integration"];

/// `(title, estimate_hours, project_index, user_index)`
const SAMPLE_TASKS: &[(&str, f64, usize, usize)] = &[
    ("Database Design", 8.0, 0, 0),
    ("User Authentication", 6.0, 0, 1),
    ("Payment Integration", 10.0, 0, 0),
    ("UI/UX Design", 12.0, 1, 1),
    ("API Development", 8.0, 2, 2),
    ("Testing", 4.0, 1, 0),
];

/// `(days_ago, start_hour_offset, end_hour_offset, task_index, user_index)`
const SAMPLE_TIME_ENTRIES: &[(i64, i64, i64, usize, usize)] = &[
    (7, 9, 17, 0, 0),
    (6, 9, 15, 1, 1),
    (5, 10, 18, 2, 0),
    (4, 9, 17, 3, 1),
    (3, 8, 16, 4, 2),
    (2, 9, 13, 5, 0),
];

/// Row counts written by a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub projects: usize,
    pub tasks: usize,
    pub time_entries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(SeedSummary),
    AlreadyPresent,
}

/// Inserts the sample users, projects, tasks, and time entries.
///
/// Time entries are placed relative to `now`: each starts `days_ago` days
/// back plus a start-hour offset and ends at the matching end-hour offset.
pub fn seed_sample_data(conn: &mut Connection, now: DateTime<Utc>) -> ServiceResult<SeedOutcome> {
    if UnitOfWork::new(conn).users().count()? > 0 {
        info!("event=seed module=service status=skipped reason=data_present");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let tx = conn.transaction().map_err(RepoError::from)?;
    let summary = {
        let uow = UnitOfWork::new(&tx);

        let mut user_ids = Vec::with_capacity(SAMPLE_USERS.len());
        for name in SAMPLE_USERS {
            user_ids.push(uow.users().insert(&NewUser::new(*name))?.id);
        }

        let mut project_ids = Vec::with_capacity(SAMPLE_PROJECTS.len());
        for name in SAMPLE_PROJECTS {
            project_ids.push(uow.projects().insert(&NewProject::new(*name))?.id);
        }

        let mut task_ids = Vec::with_capacity(SAMPLE_TASKS.len());
        for (title, estimate, project_index, user_index) in SAMPLE_TASKS {
            let draft = NewTask::new(
                *title,
                *estimate,
                project_ids[*project_index],
                user_ids[*user_index],
            );
            task_ids.push(uow.tasks().insert(&draft)?.id);
        }

        for (days_ago, start_hours, end_hours, task_index, user_index) in SAMPLE_TIME_ENTRIES {
            let day = now - Duration::days(*days_ago);
            let draft = NewTimeEntry::new(
                day + Duration::hours(*start_hours),
                day + Duration::hours(*end_hours),
                task_ids[*task_index],
                user_ids[*user_index],
            );
            uow.time_entries().insert(&draft)?;
        }

        SeedSummary {
            users: user_ids.len(),
            projects: project_ids.len(),
            tasks: task_ids.len(),
            time_entries: SAMPLE_TIME_ENTRIES.len(),
        }
    };
    tx.commit().map_err(RepoError::from)?;

    info!(
        "event=seed module=service status=ok users={} projects={} tasks={} time_entries={}",
        summary.users, summary.projects, summary.tasks, summary.time_entries
    );
    Ok(SeedOutcome::Seeded(summary))
}
