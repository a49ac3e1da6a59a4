//! Core domain logic for time tracking.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod sync;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{NewProject, Project};
pub use model::task::{NewTask, TaskItem};
pub use model::time_entry::{NewTimeEntry, TimeEntry};
pub use model::user::{NewUser, User};
pub use model::validation::ValidationError;
pub use model::EntityId;
pub use repo::entity_repo::{Entity, RepoError, RepoResult, Repository, SqliteRepository};
pub use repo::unit_of_work::UnitOfWork;
pub use service::project_service::ProjectService;
pub use service::report_service::{ProjectDetail, ReportService, TaskDetail, UserDetail};
pub use service::seed_service::{seed_sample_data, SeedOutcome, SeedSummary};
pub use service::task_service::TaskService;
pub use service::time_entry_service::TimeEntryService;
pub use service::user_service::UserService;
pub use service::views::{TaskView, TimeEntryView};
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
