//! Per-connection access to every entity repository.
//!
//! # Invariants
//! - All repositories handed out share the same connection, so a
//!   `UnitOfWork` built over a transaction writes atomically.

use crate::model::project::Project;
use crate::model::task::TaskItem;
use crate::model::time_entry::TimeEntry;
use crate::model::user::User;
use crate::repo::entity_repo::SqliteRepository;
use rusqlite::Connection;

/// Repository bundle over one connection or transaction.
#[derive(Clone, Copy)]
pub struct UnitOfWork<'conn> {
    conn: &'conn Connection,
}

impl<'conn> UnitOfWork<'conn> {
    /// Wraps a migrated connection. A `Transaction` derefs to `Connection`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn users(&self) -> SqliteRepository<'conn, User> {
        SqliteRepository::new(self.conn)
    }

    pub fn projects(&self) -> SqliteRepository<'conn, Project> {
        SqliteRepository::new(self.conn)
    }

    pub fn tasks(&self) -> SqliteRepository<'conn, TaskItem> {
        SqliteRepository::new(self.conn)
    }

    pub fn time_entries(&self) -> SqliteRepository<'conn, TimeEntry> {
        SqliteRepository::new(self.conn)
    }
}
