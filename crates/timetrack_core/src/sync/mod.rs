//! One-way push of local tracking data to Clockify.
//!
//! # Responsibility
//! - Define the remote API seam (`ClockifyApi`) and its HTTP implementation.
//! - Run the sequential push of projects, tasks, and time entries.
//!
//! # Invariants
//! - The push never holds a database connection during network calls; it
//!   works from a `SyncSnapshot` loaded up front.
//! - A failed item is logged and counted; the remaining items still run.
//! - There are no retries, idempotency keys, or remote conflict checks.

use crate::repo::entity_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod clockify;
pub mod push;

pub use clockify::{
    ClockifyApi, ClockifyConfig, HttpClockifyClient, ProjectRequest, RemoteProject, RemoteTask,
    RemoteWorkspace, TaskRequest, TimeEntryRequest, DEFAULT_CLOCKIFY_BASE_URL,
};
pub use push::{ClockifySync, SyncReport, SyncSnapshot};

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug)]
pub enum SyncError {
    /// No API key configured.
    MissingApiKey,
    /// HTTP client could not be constructed.
    Client(String),
    /// Request failed before a response was received, or the body was unreadable.
    Transport(reqwest::Error),
    /// Remote answered with a non-success status.
    Status { status: u16, body: String },
    /// Neither configuration nor the remote account yields a workspace.
    NoWorkspace,
    /// Local snapshot could not be loaded.
    Repo(RepoError),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "Clockify API key not configured"),
            Self::Client(message) => write!(f, "failed to build Clockify client: {message}"),
            Self::Transport(err) => write!(f, "Clockify request failed: {err}"),
            Self::Status { status, body } => {
                write!(f, "Clockify responded with status {status}: {body}")
            }
            Self::NoWorkspace => write!(f, "No workspace found in Clockify"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<RepoError> for SyncError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
