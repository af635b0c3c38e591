//! Tagged unions for fetch results and record slots.
//!
//! `FetchOutcome` is what a collaborator call returns; `Fetched` is the slot
//! a record occupies on the run context afterward. Keeping them as sum types
//! forces every call site to handle absence and failure explicitly.

use serde::{Deserialize, Serialize};

use crate::error::SystemError;

/// Outcome of a single collaborator fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// The record exists and was retrieved.
    Success(T),
    /// The collaborator affirmatively reported the record absent. This is a
    /// business condition, not an infrastructure fault.
    NotFound,
    /// The collaborator itself failed.
    SystemError(SystemError),
}

impl<T> FetchOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    pub fn is_system_error(&self) -> bool {
        matches!(self, FetchOutcome::SystemError(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Success(t) => FetchOutcome::Success(f(t)),
            FetchOutcome::NotFound => FetchOutcome::NotFound,
            FetchOutcome::SystemError(e) => FetchOutcome::SystemError(e),
        }
    }
}

/// State of a record slot on the run context. Set once by the fetch stage
/// and read-only afterward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "record")]
pub enum Fetched<T> {
    /// The fetch has not run yet.
    #[default]
    Pending,
    /// The collaborator reported the record absent, or the record could not
    /// be looked up because a prerequisite (such as the owning account) was
    /// itself absent.
    Missing,
    /// The fetch ended in a system error, or was skipped because an earlier
    /// system error aborted the chain. Details are in `api_errors`.
    Failed,
    Present(T),
}

impl<T> Fetched<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Fetched::Present(_))
    }

    /// True when validators should record the record as absent: it was never
    /// retrieved and no system error already accounts for it.
    pub fn is_absent(&self) -> bool {
        matches!(self, Fetched::Pending | Fetched::Missing)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Fetched::Failed)
    }

    pub fn as_present(&self) -> Option<&T> {
        match self {
            Fetched::Present(t) => Some(t),
            _ => None,
        }
    }
}
