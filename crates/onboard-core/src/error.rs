//! Error taxonomy: business data problems vs. integration failures.
//!
//! Violations and warnings (bad or incomplete business data) live on the run
//! context as plain messages. A [`SystemError`] is different: the collaborator
//! itself failed, and the record carries everything an operator needs to act
//! on it without opening the upstream system's logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which collaborator produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSystem {
    Crm,
    ContractManagement,
    Billing,
    Provisioning,
    Notification,
}

impl std::fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            SourceSystem::Crm => "CRM",
            SourceSystem::ContractManagement => "CLM",
            SourceSystem::Billing => "Billing",
            SourceSystem::Provisioning => "Provisioning",
            SourceSystem::Notification => "Notifications",
        };
        write!(f, "{}", s)
    }
}

/// The kind of integration failure, as reported by the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Authentication,
    Authorization,
    Validation,
    RateLimit,
    Server,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            ErrorKind::Authentication => "authentication",
            ErrorKind::Authorization => "authorization",
            ErrorKind::Validation => "validation",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Server => "server",
        };
        write!(f, "{}", s)
    }
}

/// Snapshot of the entity ids known at the moment an error was recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
}

/// A collaborator-reported infrastructure failure. Always blocking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemError {
    pub system: SourceSystem,
    pub kind: ErrorKind,
    /// The operation that was attempted, e.g. `fetch_account`.
    pub operation: String,
    /// Upstream error code, e.g. `INVALID_SESSION_ID`.
    pub code: String,
    /// Raw upstream message.
    pub message: String,
    pub http_status: u16,
    pub timestamp: DateTime<Utc>,
    /// What an operator should do about it, keyed by `(kind, system)`.
    pub resolution: String,
    /// Team responsible for this class of failure.
    pub owning_team: String,
    /// Ids known at the time the error occurred.
    #[serde(default)]
    pub entity: EntityContext,
}

impl SystemError {
    pub fn new(
        system: SourceSystem,
        kind: ErrorKind,
        operation: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
        http_status: u16,
    ) -> Self {
        Self {
            system,
            kind,
            operation: operation.into(),
            code: code.into(),
            message: message.into(),
            http_status,
            timestamp: Utc::now(),
            resolution: resolution_guidance(kind, system),
            owning_team: owning_team(kind).to_string(),
            entity: EntityContext::default(),
        }
    }

    /// A deadline-exceeded collaborator call, surfaced as a server failure.
    pub fn timeout(system: SourceSystem, operation: impl Into<String>, millis: u64) -> Self {
        Self::new(
            system,
            ErrorKind::Server,
            operation,
            "TIMEOUT",
            format!("call exceeded the {}ms deadline", millis),
            504,
        )
    }

    /// Attach the entity-context snapshot.
    pub fn with_entity(mut self, entity: EntityContext) -> Self {
        self.entity = entity;
        self
    }

    /// The human-readable line mirrored into `violations["api_error"]`.
    /// Names the system, operation, raw message, and the resolution so the
    /// blocked notification is actionable on its own.
    pub fn violation_message(&self) -> String {
        format!(
            "{} {} failed: [{}] {} (HTTP {}). Resolution: {}",
            self.system, self.operation, self.code, self.message, self.http_status, self.resolution
        )
    }
}

impl std::fmt::Display for SystemError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} {}: {} (HTTP {})",
            self.code, self.system, self.operation, self.message, self.http_status
        )
    }
}

/// Resolution guidance for an `(error kind, system)` pair.
pub fn resolution_guidance(kind: ErrorKind, system: SourceSystem) -> String {
    match kind {
        ErrorKind::Authentication => {
            format!("Re-authenticate: refresh the {} integration credentials", system)
        }
        ErrorKind::Authorization => {
            format!("Check API permissions for the {} integration user", system)
        }
        ErrorKind::Validation => {
            format!("Review the request payload; {} rejected a field value", system)
        }
        ErrorKind::RateLimit => {
            format!("Rate limited by {}; retry after the limit window resets", system)
        }
        ErrorKind::Server => {
            format!("{} reported a server-side failure; retry later or check its status page", system)
        }
    }
}

/// Which team owns the follow-up for a given failure kind.
pub fn owning_team(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Authentication | ErrorKind::Authorization => "Platform Integrations",
        ErrorKind::Validation => "Revenue Operations",
        ErrorKind::RateLimit | ErrorKind::Server => "Platform Integrations On-Call",
    }
}

/// Faults of the engine itself. Business outcomes (BLOCK, ESCALATE) are
/// values on the run context and never pass through here.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("run context in unexpected state: {0}")]
    InvalidState(String),

    #[error("collaborator misbehaved: {0}")]
    Collaborator(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_message_is_self_contained() {
        let err = SystemError::new(
            SourceSystem::Crm,
            ErrorKind::Authentication,
            "fetch_account",
            "INVALID_SESSION_ID",
            "Session expired or invalid",
            401,
        );
        let msg = err.violation_message();
        assert!(msg.contains("CRM"));
        assert!(msg.contains("fetch_account"));
        assert!(msg.contains("INVALID_SESSION_ID"));
        assert!(msg.contains("Session expired or invalid"));
        assert!(msg.contains("Re-authenticate"));
    }

    #[test]
    fn guidance_keyed_by_kind_and_system() {
        let auth = resolution_guidance(ErrorKind::Authentication, SourceSystem::Billing);
        assert!(auth.contains("Billing"));
        assert!(auth.contains("Re-authenticate"));

        let rate = resolution_guidance(ErrorKind::RateLimit, SourceSystem::Crm);
        assert!(rate.contains("retry after"));
    }

    #[test]
    fn owning_teams_cover_all_kinds() {
        assert_eq!(owning_team(ErrorKind::Authentication), "Platform Integrations");
        assert_eq!(owning_team(ErrorKind::Validation), "Revenue Operations");
        assert_eq!(owning_team(ErrorKind::Server), "Platform Integrations On-Call");
    }

    #[test]
    fn timeout_is_a_server_error() {
        let err = SystemError::timeout(SourceSystem::ContractManagement, "fetch_contract", 5000);
        assert_eq!(err.kind, ErrorKind::Server);
        assert_eq!(err.code, "TIMEOUT");
        assert_eq!(err.http_status, 504);
        assert!(err.message.contains("5000ms"));
    }
}
