//! The run context: everything one onboarding run accumulates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decision::Decision;
use crate::error::{EntityContext, SystemError};
use crate::fetch::Fetched;
use crate::record::{
    Account, ClmContract, CrmContract, Invoice, Opportunity, ProvisioningResult, User,
};
use crate::report::RiskReport;
use crate::stage::Stage;

/// Business domain a violation or warning belongs to. `ApiError` is the
/// synthetic domain that mirrors integration failures so they are never
/// silently dropped from the operator-facing report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Account,
    User,
    Opportunity,
    Contract,
    Invoice,
    ApiError,
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Domain::Account => "account",
            Domain::User => "user",
            Domain::Opportunity => "opportunity",
            Domain::Contract => "contract",
            Domain::Invoice => "invoice",
            Domain::ApiError => "api_error",
        };
        write!(f, "{}", s)
    }
}

/// An action taken by a branch handler, e.g. a provisioning call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action: String,
    pub details: serde_json::Value,
}

/// A notification dispatched by a branch handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Transport: "slack" or "email".
    pub channel: String,
    /// Channel name or email address.
    pub recipient: String,
    pub message: String,
}

/// The mutable record of one onboarding run.
///
/// Exclusively owned by the orchestrator driving it; nothing here is shared
/// across runs. Collections are append-only within a run: entries are never
/// removed or overwritten once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunContext {
    // Identity, set once at creation.
    pub account_id: String,
    pub correlation_id: String,
    pub event_type: String,

    /// Current state-machine state, mutated only by the orchestrator.
    pub stage: Stage,

    // Domain records, set once by the fetch stage.
    pub account: Fetched<Account>,
    pub user: Fetched<User>,
    pub opportunity: Fetched<Opportunity>,
    pub contract: Fetched<CrmContract>,
    pub clm_contract: Fetched<ClmContract>,
    pub invoice: Fetched<Invoice>,

    /// Blocking violations per domain, in insertion order per domain.
    pub violations: BTreeMap<Domain, Vec<String>>,
    /// Non-blocking warnings per domain.
    pub warnings: BTreeMap<Domain, Vec<String>>,
    /// Every integration failure, with full taxonomy fields.
    pub api_errors: Vec<SystemError>,

    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_report: Option<RiskReport>,

    pub actions_taken: Vec<ActionRecord>,
    pub notifications_sent: Vec<NotificationRecord>,

    /// Set only on the `Proceed` path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning: Option<ProvisioningResult>,

    /// Final human-readable summary, set by the summarize stage.
    pub human_summary: String,
}

impl RunContext {
    pub fn new(
        account_id: impl Into<String>,
        correlation_id: impl Into<String>,
        event_type: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            correlation_id: correlation_id.into(),
            event_type: event_type.into(),
            stage: Stage::Init,
            account: Fetched::Pending,
            user: Fetched::Pending,
            opportunity: Fetched::Pending,
            contract: Fetched::Pending,
            clm_contract: Fetched::Pending,
            invoice: Fetched::Pending,
            violations: BTreeMap::new(),
            warnings: BTreeMap::new(),
            api_errors: Vec::new(),
            decision: Decision::Pending,
            risk_report: None,
            actions_taken: Vec::new(),
            notifications_sent: Vec::new(),
            provisioning: None,
            human_summary: String::new(),
        }
    }

    /// Record a blocking violation.
    pub fn add_violation(&mut self, domain: Domain, message: impl Into<String>) {
        self.violations.entry(domain).or_default().push(message.into());
    }

    /// Record a non-blocking warning.
    pub fn add_warning(&mut self, domain: Domain, message: impl Into<String>) {
        self.warnings.entry(domain).or_default().push(message.into());
    }

    /// Record an integration failure: append to `api_errors` and mirror a
    /// human-readable line into `violations["api_error"]`. Errors are never
    /// silently dropped, so every recorded error blocks the run.
    pub fn record_system_error(&mut self, error: SystemError) {
        let error = error.with_entity(self.entity_context());
        tracing::warn!(
            system = %error.system,
            kind = %error.kind,
            operation = %error.operation,
            code = %error.code,
            "integration failure recorded"
        );
        self.add_violation(Domain::ApiError, error.violation_message());
        self.api_errors.push(error);
    }

    /// Snapshot of the entity ids known right now, attached to errors.
    pub fn entity_context(&self) -> EntityContext {
        EntityContext {
            account_id: Some(self.account_id.clone()),
            opportunity_id: self.opportunity.as_present().map(|o| o.id.clone()),
            contract_id: self
                .clm_contract
                .as_present()
                .and_then(|c| c.contract_id.clone()),
            invoice_id: self
                .invoice
                .as_present()
                .and_then(|i| i.invoice_id.clone()),
        }
    }

    pub fn record_action(&mut self, action: impl Into<String>, details: serde_json::Value) {
        self.actions_taken.push(ActionRecord {
            action: action.into(),
            details,
        });
    }

    pub fn record_notification(
        &mut self,
        channel: impl Into<String>,
        recipient: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.notifications_sent.push(NotificationRecord {
            channel: channel.into(),
            recipient: recipient.into(),
            message: message.into(),
        });
    }

    pub fn violation_count(&self) -> usize {
        self.violations.values().map(Vec::len).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.values().map(Vec::len).sum()
    }

    pub fn has_blockers(&self) -> bool {
        self.violation_count() > 0 || !self.api_errors.is_empty()
    }

    /// Display name for the account: the CRM name when we have it, the
    /// external id otherwise.
    pub fn account_name(&self) -> &str {
        self.account
            .as_present()
            .map(|a| a.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.account_id)
    }
}
