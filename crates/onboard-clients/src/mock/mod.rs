//! In-memory mock collaborators with the canonical demo scenarios.
//!
//! Scenario accounts:
//! - `ACME-001`: everything in order, proceeds to provisioning.
//! - `BETA-002`: deal still in Negotiation, contract awaiting signatures.
//! - `GAMMA-003`: clean blocking checks but an overdue invoice and
//!   incomplete CRM data, so the run escalates.
//! - `DELETED-004`: deleted account with nothing else on file.
//! - `AUTH-ERROR` / `PERM-ERROR` / `SERVER-ERROR`: the CRM (and CLM) call
//!   itself fails with the named kind.
//!
//! Every fetch mock takes an optional artificial latency so tests can
//! exercise deadlines and concurrency.

mod billing;
mod clm;
mod crm;
mod notify;
mod provision;

pub use billing::MockBilling;
pub use clm::MockClm;
pub use crm::MockCrm;
pub use notify::MockNotifier;
pub use provision::MockProvisioner;

use std::time::Duration;

pub(crate) async fn simulate_latency(latency: Option<Duration>) {
    if let Some(delay) = latency {
        tokio::time::sleep(delay).await;
    }
}
