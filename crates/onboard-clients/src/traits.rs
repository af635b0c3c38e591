//! Collaborator traits.
//!
//! Fetch methods return a [`FetchOutcome`] value: absence and integration
//! failure are data, not `Err`. The only `Result` on these seams is for
//! notifications, where the engine logs a failed send but never blocks a
//! decision that has already been made.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use onboard_core::{
    Account, ClmContract, CrmContract, FetchOutcome, Opportunity, ProvisioningResult, SystemError,
    User,
};

/// An invoice as the billing system returns it, before normalization.
///
/// `status_code` is the billing system's single-letter internal code
/// (`A` open, `B` paid, `D` cancelled, `E` draft, `V` voided); the fetch
/// stage maps it to an [`onboard_core::InvoiceStatus`] and derives OVERDUE
/// from the due date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInvoice {
    pub invoice_id: String,
    pub account_id: String,
    pub status_code: String,
    pub status_label: String,
    pub currency: String,
    pub total: f64,
    pub amount_paid: f64,
    pub amount_remaining: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

/// The CRM system of record for accounts, users, deals, and CRM contracts.
#[async_trait]
pub trait CrmClient: Send + Sync {
    async fn fetch_account(&self, account_id: &str) -> FetchOutcome<Account>;
    async fn fetch_user(&self, user_id: &str) -> FetchOutcome<User>;
    async fn fetch_opportunity_by_account(&self, account_id: &str) -> FetchOutcome<Opportunity>;
    async fn fetch_contract_by_account(&self, account_id: &str) -> FetchOutcome<CrmContract>;
}

/// Contract lifecycle management, the source of truth for signatures.
#[async_trait]
pub trait ClmClient: Send + Sync {
    async fn fetch_contract_by_account(&self, account_id: &str) -> FetchOutcome<ClmContract>;
}

/// Billing system holding the customer's invoice.
#[async_trait]
pub trait BillingClient: Send + Sync {
    async fn fetch_invoice_by_account(&self, account_id: &str) -> FetchOutcome<RawInvoice>;
}

/// Tenant provisioning for customers cleared to proceed.
#[async_trait]
pub trait Provisioner: Send + Sync {
    async fn provision(
        &self,
        account_id: &str,
        tier: &str,
        customer_name: &str,
    ) -> ProvisioningResult;
}

/// Outbound notifications: Slack-style channels and customer email.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_slack(&self, channel: &str, message: &str) -> Result<(), SystemError>;
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), SystemError>;
}
