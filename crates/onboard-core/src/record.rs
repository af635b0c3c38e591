//! Domain records pulled from the systems of record.
//!
//! Field names follow the upstream systems where that helps operators read
//! the output: CRM records keep their PascalCase-ish identifiers in serde
//! form, CLM and billing records use the lowercase names their APIs return.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A CRM account record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub is_deleted: bool,
}

/// A CRM user record (the account owner).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    pub is_active: bool,
    pub profile_id: String,
    /// Portal users must be tied to an account.
    pub is_portal_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

/// A CRM opportunity record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub name: String,
    pub account_id: String,
    pub stage_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
}

/// The CRM contract object. Separate from the CLM contract, which is the
/// source of truth for signatures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrmContract {
    pub id: String,
    pub account_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// A signatory on a CLM contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signatory {
    pub name: String,
    pub email: String,
    pub signed: bool,
}

/// Commercial terms extracted from the CLM contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyTerms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_tier: Option<String>,
    pub auto_renewal: bool,
}

/// A contract record from the contract-lifecycle-management system.
///
/// `status` is kept as the raw upstream string; `ClmContract::lifecycle`
/// parses it against the known status set so validators can give a tailored
/// message for unrecognized values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClmContract {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub signatories: Vec<Signatory>,
    #[serde(default)]
    pub key_terms: KeyTerms,
}

impl ClmContract {
    /// Parse the raw status against the known lifecycle set.
    pub fn lifecycle(&self) -> Option<ClmStatus> {
        ClmStatus::parse(&self.status)
    }

    /// Signatories who have not signed yet.
    pub fn pending_signatories(&self) -> Vec<&Signatory> {
        self.signatories.iter().filter(|s| !s.signed).collect()
    }
}

/// The CLM contract lifecycle. Only `Executed` and `Signed` permit
/// onboarding to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClmStatus {
    Draft,
    Sent,
    Signed,
    Executed,
    Expired,
    Voided,
}

impl ClmStatus {
    /// Case-insensitive parse; returns `None` for unrecognized statuses.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "DRAFT" => Some(ClmStatus::Draft),
            "SENT" => Some(ClmStatus::Sent),
            "SIGNED" => Some(ClmStatus::Signed),
            "EXECUTED" => Some(ClmStatus::Executed),
            "EXPIRED" => Some(ClmStatus::Expired),
            "VOIDED" => Some(ClmStatus::Voided),
            _ => None,
        }
    }

    /// Whether this status allows provisioning.
    pub fn permits_onboarding(&self) -> bool {
        matches!(self, ClmStatus::Executed | ClmStatus::Signed)
    }
}

/// Invoice status after the fetch stage has mapped the billing system's
/// internal codes. `Overdue` is derived: an open invoice past its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Open,
    Paid,
    Draft,
    Voided,
    Cancelled,
    Overdue,
    /// The billing system returned a code outside the known mapping.
    #[default]
    Unknown,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            InvoiceStatus::Open => "OPEN",
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::Draft => "DRAFT",
            InvoiceStatus::Voided => "VOIDED",
            InvoiceStatus::Cancelled => "CANCELLED",
            InvoiceStatus::Overdue => "OVERDUE",
            InvoiceStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

/// An invoice record, already normalized by the fetch stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    pub account_id: String,
    pub status: InvoiceStatus,
    /// Raw status label from the billing system, for operator-facing output.
    pub status_detail: String,
    pub days_overdue: i64,
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

impl Invoice {
    /// Percentage of the invoice already paid, if a total is known.
    pub fn paid_percentage(&self) -> Option<f64> {
        if self.total > 0.0 {
            Some((self.total - self.amount_remaining) / self.total * 100.0)
        } else {
            None
        }
    }
}

/// Result of provisioning a tenant for the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisioningResult {
    pub tenant_id: String,
    pub account_id: String,
    pub tier: String,
    pub status: String,
    pub admin_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clm_status_parses_known_set() {
        assert_eq!(ClmStatus::parse("EXECUTED"), Some(ClmStatus::Executed));
        assert_eq!(ClmStatus::parse("signed"), Some(ClmStatus::Signed));
        assert_eq!(ClmStatus::parse("PENDING_SIGNATURE"), None);
    }

    #[test]
    fn only_signed_and_executed_permit_onboarding() {
        assert!(ClmStatus::Executed.permits_onboarding());
        assert!(ClmStatus::Signed.permits_onboarding());
        assert!(!ClmStatus::Draft.permits_onboarding());
        assert!(!ClmStatus::Sent.permits_onboarding());
        assert!(!ClmStatus::Expired.permits_onboarding());
        assert!(!ClmStatus::Voided.permits_onboarding());
    }

    #[test]
    fn pending_signatories_filters_signed() {
        let contract = ClmContract {
            signatories: vec![
                Signatory {
                    name: "Jane Doe".into(),
                    email: "jane@beta.example".into(),
                    signed: false,
                },
                Signatory {
                    name: "Sarah Johnson".into(),
                    email: "sarah@vendor.example".into(),
                    signed: true,
                },
            ],
            ..ClmContract::default()
        };
        let pending = contract.pending_signatories();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "Jane Doe");
    }

    #[test]
    fn paid_percentage_handles_zero_total() {
        let invoice = Invoice {
            invoice_id: Some("INV-1".into()),
            account_id: "ACME-001".into(),
            status: InvoiceStatus::Open,
            status_detail: "Open".into(),
            days_overdue: 0,
            currency: "USD".into(),
            total: 0.0,
            amount_paid: 0.0,
            amount_remaining: 0.0,
            due_date: None,
            customer_email: None,
            customer_name: None,
        };
        assert_eq!(invoice.paid_percentage(), None);

        let half = Invoice {
            total: 100.0,
            amount_remaining: 50.0,
            ..invoice
        };
        assert_eq!(half.paid_percentage(), Some(50.0));
    }
}
