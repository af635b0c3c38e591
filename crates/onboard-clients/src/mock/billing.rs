//! Mock billing client.
//!
//! Invoices carry the billing system's raw single-letter status codes;
//! normalization (including OVERDUE derivation) happens in the engine's
//! fetch stage. Due dates are generated relative to today so the overdue
//! scenario stays overdue.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};

use onboard_core::{ErrorKind, FetchOutcome, SourceSystem, SystemError};

use crate::traits::{BillingClient, RawInvoice};

#[derive(Debug, Default)]
pub struct MockBilling {
    latency: Option<Duration>,
}

impl MockBilling {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
        }
    }
}

#[async_trait]
impl BillingClient for MockBilling {
    async fn fetch_invoice_by_account(&self, account_id: &str) -> FetchOutcome<RawInvoice> {
        super::simulate_latency(self.latency).await;
        let today = Utc::now().date_naive();

        let invoice = match account_id {
            "ACME-001" => RawInvoice {
                invoice_id: "INV-2024-001".into(),
                account_id: "ACME-001".into(),
                status_code: "B".into(),
                status_label: "Paid In Full".into(),
                currency: "USD".into(),
                total: 150_000.0,
                amount_paid: 150_000.0,
                amount_remaining: 0.0,
                due_date: Some(today - ChronoDuration::days(200)),
                customer_email: Some("billing@acme.example".into()),
                customer_name: Some("John Smith".into()),
            },
            "BETA-002" => RawInvoice {
                invoice_id: "INV-2024-002".into(),
                account_id: "BETA-002".into(),
                status_code: "A".into(),
                status_label: "Open".into(),
                currency: "CAD".into(),
                total: 84_750.0,
                amount_paid: 0.0,
                amount_remaining: 84_750.0,
                due_date: Some(today + ChronoDuration::days(30)),
                customer_email: Some("ap@beta.example".into()),
                customer_name: Some("Jane Doe".into()),
            },
            "GAMMA-003" => RawInvoice {
                invoice_id: "INV-2023-089".into(),
                account_id: "GAMMA-003".into(),
                status_code: "A".into(),
                status_label: "Open".into(),
                currency: "USD".into(),
                total: 25_000.0,
                amount_paid: 0.0,
                amount_remaining: 25_000.0,
                // 45 days past due; the fetch stage derives OVERDUE.
                due_date: Some(today - ChronoDuration::days(45)),
                customer_email: Some("founders@gamma.example".into()),
                customer_name: Some("Alex Founder".into()),
            },
            "SERVER-ERROR" => {
                return FetchOutcome::SystemError(SystemError::new(
                    SourceSystem::Billing,
                    ErrorKind::Server,
                    "fetch_invoice",
                    "INTERNAL_ERROR",
                    "Billing system unavailable",
                    500,
                ))
            }
            _ => return FetchOutcome::NotFound,
        };
        FetchOutcome::Success(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn gamma_invoice_is_open_and_past_due() {
        let billing = MockBilling::new();
        let invoice = match billing.fetch_invoice_by_account("GAMMA-003").await {
            FetchOutcome::Success(i) => i,
            other => panic!("expected invoice, got {:?}", other),
        };
        assert_eq!(invoice.status_code, "A");
        assert!(invoice.due_date.unwrap() < Utc::now().date_naive());
        assert_eq!(invoice.amount_remaining, 25_000.0);
    }

    #[tokio::test]
    async fn deleted_account_has_no_invoice() {
        let billing = MockBilling::new();
        assert!(matches!(
            billing.fetch_invoice_by_account("DELETED-004").await,
            FetchOutcome::NotFound
        ));
    }
}
