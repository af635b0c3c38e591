//! The fetch stages: pull records from the systems of record.
//!
//! The CRM chain runs first (account, then owner user, opportunity, and CRM
//! contract). The CLM contract and the invoice are independent of each other
//! and run concurrently, keyed by the external account id. Any system error
//! aborts everything not yet fetched: the remaining slots are tagged
//! `Failed` and the run proceeds straight to validation, where the mirrored
//! `api_error` violation already guarantees a block.

use std::future::Future;

use chrono::{NaiveDate, Utc};

use onboard_clients::RawInvoice;
use onboard_core::{
    FetchOutcome, Fetched, Invoice, InvoiceStatus, RunContext, SourceSystem, SystemError,
};

use crate::OnboardingEngine;

impl OnboardingEngine {
    async fn with_deadline<T>(
        &self,
        system: SourceSystem,
        operation: &str,
        call: impl Future<Output = FetchOutcome<T>>,
    ) -> FetchOutcome<T> {
        let millis = self.config.call_timeout.as_millis() as u64;
        match tokio::time::timeout(self.config.call_timeout, call).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(system = %system, operation, millis, "collaborator call timed out");
                FetchOutcome::SystemError(SystemError::timeout(system, operation, millis))
            }
        }
    }

    /// Fetch the account and everything reachable from it in the CRM.
    pub(crate) async fn fetch_account_chain(&self, ctx: &mut RunContext) {
        let account_id = ctx.account_id.clone();

        match self
            .with_deadline(
                SourceSystem::Crm,
                "fetch_account",
                self.crm.fetch_account(&account_id),
            )
            .await
        {
            FetchOutcome::Success(account) => {
                tracing::info!(account_name = %account.name, "account fetched");
                ctx.account = Fetched::Present(account);
            }
            FetchOutcome::NotFound => ctx.account = Fetched::Missing,
            FetchOutcome::SystemError(err) => {
                ctx.record_system_error(err);
                ctx.account = Fetched::Failed;
                ctx.user = Fetched::Failed;
                ctx.opportunity = Fetched::Failed;
                ctx.contract = Fetched::Failed;
                return;
            }
        }

        match ctx.account.as_present().and_then(|a| a.owner_id.clone()) {
            Some(owner_id) => {
                match self
                    .with_deadline(
                        SourceSystem::Crm,
                        "fetch_user",
                        self.crm.fetch_user(&owner_id),
                    )
                    .await
                {
                    FetchOutcome::Success(user) => ctx.user = Fetched::Present(user),
                    FetchOutcome::NotFound => ctx.user = Fetched::Missing,
                    FetchOutcome::SystemError(err) => {
                        ctx.record_system_error(err);
                        ctx.user = Fetched::Failed;
                        ctx.opportunity = Fetched::Failed;
                        ctx.contract = Fetched::Failed;
                        return;
                    }
                }
            }
            // No owner on the account means there is no user to look up.
            None => ctx.user = Fetched::Missing,
        }

        match self
            .with_deadline(
                SourceSystem::Crm,
                "fetch_opportunity",
                self.crm.fetch_opportunity_by_account(&account_id),
            )
            .await
        {
            FetchOutcome::Success(opp) => ctx.opportunity = Fetched::Present(opp),
            FetchOutcome::NotFound => ctx.opportunity = Fetched::Missing,
            FetchOutcome::SystemError(err) => {
                ctx.record_system_error(err);
                ctx.opportunity = Fetched::Failed;
                ctx.contract = Fetched::Failed;
                return;
            }
        }

        match self
            .with_deadline(
                SourceSystem::Crm,
                "fetch_contract",
                self.crm.fetch_contract_by_account(&account_id),
            )
            .await
        {
            FetchOutcome::Success(contract) => ctx.contract = Fetched::Present(contract),
            FetchOutcome::NotFound => ctx.contract = Fetched::Missing,
            FetchOutcome::SystemError(err) => {
                ctx.record_system_error(err);
                ctx.contract = Fetched::Failed;
            }
        }
    }

    /// Fetch the CLM contract and the invoice concurrently. The CLM outcome
    /// is applied here; the invoice outcome is handed back so the invoice
    /// state applies it.
    pub(crate) async fn fetch_clm_and_invoice(
        &self,
        ctx: &mut RunContext,
    ) -> Option<FetchOutcome<RawInvoice>> {
        if !ctx.api_errors.is_empty() {
            ctx.clm_contract = Fetched::Failed;
            return None;
        }

        let account_id = ctx.account_id.clone();
        let (clm_outcome, invoice_outcome) = tokio::join!(
            self.with_deadline(
                SourceSystem::ContractManagement,
                "fetch_contract",
                self.clm.fetch_contract_by_account(&account_id),
            ),
            self.with_deadline(
                SourceSystem::Billing,
                "fetch_invoice",
                self.billing.fetch_invoice_by_account(&account_id),
            ),
        );

        match clm_outcome {
            FetchOutcome::Success(contract) => ctx.clm_contract = Fetched::Present(contract),
            FetchOutcome::NotFound => ctx.clm_contract = Fetched::Missing,
            FetchOutcome::SystemError(err) => {
                ctx.record_system_error(err);
                ctx.clm_contract = Fetched::Failed;
            }
        }
        Some(invoice_outcome)
    }

    /// Apply the invoice outcome stashed by the CLM state, normalizing the
    /// raw billing record.
    pub(crate) fn apply_invoice(
        &self,
        ctx: &mut RunContext,
        outcome: Option<FetchOutcome<RawInvoice>>,
    ) {
        let Some(outcome) = outcome else {
            // The concurrent fetch never ran; an earlier error aborted it.
            ctx.invoice = Fetched::Failed;
            return;
        };
        match outcome {
            FetchOutcome::Success(raw) => {
                let invoice = normalize_invoice(raw, Utc::now().date_naive());
                tracing::info!(status = %invoice.status, "invoice fetched");
                ctx.invoice = Fetched::Present(invoice);
            }
            FetchOutcome::NotFound => ctx.invoice = Fetched::Missing,
            FetchOutcome::SystemError(err) => {
                ctx.record_system_error(err);
                ctx.invoice = Fetched::Failed;
            }
        }
    }
}

/// Map the billing system's raw invoice into the normalized record.
///
/// Status codes: `A` open, `B` paid, `D` cancelled, `E` draft, `V` voided;
/// anything else is `Unknown` and left to the rule set to flag. An open
/// invoice past its due date becomes `Overdue` with the day count filled in.
pub fn normalize_invoice(raw: RawInvoice, today: NaiveDate) -> Invoice {
    let mut status = match raw.status_code.as_str() {
        "A" => InvoiceStatus::Open,
        "B" => InvoiceStatus::Paid,
        "D" => InvoiceStatus::Cancelled,
        "E" => InvoiceStatus::Draft,
        "V" => InvoiceStatus::Voided,
        _ => InvoiceStatus::Unknown,
    };

    let mut days_overdue = 0;
    if status == InvoiceStatus::Open {
        if let Some(due) = raw.due_date {
            if due < today {
                status = InvoiceStatus::Overdue;
                days_overdue = (today - due).num_days();
            }
        }
    }

    let status_detail = if raw.status_label.is_empty() {
        raw.status_code.clone()
    } else {
        raw.status_label.clone()
    };

    Invoice {
        invoice_id: (!raw.invoice_id.is_empty()).then_some(raw.invoice_id),
        account_id: raw.account_id,
        status,
        status_detail,
        days_overdue,
        currency: raw.currency,
        total: raw.total,
        amount_paid: raw.amount_paid,
        amount_remaining: raw.amount_remaining,
        due_date: raw.due_date,
        customer_email: raw.customer_email,
        customer_name: raw.customer_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(code: &str, label: &str) -> RawInvoice {
        RawInvoice {
            invoice_id: "INV-1".into(),
            account_id: "ACME-001".into(),
            status_code: code.into(),
            status_label: label.into(),
            currency: "USD".into(),
            total: 100.0,
            amount_paid: 100.0,
            amount_remaining: 0.0,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            customer_email: None,
            customer_name: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn status_codes_map_to_normalized_statuses() {
        let cases = [
            ("B", InvoiceStatus::Paid),
            ("D", InvoiceStatus::Cancelled),
            ("E", InvoiceStatus::Draft),
            ("V", InvoiceStatus::Voided),
            ("Z", InvoiceStatus::Unknown),
        ];
        for (code, want) in cases {
            assert_eq!(normalize_invoice(raw(code, ""), today()).status, want);
        }
    }

    #[test]
    fn open_past_due_becomes_overdue() {
        let invoice = normalize_invoice(raw("A", "Open"), today());
        assert_eq!(invoice.status, InvoiceStatus::Overdue);
        assert_eq!(invoice.days_overdue, 30);
    }

    #[test]
    fn open_before_due_stays_open() {
        let mut r = raw("A", "Open");
        r.due_date = NaiveDate::from_ymd_opt(2024, 3, 15);
        let invoice = normalize_invoice(r, today());
        assert_eq!(invoice.status, InvoiceStatus::Open);
        assert_eq!(invoice.days_overdue, 0);
    }

    #[test]
    fn paid_past_due_is_not_overdue() {
        let invoice = normalize_invoice(raw("B", "Paid In Full"), today());
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.days_overdue, 0);
    }

    #[test]
    fn status_detail_falls_back_to_the_raw_code() {
        let invoice = normalize_invoice(raw("Z", ""), today());
        assert_eq!(invoice.status_detail, "Z");
    }
}
