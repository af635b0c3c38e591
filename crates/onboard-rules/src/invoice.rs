//! Invoice rule set.
//!
//! The fetch stage has already mapped the billing system's status codes and
//! derived OVERDUE from the due date, so this rule set works purely on the
//! normalized record. A voided or cancelled invoice blocks; open and overdue
//! invoices only warn, carrying the outstanding amount so Finance can act
//! from the notification alone. A missing invoice is a warning, not a
//! violation: billing may simply lag the deal.

use onboard_core::{Domain, InvoiceStatus, RunContext};

pub fn check_invoice(ctx: &mut RunContext) {
    if ctx.invoice.is_failed() {
        return;
    }
    let Some(invoice) = ctx.invoice.as_present().cloned() else {
        ctx.add_warning(Domain::Invoice, "Invoice data not found in billing system");
        return;
    };

    let invoice_label = invoice.invoice_id.as_deref().unwrap_or("Unknown");

    // Tier 1: payment validity
    if invoice.invoice_id.is_none() {
        ctx.add_violation(Domain::Invoice, "Invoice id is missing");
    }
    match invoice.status {
        InvoiceStatus::Unknown => {
            ctx.add_violation(
                Domain::Invoice,
                format!("Invalid invoice status: {}", invoice.status_detail),
            );
        }
        InvoiceStatus::Voided => {
            ctx.add_violation(
                Domain::Invoice,
                format!("Invoice {} has been voided", invoice_label),
            );
        }
        InvoiceStatus::Cancelled => {
            ctx.add_violation(
                Domain::Invoice,
                format!("Invoice {} has been cancelled", invoice_label),
            );
        }
        _ => {}
    }

    // Tier 2: payment readiness
    match invoice.status {
        InvoiceStatus::Open => {
            ctx.add_warning(
                Domain::Invoice,
                format!(
                    "Invoice {} is open with ${:.2} remaining",
                    invoice_label, invoice.amount_remaining
                ),
            );
        }
        InvoiceStatus::Overdue => {
            ctx.add_warning(
                Domain::Invoice,
                format!(
                    "Invoice {} is {} days overdue (${:.2} outstanding) - escalate to Finance",
                    invoice_label, invoice.days_overdue, invoice.amount_remaining
                ),
            );
        }
        InvoiceStatus::Draft => {
            ctx.add_warning(
                Domain::Invoice,
                format!(
                    "Invoice {} is still in draft/pending approval - not yet sent to customer",
                    invoice_label
                ),
            );
        }
        _ => {}
    }

    // Tier 2: data completeness
    if invoice.total == 0.0 {
        ctx.add_warning(Domain::Invoice, "Invoice total amount is missing");
    }
    if invoice.due_date.is_none() {
        ctx.add_warning(Domain::Invoice, "Invoice due date is missing");
    }
    if invoice.customer_email.is_none() {
        ctx.add_warning(
            Domain::Invoice,
            "Customer email missing on invoice - cannot send reminders",
        );
    }

    // Low paid percentage is a soft collection-risk signal.
    if let Some(paid_percentage) = invoice.paid_percentage() {
        if invoice.amount_remaining > 0.0
            && paid_percentage < 50.0
            && !matches!(invoice.status, InvoiceStatus::Paid | InvoiceStatus::Draft)
        {
            ctx.add_warning(
                Domain::Invoice,
                format!("Less than 50% of invoice paid ({:.0}%)", paid_percentage),
            );
        }
    }
}
