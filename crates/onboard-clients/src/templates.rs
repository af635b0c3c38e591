//! Notification message templates.
//!
//! Rendered as plain strings; the transport is whatever [`crate::Notifier`]
//! implementation is wired in. Templates take only the values they print so
//! they are trivially testable.

use std::collections::BTreeMap;

use onboard_core::Domain;

/// Urgent channel for blocked onboardings.
pub const CHANNEL_ALERTS: &str = "#cs-onboarding-alerts";
/// Routine channel for escalations and completions.
pub const CHANNEL_ONBOARDING: &str = "#cs-onboarding";
/// Finance channel for overdue-invoice escalations.
pub const CHANNEL_FINANCE: &str = "#finance-alerts";

fn issue_lines(issues: &BTreeMap<Domain, Vec<String>>) -> String {
    let mut lines = Vec::new();
    for (domain, msgs) in issues {
        for msg in msgs {
            lines.push(format!("- [{}] {}", domain, msg));
        }
    }
    lines.join("\n")
}

/// Message for `#cs-onboarding-alerts` when a run is blocked.
pub fn blocked_message(
    account_name: &str,
    account_id: &str,
    violations: &BTreeMap<Domain, Vec<String>>,
    correlation_id: &str,
) -> String {
    format!(
        "Onboarding BLOCKED for {name}\n\n\
         The automated onboarding run found blocking issues that need attention.\n\n\
         Violations:\n{violations}\n\n\
         Next steps: resolve the issues in the source systems and re-trigger onboarding.\n\
         Account: {account_id} | Run: {correlation_id}",
        name = account_name,
        violations = issue_lines(violations),
        account_id = account_id,
        correlation_id = correlation_id,
    )
}

/// Message for `#cs-onboarding` when a run needs human review.
pub fn escalation_message(
    account_name: &str,
    account_id: &str,
    warnings: &BTreeMap<Domain, Vec<String>>,
    correlation_id: &str,
) -> String {
    format!(
        "Onboarding needs review for {name}\n\n\
         All blocking checks passed, but the run flagged items worth a look.\n\n\
         Warnings:\n{warnings}\n\n\
         Approve to proceed, or resolve the items first.\n\
         Account: {account_id} | Run: {correlation_id}",
        name = account_name,
        warnings = issue_lines(warnings),
        account_id = account_id,
        correlation_id = correlation_id,
    )
}

/// Message for `#cs-onboarding` when provisioning completed.
pub fn success_message(
    account_name: &str,
    account_id: &str,
    tenant_id: &str,
    correlation_id: &str,
) -> String {
    format!(
        "Onboarding complete for {name}\n\n\
         The customer has been provisioned and is ready to use the platform.\n\
         Tenant: {tenant_id}\n\n\
         Next steps: schedule the kickoff call and assign an onboarding specialist.\n\
         Account: {account_id} | Run: {correlation_id}",
        name = account_name,
        tenant_id = tenant_id,
        account_id = account_id,
        correlation_id = correlation_id,
    )
}

/// Message for `#finance-alerts` when an overdue invoice is holding up a run.
pub fn finance_overdue_message(
    account_name: &str,
    invoice_id: &str,
    amount_remaining: f64,
    days_overdue: i64,
    correlation_id: &str,
) -> String {
    format!(
        "Overdue invoice alert for {name}\n\n\
         An onboarding run is held up by an overdue invoice.\n\
         Invoice: {invoice_id}\n\
         Outstanding: ${amount:.2}\n\
         Days overdue: {days}\n\n\
         Onboarding cannot fully proceed until payment is resolved.\n\
         Run: {correlation_id}",
        name = account_name,
        invoice_id = invoice_id,
        amount = amount_remaining,
        days = days_overdue,
        correlation_id = correlation_id,
    )
}

/// Subject and body for the customer welcome email, sent after provisioning.
pub fn welcome_email(
    customer_name: &str,
    account_name: &str,
    tenant_id: &str,
    admin_url: &str,
) -> (String, String) {
    let subject = format!("Welcome aboard, {}!", account_name);
    let body = format!(
        "Hi {customer},\n\n\
         Your account has been provisioned and you're ready to get started.\n\n\
         Account details:\n\
         - Tenant ID: {tenant}\n\
         - Login URL: {url}\n\n\
         Your Customer Success Manager will reach out shortly to schedule a kickoff call.\n\n\
         Best regards,\n\
         The Onboarding Team",
        customer = customer_name,
        tenant = tenant_id,
        url = admin_url,
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_message_lists_every_violation() {
        let mut violations = BTreeMap::new();
        violations
            .entry(Domain::Contract)
            .or_insert_with(Vec::new)
            .push("Contract sent but awaiting signatures - cannot proceed".to_string());
        violations
            .entry(Domain::Opportunity)
            .or_insert_with(Vec::new)
            .push("Opportunity not won (stage: Negotiation)".to_string());

        let msg = blocked_message("Beta Industries", "BETA-002", &violations, "corr-1");
        assert!(msg.contains("BLOCKED"));
        assert!(msg.contains("[opportunity] Opportunity not won"));
        assert!(msg.contains("[contract] Contract sent"));
        assert!(msg.contains("corr-1"));
    }

    #[test]
    fn welcome_email_names_tenant_and_url() {
        let (subject, body) = welcome_email(
            "John Smith",
            "ACME Corp",
            "TEN-0A1B2C3D",
            "https://app.example.com/admin/TEN-0A1B2C3D",
        );
        assert!(subject.contains("ACME Corp"));
        assert!(body.contains("Hi John Smith"));
        assert!(body.contains("TEN-0A1B2C3D"));
        assert!(body.contains("https://app.example.com/admin/TEN-0A1B2C3D"));
    }
}
