//! Account rule set.
//!
//! Tier 1: hard identity requirements. Tier 2: business readiness.

use onboard_core::{Domain, RunContext};

pub fn check_account(ctx: &mut RunContext) {
    if ctx.account.is_failed() {
        return;
    }
    let Some(account) = ctx.account.as_present().cloned() else {
        ctx.add_violation(Domain::Account, "Account data missing");
        return;
    };

    // Tier 1: hard requirements
    if account.id.is_empty() {
        ctx.add_violation(Domain::Account, "Account id is required");
    }
    if account.name.is_empty() {
        ctx.add_violation(Domain::Account, "Account name is required");
    }
    if account.is_deleted {
        ctx.add_violation(Domain::Account, "Account is marked as deleted");
    }

    // Tier 2: business readiness
    if account.billing_country.is_none() {
        ctx.add_warning(
            Domain::Account,
            "Billing country missing; tax/provisioning may fail",
        );
    }
    if account.industry.is_none() {
        ctx.add_warning(Domain::Account, "Industry not set; segmentation limited");
    }
    if account.owner_id.is_none() {
        ctx.add_warning(Domain::Account, "Account has no assigned owner");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboard_core::{Account, Fetched};

    fn ctx_with(account: Account) -> RunContext {
        let mut ctx = RunContext::new("ACME-001", "corr", "manual");
        ctx.account = Fetched::Present(account);
        ctx
    }

    fn complete_account() -> Account {
        Account {
            id: "0018Z0001".into(),
            name: "ACME Corp".into(),
            billing_country: Some("United States".into()),
            industry: Some("Technology".into()),
            owner_id: Some("0058Z0001".into()),
            is_deleted: false,
        }
    }

    #[test]
    fn complete_account_is_clean() {
        let mut ctx = ctx_with(complete_account());
        check_account(&mut ctx);
        assert_eq!(ctx.violation_count(), 0);
        assert_eq!(ctx.warning_count(), 0);
    }

    #[test]
    fn deleted_account_is_a_violation() {
        let mut account = complete_account();
        account.is_deleted = true;
        let mut ctx = ctx_with(account);
        check_account(&mut ctx);
        assert_eq!(
            ctx.violations[&Domain::Account],
            vec!["Account is marked as deleted"]
        );
    }

    #[test]
    fn missing_account_records_single_violation() {
        let mut ctx = RunContext::new("ACME-001", "corr", "manual");
        check_account(&mut ctx);
        assert_eq!(ctx.violations[&Domain::Account], vec!["Account data missing"]);
        assert_eq!(ctx.warning_count(), 0);
    }

    #[test]
    fn failed_fetch_is_skipped() {
        let mut ctx = RunContext::new("ACME-001", "corr", "manual");
        ctx.account = Fetched::Failed;
        check_account(&mut ctx);
        assert_eq!(ctx.violation_count(), 0);
    }

    #[test]
    fn incomplete_account_warns_per_field() {
        let account = Account {
            id: "0018Z0001".into(),
            name: "Gamma Startup".into(),
            is_deleted: false,
            ..Account::default()
        };
        let mut ctx = ctx_with(account);
        check_account(&mut ctx);
        assert_eq!(ctx.violation_count(), 0);
        assert_eq!(ctx.warnings[&Domain::Account].len(), 3);
    }
}
