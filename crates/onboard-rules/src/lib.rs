//! Onboard Rules: the multi-domain validation engine.
//!
//! Five independent rule sets, one per business domain. Each is a pure
//! function of the run context: it reads the fetched records, appends
//! violations (Tier 1, blocking) and warnings (Tier 2, non-blocking), and
//! never calls a collaborator. Rule sets do not short-circuit; a single pass
//! records every applicable issue so operators see the full picture at once.
//!
//! An absent record yields a single "missing" entry and the rule set returns
//! immediately. A record whose fetch ended in a system error is skipped
//! entirely: the failure is already mirrored into the `api_error` domain and
//! a second, vaguer message would only add noise.

pub mod account;
pub mod contract;
pub mod invoice;
pub mod opportunity;
pub mod user;

use onboard_core::RunContext;

pub use account::check_account;
pub use contract::check_contract;
pub use invoice::check_invoice;
pub use opportunity::check_opportunity;
pub use user::check_user;

/// Run all five rule sets against the context.
pub fn validate(ctx: &mut RunContext) {
    check_account(ctx);
    check_user(ctx);
    check_opportunity(ctx);
    check_contract(ctx);
    check_invoice(ctx);

    tracing::info!(
        account_id = %ctx.account_id,
        violations = ctx.violation_count(),
        warnings = ctx.warning_count(),
        "validation complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboard_core::{Account, Fetched, RunContext};

    fn base_ctx() -> RunContext {
        RunContext::new("ACME-001", "corr-1", "closed_won")
    }

    #[test]
    fn validation_is_idempotent_on_identical_snapshots() {
        let mut ctx = base_ctx();
        ctx.account = Fetched::Present(Account {
            id: "001".into(),
            name: "ACME Corp".into(),
            is_deleted: false,
            ..Account::default()
        });

        let mut once = ctx.clone();
        let mut twice = ctx.clone();
        validate(&mut once);
        validate(&mut twice);

        assert_eq!(once.violations, twice.violations);
        assert_eq!(once.warnings, twice.warnings);
    }

    #[test]
    fn empty_context_records_one_missing_entry_per_domain() {
        let mut ctx = base_ctx();
        validate(&mut ctx);

        // Account, user, opportunity, and contract absence block; invoice
        // absence only warns.
        assert_eq!(ctx.violations.len(), 4);
        assert!(ctx
            .warnings
            .get(&onboard_core::Domain::Invoice)
            .is_some());
        for msgs in ctx.violations.values() {
            assert_eq!(msgs.len(), 1);
        }
    }
}
