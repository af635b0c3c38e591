//! Narrative strategies.
//!
//! A narrator turns an assessed context into prose and follow-ups. It is
//! handed the derived risk level for wording purposes only; the level it
//! sees is already final.

use onboard_core::{
    Domain, InvoiceStatus, Narrative, RecommendedAction, RiskLevel, RunContext,
};

pub trait Narrator: Send + Sync {
    fn narrate(&self, ctx: &RunContext, level: RiskLevel) -> Narrative;
}

/// Deterministic narrator used in production. Summaries are assembled from
/// the issue counts; recommended actions come from a per-domain table and
/// are sorted by priority, integration fixes first.
#[derive(Debug, Default, Clone)]
pub struct RuleBasedNarrator;

impl RuleBasedNarrator {
    fn summary(ctx: &RunContext, level: RiskLevel) -> String {
        let name = ctx.account_name();
        let violations = ctx.violation_count();
        let warnings = ctx.warning_count();
        let errors = ctx.api_errors.len();

        if violations > 0 {
            let domains: Vec<String> =
                ctx.violations.keys().map(|d| d.to_string()).collect();
            let mut s = format!(
                "Onboarding for {} is blocked: {} violation(s) across {} (risk: {})",
                name,
                violations,
                domains.join(", "),
                level
            );
            if errors > 0 {
                s.push_str(&format!(", including {} integration failure(s)", errors));
            }
            if warnings > 0 {
                s.push_str(&format!("; {} warning(s) also noted", warnings));
            }
            s.push('.');
            s
        } else if warnings > 0 {
            format!(
                "Onboarding for {} passed all blocking checks with {} warning(s) to review (risk: {}).",
                name, warnings, level
            )
        } else {
            format!(
                "All checks passed for {}; ready to proceed with onboarding (risk: {}).",
                name, level
            )
        }
    }

    fn actions(ctx: &RunContext) -> Vec<RecommendedAction> {
        let mut actions = Vec::new();

        for error in &ctx.api_errors {
            actions.push(RecommendedAction::new(
                format!(
                    "Resolve {} {} failure: {}",
                    error.system, error.operation, error.resolution
                ),
                error.owning_team.clone(),
                1,
            ));
        }

        if ctx.violations.contains_key(&Domain::Contract) {
            actions.push(RecommendedAction::new(
                "Resolve contract signature or lifecycle issues",
                "Legal/CS",
                1,
            ));
        }
        if ctx.violations.contains_key(&Domain::Opportunity) {
            actions.push(RecommendedAction::new(
                "Confirm opportunity stage with the account team",
                "Sales",
                1,
            ));
        }
        if ctx.violations.contains_key(&Domain::Invoice) {
            actions.push(RecommendedAction::new(
                "Review invoice validity with Finance",
                "Finance",
                1,
            ));
        }
        if ctx.violations.contains_key(&Domain::Account) {
            actions.push(RecommendedAction::new(
                "Correct the account record in CRM",
                "Revenue Operations",
                2,
            ));
        }
        if ctx.violations.contains_key(&Domain::User) {
            actions.push(RecommendedAction::new(
                "Fix the owner user record in CRM",
                "Revenue Operations",
                2,
            ));
        }

        let overdue = ctx
            .invoice
            .as_present()
            .map(|i| i.status == InvoiceStatus::Overdue)
            .unwrap_or(false);
        if overdue {
            actions.push(RecommendedAction::new(
                "Collect the overdue invoice balance",
                "Finance",
                2,
            ));
        }

        if !ctx.warnings.is_empty() {
            actions.push(RecommendedAction::new(
                "Backfill incomplete CRM fields noted in warnings",
                "Revenue Operations",
                3,
            ));
        }

        if actions.is_empty() {
            actions.push(RecommendedAction::new(
                "Proceed with provisioning",
                "System",
                3,
            ));
        }

        actions.sort_by_key(|a| a.priority);
        actions
    }
}

impl Narrator for RuleBasedNarrator {
    fn narrate(&self, ctx: &RunContext, level: RiskLevel) -> Narrative {
        Narrative {
            summary: Self::summary(ctx, level),
            recommended_actions: Self::actions(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboard_core::{ErrorKind, Fetched, Invoice, SourceSystem, SystemError};

    fn ctx() -> RunContext {
        RunContext::new("ACME-001", "corr", "manual")
    }

    #[test]
    fn clean_context_gets_a_proceed_action() {
        let narrative = RuleBasedNarrator.narrate(&ctx(), RiskLevel::Low);
        assert!(narrative.summary.contains("All checks passed"));
        assert_eq!(narrative.recommended_actions.len(), 1);
        assert_eq!(
            narrative.recommended_actions[0].action,
            "Proceed with provisioning"
        );
        assert_eq!(narrative.recommended_actions[0].owner, "System");
    }

    #[test]
    fn blocked_summary_names_the_domains() {
        let mut c = ctx();
        c.add_violation(Domain::Contract, "unsigned");
        c.add_violation(Domain::Opportunity, "not won");

        let narrative = RuleBasedNarrator.narrate(&c, RiskLevel::High);
        assert!(narrative.summary.contains("is blocked"));
        assert!(narrative.summary.contains("opportunity, contract"));
        let owners: Vec<&str> = narrative
            .recommended_actions
            .iter()
            .map(|a| a.owner.as_str())
            .collect();
        assert!(owners.contains(&"Legal/CS"));
        assert!(owners.contains(&"Sales"));
    }

    #[test]
    fn integration_failures_rank_first() {
        let mut c = ctx();
        c.record_system_error(SystemError::new(
            SourceSystem::Billing,
            ErrorKind::RateLimit,
            "fetch_invoice",
            "RATE_LIMITED",
            "too many requests",
            429,
        ));
        c.add_warning(Domain::Account, "industry missing");

        let narrative = RuleBasedNarrator.narrate(&c, RiskLevel::Critical);
        assert!(narrative.summary.contains("integration failure"));
        assert_eq!(narrative.recommended_actions[0].priority, 1);
        assert!(narrative.recommended_actions[0]
            .action
            .starts_with("Resolve Billing fetch_invoice failure"));
    }

    #[test]
    fn overdue_invoice_adds_a_finance_action() {
        let mut c = ctx();
        c.invoice = Fetched::Present(Invoice {
            invoice_id: Some("INV-1".into()),
            status: InvoiceStatus::Overdue,
            ..Invoice::default()
        });
        c.add_warning(Domain::Invoice, "overdue");

        let narrative = RuleBasedNarrator.narrate(&c, RiskLevel::Medium);
        assert!(narrative
            .recommended_actions
            .iter()
            .any(|a| a.owner == "Finance" && a.action.contains("overdue")));
    }
}
