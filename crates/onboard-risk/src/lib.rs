//! Onboard Risk: turns an assessed run context into a risk report.
//!
//! The report has two halves with very different trust levels. The risk
//! level is derived by a fixed rule from the violation, warning, and
//! integration-failure counts; it is computed here, before any narrative
//! strategy runs, and stored directly on the report. The narrative half
//! (summary text and recommended actions) comes from a pluggable
//! [`Narrator`], which receives the already-derived level and returns only
//! prose. A narrator cannot raise or lower the level by construction.

pub mod level;
pub mod narrate;

pub use level::derive_risk_level;
pub use narrate::{Narrator, RuleBasedNarrator};

use onboard_core::{RiskReport, RunContext};

/// Build the full risk report for a validated context.
pub fn synthesize(ctx: &RunContext, narrator: &dyn Narrator) -> RiskReport {
    let risk_level = derive_risk_level(ctx);
    let narrative = narrator.narrate(ctx, risk_level);

    tracing::info!(
        account_id = %ctx.account_id,
        risk_level = %risk_level,
        actions = narrative.recommended_actions.len(),
        "risk report synthesized"
    );

    RiskReport {
        risk_level,
        summary: narrative.summary,
        recommended_actions: narrative.recommended_actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboard_core::{Narrative, RiskLevel};

    /// A narrator that ignores the derived level entirely.
    struct ContraryNarrator;

    impl Narrator for ContraryNarrator {
        fn narrate(&self, _ctx: &RunContext, _level: RiskLevel) -> Narrative {
            Narrative {
                summary: "everything is fine".into(),
                recommended_actions: Vec::new(),
            }
        }
    }

    #[test]
    fn narrator_cannot_change_the_derived_level() {
        let mut ctx = RunContext::new("ACME-001", "corr", "manual");
        ctx.add_violation(onboard_core::Domain::Contract, "unsigned");

        let report = synthesize(&ctx, &ContraryNarrator);
        assert_eq!(report.risk_level, RiskLevel::High);
        assert_eq!(report.summary, "everything is fine");
    }
}
