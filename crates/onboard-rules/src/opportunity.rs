//! Opportunity rule set.
//!
//! The deal must be Closed Won before onboarding may proceed. An open stage
//! is valid data but still a violation here; an unrecognized stage is both.
//! Tier 2 completeness checks only apply to won deals, since an unwon deal
//! is already blocked and its completeness is moot.

use onboard_core::{Domain, RunContext};

/// Stages that mean the deal is won.
pub const WON_STAGES: &[&str] = &["Closed Won"];

/// Valid open pipeline stages.
pub const OPEN_STAGES: &[&str] = &[
    "Prospecting",
    "Qualification",
    "Needs Analysis",
    "Value Proposition",
    "Negotiation",
    "Proposal",
];

pub fn check_opportunity(ctx: &mut RunContext) {
    if ctx.opportunity.is_failed() {
        return;
    }
    let Some(opp) = ctx.opportunity.as_present().cloned() else {
        ctx.add_violation(Domain::Opportunity, "Opportunity data missing");
        return;
    };

    let stage = opp.stage_name.as_str();
    let is_won = WON_STAGES.contains(&stage);

    // Tier 1: deal validity
    if opp.id.is_empty() {
        ctx.add_violation(Domain::Opportunity, "Opportunity id is required");
    }
    if opp.account_id.is_empty() {
        ctx.add_violation(Domain::Opportunity, "Opportunity account id is required");
    }
    if stage.is_empty() {
        ctx.add_violation(Domain::Opportunity, "Opportunity stage is required");
    } else {
        if !is_won && !OPEN_STAGES.contains(&stage) {
            ctx.add_violation(
                Domain::Opportunity,
                format!("Invalid opportunity stage: {}", stage),
            );
        }
        if !is_won {
            ctx.add_violation(
                Domain::Opportunity,
                format!("Opportunity not won (stage: {})", stage),
            );
        }
    }

    // Tier 2: commercial readiness, only meaningful once won
    if is_won {
        if opp.amount.is_none() {
            ctx.add_warning(Domain::Opportunity, "Closed Won opportunity has no amount");
        }
        if opp.close_date.is_none() {
            ctx.add_warning(
                Domain::Opportunity,
                "Closed Won opportunity missing close date",
            );
        }
        if opp.owner_id.is_none() {
            ctx.add_warning(Domain::Opportunity, "Closed Won opportunity has no owner");
        }
        if opp.contract_id.is_none() {
            ctx.add_warning(
                Domain::Opportunity,
                "Closed Won opportunity not linked to a contract",
            );
        }
    }
}
