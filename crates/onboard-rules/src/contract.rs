//! CLM contract rule set.
//!
//! The CLM system is the source of truth for signatures; the CRM contract
//! object is separate and not validated here. Only EXECUTED and SIGNED
//! statuses permit onboarding. Every other recognized status gets a
//! status-tailored violation so the notification tells the operator what to
//! actually do; an unrecognized status string is itself a violation.

use onboard_core::{ClmStatus, Domain, RunContext};

pub fn check_contract(ctx: &mut RunContext) {
    if ctx.clm_contract.is_failed() {
        return;
    }
    let Some(contract) = ctx.clm_contract.as_present().cloned() else {
        ctx.add_violation(
            Domain::Contract,
            "CLM contract data missing - cannot verify signatures",
        );
        return;
    };

    // Tier 1: lifecycle validity
    if contract.contract_id.is_none() {
        ctx.add_violation(Domain::Contract, "CLM contract id is missing");
    }

    match contract.lifecycle() {
        None => {
            ctx.add_violation(
                Domain::Contract,
                format!("Invalid CLM contract status: {}", contract.status),
            );
        }
        Some(status) if !status.permits_onboarding() => {
            let message = match status {
                ClmStatus::Draft => {
                    "Contract is still in DRAFT - not yet sent for signatures".to_string()
                }
                ClmStatus::Sent => {
                    "Contract sent but awaiting signatures - cannot proceed".to_string()
                }
                ClmStatus::Expired => "Contract has EXPIRED - needs renewal".to_string(),
                ClmStatus::Voided => "Contract has been VOIDED - cannot proceed".to_string(),
                other => format!("Contract status {:?} does not allow onboarding", other),
            };
            ctx.add_violation(Domain::Contract, message);
        }
        Some(_) => {}
    }

    // Tier 2: business readiness
    if contract.effective_date.is_none() {
        ctx.add_warning(Domain::Contract, "Contract has no effective date set");
    }
    if contract.expiry_date.is_none() {
        ctx.add_warning(
            Domain::Contract,
            "Contract has no expiry date - renewal tracking limited",
        );
    }
    let pending = contract.pending_signatories();
    if !pending.is_empty() {
        let names: Vec<&str> = pending.iter().map(|s| s.name.as_str()).collect();
        ctx.add_warning(
            Domain::Contract,
            format!("Signatures still pending from: {}", names.join(", ")),
        );
    }
}
