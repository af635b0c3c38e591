//! Risk level derivation.

use onboard_core::{RiskLevel, RunContext};

/// Derive the risk level from the assessed context.
///
/// The rule is fixed and count-based:
/// any integration failure, or more than two violations, is `Critical`;
/// any violation at all is `High`; more than two warnings is `Medium`;
/// a clean context is `Low`. Note that integration failures are mirrored
/// into the violation map, so an error-bearing run always satisfies the
/// violation clauses as well.
pub fn derive_risk_level(ctx: &RunContext) -> RiskLevel {
    let violations = ctx.violation_count();
    if !ctx.api_errors.is_empty() || violations > 2 {
        RiskLevel::Critical
    } else if violations > 0 {
        RiskLevel::High
    } else if ctx.warning_count() > 2 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboard_core::{Domain, ErrorKind, SourceSystem, SystemError};

    fn ctx() -> RunContext {
        RunContext::new("ACME-001", "corr", "manual")
    }

    #[test]
    fn clean_context_is_low() {
        assert_eq!(derive_risk_level(&ctx()), RiskLevel::Low);
    }

    #[test]
    fn two_warnings_stay_low_three_go_medium() {
        let mut c = ctx();
        c.add_warning(Domain::Account, "w1");
        c.add_warning(Domain::Invoice, "w2");
        assert_eq!(derive_risk_level(&c), RiskLevel::Low);

        c.add_warning(Domain::User, "w3");
        assert_eq!(derive_risk_level(&c), RiskLevel::Medium);
    }

    #[test]
    fn any_violation_is_high() {
        let mut c = ctx();
        c.add_violation(Domain::Contract, "unsigned");
        assert_eq!(derive_risk_level(&c), RiskLevel::High);
    }

    #[test]
    fn three_violations_are_critical() {
        let mut c = ctx();
        c.add_violation(Domain::Contract, "v1");
        c.add_violation(Domain::Account, "v2");
        c.add_violation(Domain::User, "v3");
        assert_eq!(derive_risk_level(&c), RiskLevel::Critical);
    }

    #[test]
    fn a_single_integration_failure_is_critical() {
        let mut c = ctx();
        c.record_system_error(SystemError::new(
            SourceSystem::Crm,
            ErrorKind::Server,
            "fetch_account",
            "INTERNAL",
            "upstream 500",
            500,
        ));
        assert_eq!(derive_risk_level(&c), RiskLevel::Critical);
    }
}
