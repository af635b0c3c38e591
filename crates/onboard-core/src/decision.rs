//! The decision policy: one pure function from issue counts to a verdict.

use serde::{Deserialize, Serialize};

/// The ternary onboarding decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// No decision made yet. Never present on a finished run.
    #[default]
    Pending,
    /// Blocking violations or integration failures; a human must fix data
    /// or infrastructure before onboarding can be retried.
    Block,
    /// Clean of violations but warnings exist; a human reviews and approves.
    Escalate,
    /// Everything clean; provision automatically.
    Proceed,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Decision::Pending => "PENDING",
            Decision::Block => "BLOCK",
            Decision::Escalate => "ESCALATE",
            Decision::Proceed => "PROCEED",
        };
        write!(f, "{}", s)
    }
}

/// Merge issue counts into a decision.
///
/// Precedence is strict: any system error or violation forces `Block`
/// (system errors are also mirrored into violations before this runs, but
/// the count is taken separately so the policy never depends on that
/// mirroring); otherwise any warning forces `Escalate`; otherwise `Proceed`.
/// Nothing else influences the decision.
pub fn decide(violation_count: usize, warning_count: usize, api_error_count: usize) -> Decision {
    if api_error_count > 0 || violation_count > 0 {
        Decision::Block
    } else if warning_count > 0 {
        Decision::Escalate
    } else {
        Decision::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violations_force_block() {
        assert_eq!(decide(1, 0, 0), Decision::Block);
        assert_eq!(decide(3, 5, 0), Decision::Block);
    }

    #[test]
    fn api_errors_force_block_even_without_violations() {
        assert_eq!(decide(0, 0, 1), Decision::Block);
        assert_eq!(decide(0, 2, 1), Decision::Block);
    }

    #[test]
    fn warnings_alone_escalate() {
        assert_eq!(decide(0, 1, 0), Decision::Escalate);
        assert_eq!(decide(0, 7, 0), Decision::Escalate);
    }

    #[test]
    fn clean_run_proceeds() {
        assert_eq!(decide(0, 0, 0), Decision::Proceed);
    }
}
