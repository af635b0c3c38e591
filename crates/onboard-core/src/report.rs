//! Risk report types stored on the run context.
//!
//! The synthesis logic lives in `onboard-risk`; only the data shape is here
//! so the run context can hold a report without a dependency cycle.

use serde::{Deserialize, Serialize};

/// Overall risk of proceeding with this onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// One prioritized follow-up for an operator or system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedAction {
    pub action: String,
    /// Who should do this: "Finance", "Legal/CS", "System", and so on.
    pub owner: String,
    pub priority: u8,
}

impl RecommendedAction {
    pub fn new(action: impl Into<String>, owner: impl Into<String>, priority: u8) -> Self {
        Self {
            action: action.into(),
            owner: owner.into(),
            priority,
        }
    }
}

/// The free-text half of a risk report. Produced by a narrative strategy;
/// the risk level is never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub summary: String,
    pub recommended_actions: Vec<RecommendedAction>,
}

/// Full risk report: deterministic level plus narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub risk_level: RiskLevel,
    pub summary: String,
    pub recommended_actions: Vec<RecommendedAction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_order() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn risk_level_serializes_lowercase() {
        let json = serde_json::to_string(&RiskLevel::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }
}
