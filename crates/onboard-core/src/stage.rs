//! The orchestrator's state machine: a linear backbone with one branch.
//!
//! ```text
//! Init -> FetchAccount -> FetchClm -> FetchInvoice -> Validate
//!      -> AnalyzeRisk -> Decide -> { Notify | Provision } -> Summarize -> Done
//! ```
//!
//! `Decide` is the only branch point: `Proceed` routes to `Provision`,
//! everything else routes to `Notify`. Both paths converge at `Summarize`.
//! The transition function is pure so the routing table is testable on its
//! own, without an engine or collaborators.

use serde::{Deserialize, Serialize};

use crate::decision::Decision;

/// States of one onboarding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Init,
    FetchAccount,
    FetchClm,
    FetchInvoice,
    Validate,
    AnalyzeRisk,
    Decide,
    Notify,
    Provision,
    Summarize,
    Done,
}

impl Stage {
    /// The next state given the current state and decision. The decision is
    /// only consulted at the `Decide` branch point.
    pub fn next(self, decision: Decision) -> Stage {
        match self {
            Stage::Init => Stage::FetchAccount,
            Stage::FetchAccount => Stage::FetchClm,
            Stage::FetchClm => Stage::FetchInvoice,
            Stage::FetchInvoice => Stage::Validate,
            Stage::Validate => Stage::AnalyzeRisk,
            Stage::AnalyzeRisk => Stage::Decide,
            Stage::Decide => match decision {
                Decision::Proceed => Stage::Provision,
                // Block, Escalate, and a leftover Pending all route to the
                // notification path.
                _ => Stage::Notify,
            },
            Stage::Notify => Stage::Summarize,
            Stage::Provision => Stage::Summarize,
            Stage::Summarize => Stage::Done,
            Stage::Done => Stage::Done,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Stage::Init => "init",
            Stage::FetchAccount => "fetch_account",
            Stage::FetchClm => "fetch_clm",
            Stage::FetchInvoice => "fetch_invoice",
            Stage::Validate => "validate",
            Stage::AnalyzeRisk => "analyze_risk",
            Stage::Decide => "decide",
            Stage::Notify => "notify",
            Stage::Provision => "provision",
            Stage::Summarize => "summarize",
            Stage::Done => "done",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backbone_is_linear_until_decide() {
        let mut stage = Stage::Init;
        let expected = [
            Stage::FetchAccount,
            Stage::FetchClm,
            Stage::FetchInvoice,
            Stage::Validate,
            Stage::AnalyzeRisk,
            Stage::Decide,
        ];
        for want in expected {
            stage = stage.next(Decision::Pending);
            assert_eq!(stage, want);
        }
    }

    #[test]
    fn decide_branches_on_decision() {
        assert_eq!(Stage::Decide.next(Decision::Proceed), Stage::Provision);
        assert_eq!(Stage::Decide.next(Decision::Block), Stage::Notify);
        assert_eq!(Stage::Decide.next(Decision::Escalate), Stage::Notify);
        assert_eq!(Stage::Decide.next(Decision::Pending), Stage::Notify);
    }

    #[test]
    fn both_branches_converge_on_summarize() {
        assert_eq!(Stage::Notify.next(Decision::Block), Stage::Summarize);
        assert_eq!(Stage::Provision.next(Decision::Proceed), Stage::Summarize);
        assert_eq!(Stage::Summarize.next(Decision::Block), Stage::Done);
    }

    #[test]
    fn done_is_terminal() {
        assert!(Stage::Done.is_terminal());
        assert_eq!(Stage::Done.next(Decision::Proceed), Stage::Done);
    }
}
