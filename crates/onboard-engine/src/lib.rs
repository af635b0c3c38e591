//! Onboard Engine: the orchestrator that drives one run end to end.
//!
//! The engine owns nothing but collaborator handles; all run state lives on
//! the [`RunContext`] it returns. The state machine is the pure transition
//! function in `onboard-core`; this crate executes each state against the
//! collaborators: the fetch chain, the rule sets, risk synthesis, the
//! decision, and finally the notification or provisioning side effects and
//! the human summary.
//!
//! Side effects are strictly decision-scoped: nothing is provisioned unless
//! the decision is `PROCEED`, and a run cancelled mid-flight jumps to
//! `SUMMARIZE` with whatever it has, never leaving the decision `PENDING`.

pub mod cancel;
mod effects;
mod fetch;

pub use cancel::CancelToken;

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use onboard_clients::{BillingClient, ClmClient, CrmClient, Notifier, Provisioner};
use onboard_core::{decide, Decision, EngineError, RunContext, Stage};
use onboard_risk::{Narrator, RuleBasedNarrator};

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Deadline for each collaborator fetch; an elapsed deadline is recorded
    /// as a TIMEOUT system error.
    pub call_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(5),
        }
    }
}

pub struct OnboardingEngine {
    crm: Arc<dyn CrmClient>,
    clm: Arc<dyn ClmClient>,
    billing: Arc<dyn BillingClient>,
    provisioner: Arc<dyn Provisioner>,
    notifier: Arc<dyn Notifier>,
    narrator: Arc<dyn Narrator>,
    config: EngineConfig,
}

impl OnboardingEngine {
    pub fn new(
        crm: Arc<dyn CrmClient>,
        clm: Arc<dyn ClmClient>,
        billing: Arc<dyn BillingClient>,
        provisioner: Arc<dyn Provisioner>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            crm,
            clm,
            billing,
            provisioner,
            notifier,
            narrator: Arc::new(RuleBasedNarrator),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn Narrator>) -> Self {
        self.narrator = narrator;
        self
    }

    /// Run one onboarding end to end and return the finished context.
    pub async fn run(&self, account_id: &str, event_type: &str) -> Result<RunContext, EngineError> {
        self.run_with_cancel(account_id, None, event_type, CancelToken::new())
            .await
    }

    /// Like [`run`](Self::run), but keeps the caller's tracking id (a
    /// webhook event id, say) as the run's correlation id. `None` or a blank
    /// id falls back to a fresh UUID.
    pub async fn run_with_correlation(
        &self,
        account_id: &str,
        correlation_id: Option<&str>,
        event_type: &str,
    ) -> Result<RunContext, EngineError> {
        self.run_with_cancel(account_id, correlation_id, event_type, CancelToken::new())
            .await
    }

    /// The full entrypoint: caller-supplied correlation id and a cancel
    /// token checked before each state; a cancelled run jumps to
    /// `SUMMARIZE`.
    pub async fn run_with_cancel(
        &self,
        account_id: &str,
        correlation_id: Option<&str>,
        event_type: &str,
        cancel: CancelToken,
    ) -> Result<RunContext, EngineError> {
        if account_id.trim().is_empty() {
            return Err(EngineError::InvalidState("empty account id".into()));
        }

        let correlation_id = match correlation_id {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };
        let mut ctx = RunContext::new(account_id, correlation_id, event_type);
        tracing::info!(
            account_id,
            correlation_id = %ctx.correlation_id,
            event_type,
            "onboarding run started"
        );

        // Invoice fetched concurrently with the CLM contract, applied one
        // state later.
        let mut pending_invoice = None;

        // The backbone has no cycles, so a bounded walk is enough; running
        // out of budget means the transition table regressed.
        let mut budget = 16;
        while !ctx.stage.is_terminal() {
            budget -= 1;
            if budget == 0 {
                return Err(EngineError::InvalidState(format!(
                    "state machine did not terminate (stuck near {})",
                    ctx.stage
                )));
            }

            if cancel.is_cancelled() && !matches!(ctx.stage, Stage::Summarize) {
                tracing::warn!(stage = %ctx.stage, "run cancelled; jumping to summarize");
                if ctx.decision == Decision::Pending {
                    // Counts collected so far still force a block or an
                    // escalation, but a clean-looking context is not a green
                    // light: validation may never have run, so an
                    // interrupted run is never auto-approved.
                    ctx.decision = match decide(
                        ctx.violation_count(),
                        ctx.warning_count(),
                        ctx.api_errors.len(),
                    ) {
                        Decision::Proceed => Decision::Escalate,
                        other => other,
                    };
                }
                ctx.stage = Stage::Summarize;
                self.summarize(&mut ctx);
                ctx.stage = Stage::Done;
                break;
            }

            let from = ctx.stage;
            ctx.stage = from.next(ctx.decision);
            tracing::info!(from = %from, to = %ctx.stage, "stage transition");

            match ctx.stage {
                Stage::FetchAccount => self.fetch_account_chain(&mut ctx).await,
                Stage::FetchClm => {
                    pending_invoice = self.fetch_clm_and_invoice(&mut ctx).await;
                }
                Stage::FetchInvoice => self.apply_invoice(&mut ctx, pending_invoice.take()),
                Stage::Validate => onboard_rules::validate(&mut ctx),
                Stage::AnalyzeRisk => {
                    ctx.risk_report =
                        Some(onboard_risk::synthesize(&ctx, self.narrator.as_ref()));
                }
                Stage::Decide => {
                    ctx.decision = decide(
                        ctx.violation_count(),
                        ctx.warning_count(),
                        ctx.api_errors.len(),
                    );
                    tracing::info!(decision = %ctx.decision, "decision made");
                }
                Stage::Notify => self.notify(&mut ctx).await,
                Stage::Provision => self.provision(&mut ctx).await?,
                Stage::Summarize => self.summarize(&mut ctx),
                Stage::Init | Stage::Done => {}
            }
        }

        tracing::info!(
            account_id,
            decision = %ctx.decision,
            violations = ctx.violation_count(),
            warnings = ctx.warning_count(),
            "onboarding run finished"
        );
        Ok(ctx)
    }
}
