//! Branch handlers: notification, provisioning, and the final summary.
//!
//! Failed notification sends are logged and skipped; a decision that has
//! already been made is never reopened because a Slack gateway was down.

use serde_json::json;

use onboard_clients::templates;
use onboard_core::{Decision, EngineError, InvoiceStatus, RunContext, ENGINE_VERSION};

use crate::OnboardingEngine;

impl OnboardingEngine {
    async fn send_slack(&self, ctx: &mut RunContext, channel: &str, message: &str) -> bool {
        match self.notifier.send_slack(channel, message).await {
            Ok(()) => {
                ctx.record_notification("slack", channel, message);
                true
            }
            Err(err) => {
                tracing::warn!(channel, code = %err.code, "slack send failed");
                false
            }
        }
    }

    async fn send_email(&self, ctx: &mut RunContext, to: &str, subject: &str, body: &str) -> bool {
        match self.notifier.send_email(to, subject, body).await {
            Ok(()) => {
                ctx.record_notification("email", to, &format!("{}\n\n{}", subject, body));
                true
            }
            Err(err) => {
                tracing::warn!(to, code = %err.code, "email send failed");
                false
            }
        }
    }

    /// The `NOTIFY` state: tell the CS team what happened, and loop Finance
    /// in when an overdue invoice is involved.
    pub(crate) async fn notify(&self, ctx: &mut RunContext) {
        let account_name = ctx.account_name().to_string();

        match ctx.decision {
            // Pending cannot normally reach this state; treat it as blocked
            // so a routing bug still pages someone.
            Decision::Block | Decision::Pending => {
                let message = templates::blocked_message(
                    &account_name,
                    &ctx.account_id,
                    &ctx.violations,
                    &ctx.correlation_id,
                );
                if self
                    .send_slack(ctx, templates::CHANNEL_ALERTS, &message)
                    .await
                {
                    ctx.record_action(
                        "cs_team_notified",
                        json!({ "channel": templates::CHANNEL_ALERTS, "urgency": "high" }),
                    );
                }
            }
            Decision::Escalate => {
                let message = templates::escalation_message(
                    &account_name,
                    &ctx.account_id,
                    &ctx.warnings,
                    &ctx.correlation_id,
                );
                if self
                    .send_slack(ctx, templates::CHANNEL_ONBOARDING, &message)
                    .await
                {
                    ctx.record_action(
                        "cs_team_notified",
                        json!({ "channel": templates::CHANNEL_ONBOARDING, "urgency": "medium" }),
                    );
                }
            }
            // Proceed routes to provisioning, never here.
            Decision::Proceed => {}
        }

        let overdue = ctx.invoice.as_present().and_then(|invoice| {
            (invoice.status == InvoiceStatus::Overdue).then(|| {
                (
                    invoice
                        .invoice_id
                        .clone()
                        .unwrap_or_else(|| "Unknown".into()),
                    invoice.amount_remaining,
                    invoice.days_overdue,
                )
            })
        });
        if let Some((invoice_id, amount_remaining, days_overdue)) = overdue {
            let message = templates::finance_overdue_message(
                &account_name,
                &invoice_id,
                amount_remaining,
                days_overdue,
                &ctx.correlation_id,
            );
            if self
                .send_slack(ctx, templates::CHANNEL_FINANCE, &message)
                .await
            {
                ctx.record_action(
                    "finance_notified",
                    json!({ "invoice_id": invoice_id, "days_overdue": days_overdue }),
                );
            }
        }
    }

    /// The `PROVISION` state, reached only on `PROCEED`: create the tenant,
    /// announce it, and welcome the customer.
    pub(crate) async fn provision(&self, ctx: &mut RunContext) -> Result<(), EngineError> {
        let account_name = ctx.account_name().to_string();
        let tier = ctx
            .clm_contract
            .as_present()
            .and_then(|c| c.key_terms.sla_tier.clone())
            .unwrap_or_else(|| "Starter".into());
        let customer_name = ctx
            .invoice
            .as_present()
            .and_then(|i| i.customer_name.clone())
            .unwrap_or_else(|| account_name.clone());

        let result = self
            .provisioner
            .provision(&ctx.account_id, &tier, &customer_name)
            .await;
        if result.account_id != ctx.account_id {
            return Err(EngineError::Collaborator(format!(
                "provisioner returned a tenant for account {}, expected {}",
                result.account_id, ctx.account_id
            )));
        }

        ctx.record_action(
            "tenant_provisioned",
            json!({
                "tenant_id": result.tenant_id,
                "tier": result.tier,
                "admin_url": result.admin_url,
            }),
        );

        let message = templates::success_message(
            &account_name,
            &ctx.account_id,
            &result.tenant_id,
            &ctx.correlation_id,
        );
        self.send_slack(ctx, templates::CHANNEL_ONBOARDING, &message)
            .await;

        if let Some(email) = ctx.invoice.as_present().and_then(|i| i.customer_email.clone()) {
            let (subject, body) = templates::welcome_email(
                &customer_name,
                &account_name,
                &result.tenant_id,
                &result.admin_url,
            );
            if self.send_email(ctx, &email, &subject, &body).await {
                ctx.record_action("welcome_email_sent", json!({ "to": email }));
            }
        }

        ctx.provisioning = Some(result);
        Ok(())
    }

    /// The `SUMMARIZE` state: store the final human-readable summary.
    pub(crate) fn summarize(&self, ctx: &mut RunContext) {
        let summary = match &ctx.risk_report {
            Some(report) => report.summary.clone(),
            None => format!(
                "Onboarding run for {} ended with decision {} ({} violations, {} warnings, {} integration failures). Engine v{}.",
                ctx.account_name(),
                ctx.decision,
                ctx.violation_count(),
                ctx.warning_count(),
                ctx.api_errors.len(),
                ENGINE_VERSION,
            ),
        };
        tracing::info!(decision = %ctx.decision, "run summarized");
        ctx.human_summary = summary;
    }
}
