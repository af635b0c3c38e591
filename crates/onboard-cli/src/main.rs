//! Demo binary: run one onboarding scenario end to end against the mock
//! collaborators and print the outcome.
//!
//! Try `onboard ACME-001`, `onboard BETA-002`, `onboard GAMMA-003`, or
//! `onboard AUTH-ERROR`. Exit code 1 means the run was blocked.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use onboard_clients::mock::{MockBilling, MockClm, MockCrm, MockNotifier, MockProvisioner};
use onboard_core::Decision;
use onboard_engine::OnboardingEngine;

#[derive(Parser)]
#[command(name = "onboard", version, about = "Run an onboarding decision for an account")]
struct Args {
    /// Account external id, e.g. ACME-001, BETA-002, GAMMA-003, DELETED-004
    account_id: String,

    /// Event that triggered the run
    #[arg(long, default_value = "manual")]
    event_type: String,

    /// Caller tracking id kept as the run's correlation id
    #[arg(long)]
    correlation_id: Option<String>,

    /// Print the full run context as JSON instead of the readable report
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let notifier = Arc::new(MockNotifier::new());
    let engine = OnboardingEngine::new(
        Arc::new(MockCrm::new()),
        Arc::new(MockClm::new()),
        Arc::new(MockBilling::new()),
        Arc::new(MockProvisioner::new()),
        notifier,
    );

    let ctx = match engine
        .run_with_correlation(
            &args.account_id,
            args.correlation_id.as_deref(),
            &args.event_type,
        )
        .await
    {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(2);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&ctx) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("error: failed to render run context: {}", err);
                std::process::exit(2);
            }
        }
    } else {
        println!("account:  {} ({})", ctx.account_name(), ctx.account_id);
        println!("decision: {}", ctx.decision);
        if let Some(report) = &ctx.risk_report {
            println!("risk:     {}", report.risk_level);
        }
        println!();
        println!("{}", ctx.human_summary);

        if let Some(report) = &ctx.risk_report {
            if !report.recommended_actions.is_empty() {
                println!();
                println!("recommended actions:");
                for action in &report.recommended_actions {
                    println!("  [P{}] {} -> {}", action.priority, action.action, action.owner);
                }
            }
        }

        if !ctx.notifications_sent.is_empty() {
            println!();
            println!("notifications:");
            for notification in &ctx.notifications_sent {
                println!("  {} -> {}", notification.channel, notification.recipient);
            }
        }

        if let Some(provisioning) = &ctx.provisioning {
            println!();
            println!(
                "tenant:   {} ({}, {})",
                provisioning.tenant_id, provisioning.tier, provisioning.admin_url
            );
        }
    }

    if ctx.decision == Decision::Block {
        std::process::exit(1);
    }
}
