//! Mock contract-lifecycle-management client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};

use onboard_core::{
    ClmContract, ErrorKind, FetchOutcome, KeyTerms, Signatory, SourceSystem, SystemError,
};

use crate::traits::ClmClient;

#[derive(Debug, Default)]
pub struct MockClm {
    latency: Option<Duration>,
}

impl MockClm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
        }
    }
}

fn signatory(name: &str, email: &str, signed: bool) -> Signatory {
    Signatory {
        name: name.into(),
        email: email.into(),
        signed,
    }
}

#[async_trait]
impl ClmClient for MockClm {
    async fn fetch_contract_by_account(&self, account_id: &str) -> FetchOutcome<ClmContract> {
        super::simulate_latency(self.latency).await;
        let today = Utc::now().date_naive();

        let contract = match account_id {
            "ACME-001" => ClmContract {
                contract_id: Some("CLM-CTR-001".into()),
                name: "ACME Corp - Enterprise Service Agreement".into(),
                status: "EXECUTED".into(),
                effective_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                expiry_date: NaiveDate::from_ymd_opt(2024, 12, 31),
                signatories: vec![
                    signatory("John Smith", "john.smith@acme.example", true),
                    signatory("Sarah Johnson", "sarah.johnson@vendor.example", true),
                ],
                key_terms: KeyTerms {
                    payment_terms: Some("Net 30".into()),
                    sla_tier: Some("Enterprise".into()),
                    auto_renewal: true,
                },
            },
            "BETA-002" => ClmContract {
                contract_id: Some("CLM-CTR-002".into()),
                name: "Beta Industries - Growth Service Agreement".into(),
                status: "SENT".into(),
                effective_date: None,
                expiry_date: None,
                signatories: vec![
                    signatory("Jane Doe", "jane.doe@beta.example", false),
                    signatory("Sarah Johnson", "sarah.johnson@vendor.example", true),
                ],
                key_terms: KeyTerms {
                    payment_terms: Some("Net 45".into()),
                    sla_tier: Some("Growth".into()),
                    auto_renewal: false,
                },
            },
            "GAMMA-003" => ClmContract {
                contract_id: Some("CLM-CTR-003".into()),
                name: "Gamma Startup - Starter Agreement".into(),
                status: "SIGNED".into(),
                effective_date: Some(today - ChronoDuration::days(30)),
                expiry_date: Some(today + ChronoDuration::days(335)),
                signatories: vec![signatory(
                    "Alex Founder",
                    "founders@gamma.example",
                    true,
                )],
                key_terms: KeyTerms {
                    payment_terms: Some("Net 30".into()),
                    sla_tier: Some("Starter".into()),
                    auto_renewal: false,
                },
            },
            "AUTH-ERROR" => {
                return FetchOutcome::SystemError(SystemError::new(
                    SourceSystem::ContractManagement,
                    ErrorKind::Authentication,
                    "fetch_contract",
                    "UNAUTHORIZED",
                    "Invalid or expired API key",
                    401,
                ))
            }
            "SERVER-ERROR" => {
                return FetchOutcome::SystemError(SystemError::new(
                    SourceSystem::ContractManagement,
                    ErrorKind::Server,
                    "fetch_contract",
                    "INTERNAL_ERROR",
                    "Service temporarily unavailable",
                    500,
                ))
            }
            _ => return FetchOutcome::NotFound,
        };
        FetchOutcome::Success(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn beta_contract_awaits_one_signature() {
        let clm = MockClm::new();
        let contract = match clm.fetch_contract_by_account("BETA-002").await {
            FetchOutcome::Success(c) => c,
            other => panic!("expected contract, got {:?}", other),
        };
        assert_eq!(contract.status, "SENT");
        let pending = contract.pending_signatories();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "Jane Doe");
    }

    #[tokio::test]
    async fn gamma_contract_permits_onboarding() {
        let clm = MockClm::new();
        let contract = match clm.fetch_contract_by_account("GAMMA-003").await {
            FetchOutcome::Success(c) => c,
            other => panic!("expected contract, got {:?}", other),
        };
        assert!(contract.lifecycle().unwrap().permits_onboarding());
        assert_eq!(contract.key_terms.sla_tier.as_deref(), Some("Starter"));
    }
}
