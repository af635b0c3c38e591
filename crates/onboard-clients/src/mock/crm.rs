//! Mock CRM client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use onboard_core::{
    Account, CrmContract, ErrorKind, FetchOutcome, Opportunity, SourceSystem, SystemError, User,
};

use crate::traits::CrmClient;

pub const OWNER_USER_ID: &str = "0058Z000001OWNER";

#[derive(Debug, Default)]
pub struct MockCrm {
    latency: Option<Duration>,
}

impl MockCrm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
        }
    }

    fn simulated_error(account_id: &str, operation: &str) -> Option<SystemError> {
        let err = match account_id {
            "AUTH-ERROR" => SystemError::new(
                SourceSystem::Crm,
                ErrorKind::Authentication,
                operation,
                "INVALID_SESSION_ID",
                "Session expired or invalid",
                401,
            ),
            "PERM-ERROR" => SystemError::new(
                SourceSystem::Crm,
                ErrorKind::Authorization,
                operation,
                "INSUFFICIENT_ACCESS",
                "Access denied: cannot read Account",
                403,
            ),
            "SERVER-ERROR" => SystemError::new(
                SourceSystem::Crm,
                ErrorKind::Server,
                operation,
                "SERVER_UNAVAILABLE",
                "Service temporarily unavailable",
                500,
            ),
            _ => return None,
        };
        Some(err)
    }
}

#[async_trait]
impl CrmClient for MockCrm {
    async fn fetch_account(&self, account_id: &str) -> FetchOutcome<Account> {
        super::simulate_latency(self.latency).await;
        if let Some(err) = Self::simulated_error(account_id, "fetch_account") {
            return FetchOutcome::SystemError(err);
        }

        let account = match account_id {
            "ACME-001" => Account {
                id: "0018Z00003ACMEQ".into(),
                name: "ACME Corp".into(),
                billing_country: Some("United States".into()),
                industry: Some("Technology".into()),
                owner_id: Some(OWNER_USER_ID.into()),
                is_deleted: false,
            },
            "BETA-002" => Account {
                id: "0018Z00003BETAQ".into(),
                name: "Beta Industries".into(),
                billing_country: Some("Canada".into()),
                industry: Some("Manufacturing".into()),
                owner_id: Some(OWNER_USER_ID.into()),
                is_deleted: false,
            },
            "GAMMA-003" => Account {
                id: "0018Z00003GAMMAQ".into(),
                name: "Gamma Startup".into(),
                // Billing country never entered; flagged as a warning.
                billing_country: None,
                industry: Some("Fintech".into()),
                owner_id: Some(OWNER_USER_ID.into()),
                is_deleted: false,
            },
            "DELETED-004" => Account {
                id: "0018Z00003DELTAQ".into(),
                name: "Deleted Corp".into(),
                billing_country: None,
                industry: None,
                owner_id: None,
                is_deleted: true,
            },
            _ => return FetchOutcome::NotFound,
        };
        FetchOutcome::Success(account)
    }

    async fn fetch_user(&self, user_id: &str) -> FetchOutcome<User> {
        super::simulate_latency(self.latency).await;
        let user = match user_id {
            OWNER_USER_ID => User {
                id: OWNER_USER_ID.into(),
                username: "cs.manager@vendor.example".into(),
                email: "cs.manager@vendor.example".into(),
                first_name: Some("Sarah".into()),
                last_name: Some("Johnson".into()),
                title: Some("Customer Success Manager".into()),
                department: Some("Customer Success".into()),
                timezone: Some("America/New_York".into()),
                manager_id: Some("0058Z000001MANAGER".into()),
                is_active: true,
                profile_id: "00e8Z000001PROFILE".into(),
                is_portal_enabled: false,
                account_id: None,
            },
            "INACTIVE-USER" => User {
                id: "INACTIVE-USER".into(),
                username: "inactive@vendor.example".into(),
                email: "inactive@vendor.example".into(),
                is_active: false,
                profile_id: "00e8Z000001PROFILE".into(),
                ..User::default()
            },
            _ => return FetchOutcome::NotFound,
        };
        FetchOutcome::Success(user)
    }

    async fn fetch_opportunity_by_account(&self, account_id: &str) -> FetchOutcome<Opportunity> {
        super::simulate_latency(self.latency).await;
        let opp = match account_id {
            "ACME-001" => Opportunity {
                id: "0068Z000001OPPACME".into(),
                name: "ACME Corp - Enterprise Deal".into(),
                account_id: "0018Z00003ACMEQ".into(),
                stage_name: "Closed Won".into(),
                amount: Some(150_000.0),
                close_date: NaiveDate::from_ymd_opt(2024, 1, 15),
                owner_id: Some(OWNER_USER_ID.into()),
                contract_id: Some("8008Z000000CONTR".into()),
            },
            "BETA-002" => Opportunity {
                id: "0068Z000001OPPBETA".into(),
                name: "Beta Industries - Growth Plan".into(),
                account_id: "0018Z00003BETAQ".into(),
                stage_name: "Negotiation".into(),
                amount: Some(75_000.0),
                close_date: NaiveDate::from_ymd_opt(2024, 2, 28),
                owner_id: Some(OWNER_USER_ID.into()),
                contract_id: None,
            },
            "GAMMA-003" => Opportunity {
                id: "0068Z000001OPPGAMMA".into(),
                name: "Gamma Startup - Pilot".into(),
                account_id: "0018Z00003GAMMAQ".into(),
                stage_name: "Closed Won".into(),
                amount: Some(25_000.0),
                close_date: NaiveDate::from_ymd_opt(2024, 1, 20),
                owner_id: Some(OWNER_USER_ID.into()),
                // Never linked to a contract; flagged as a warning.
                contract_id: None,
            },
            _ => return FetchOutcome::NotFound,
        };
        FetchOutcome::Success(opp)
    }

    async fn fetch_contract_by_account(&self, account_id: &str) -> FetchOutcome<CrmContract> {
        super::simulate_latency(self.latency).await;
        let contract = match account_id {
            "ACME-001" => CrmContract {
                id: "8008Z000000CONTR".into(),
                account_id: "0018Z00003ACMEQ".into(),
                status: "Activated".into(),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                owner_id: Some(OWNER_USER_ID.into()),
            },
            "BETA-002" => CrmContract {
                id: "8008Z000000DRAFT".into(),
                account_id: "0018Z00003BETAQ".into(),
                status: "Draft".into(),
                start_date: NaiveDate::from_ymd_opt(2024, 2, 1),
                owner_id: Some(OWNER_USER_ID.into()),
            },
            "GAMMA-003" => CrmContract {
                id: "8008Z000000PEND".into(),
                account_id: "0018Z00003GAMMAQ".into(),
                status: "In Approval Process".into(),
                start_date: NaiveDate::from_ymd_opt(2024, 2, 1),
                owner_id: None,
            },
            _ => return FetchOutcome::NotFound,
        };
        FetchOutcome::Success(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn auth_error_account_fails_with_authentication_kind() {
        let crm = MockCrm::new();
        match crm.fetch_account("AUTH-ERROR").await {
            FetchOutcome::SystemError(err) => {
                assert_eq!(err.kind, ErrorKind::Authentication);
                assert_eq!(err.code, "INVALID_SESSION_ID");
                assert_eq!(err.http_status, 401);
            }
            other => panic!("expected a system error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let crm = MockCrm::new();
        assert!(matches!(
            crm.fetch_account("NOPE-999").await,
            FetchOutcome::NotFound
        ));
    }

    #[tokio::test]
    async fn acme_scenario_is_fully_linked() {
        let crm = MockCrm::new();
        let account = match crm.fetch_account("ACME-001").await {
            FetchOutcome::Success(a) => a,
            other => panic!("expected account, got {:?}", other),
        };
        let opp = match crm.fetch_opportunity_by_account("ACME-001").await {
            FetchOutcome::Success(o) => o,
            other => panic!("expected opportunity, got {:?}", other),
        };
        assert_eq!(opp.account_id, account.id);
        assert_eq!(opp.stage_name, "Closed Won");
        assert_eq!(account.owner_id.as_deref(), Some(OWNER_USER_ID));
    }
}
