//! Mock tenant provisioner.

use async_trait::async_trait;
use uuid::Uuid;

use onboard_core::ProvisioningResult;

use crate::traits::Provisioner;

#[derive(Debug, Default)]
pub struct MockProvisioner;

impl MockProvisioner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provisioner for MockProvisioner {
    async fn provision(
        &self,
        account_id: &str,
        tier: &str,
        customer_name: &str,
    ) -> ProvisioningResult {
        let tenant_id = format!(
            "TEN-{}",
            Uuid::new_v4().simple().to_string()[..8].to_uppercase()
        );

        tracing::info!(
            account_id,
            tenant_id = %tenant_id,
            tier,
            customer = customer_name,
            "tenant provisioned"
        );

        ProvisioningResult {
            tenant_id: tenant_id.clone(),
            account_id: account_id.to_string(),
            tier: tier.to_string(),
            status: "ACTIVE".into(),
            admin_url: format!("https://app.example.com/admin/{}", tenant_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tenant_ids_follow_the_expected_shape() {
        let result = MockProvisioner::new()
            .provision("ACME-001", "Enterprise", "ACME Corp")
            .await;
        assert!(result.tenant_id.starts_with("TEN-"));
        assert_eq!(result.tenant_id.len(), 12);
        assert_eq!(result.status, "ACTIVE");
        assert!(result.admin_url.ends_with(&result.tenant_id));
    }
}
