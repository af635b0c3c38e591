//! Onboard Clients: the seams to the systems of record.
//!
//! Each upstream system is a trait the engine depends on: CRM, contract
//! lifecycle management, billing, tenant provisioning, and notifications.
//! The mock implementations in [`mock`] carry the canonical demo scenarios
//! and back the integration tests and the CLI demo; production
//! implementations would live behind the same traits.

pub mod mock;
pub mod templates;
pub mod traits;

pub use traits::{BillingClient, ClmClient, CrmClient, Notifier, Provisioner, RawInvoice};
