//! Onboard Core: run context, decision policy, and error taxonomy
//!
//! This crate holds the data model shared by the whole engine. One onboarding
//! run accumulates everything into a single [`RunContext`]: the records pulled
//! from the systems of record, the violations and warnings found by the rule
//! sets, every integration failure, the ternary decision, and the audit trail
//! of actions and notifications.
//!
//! The crate is deliberately free of I/O. Fetching lives in `onboard-engine`,
//! rule sets in `onboard-rules`, and risk synthesis in `onboard-risk`; they
//! all meet here.

pub mod context;
pub mod decision;
pub mod error;
pub mod fetch;
pub mod record;
pub mod report;
pub mod stage;

pub use context::{ActionRecord, Domain, NotificationRecord, RunContext};
pub use decision::{decide, Decision};
pub use error::{EngineError, EntityContext, ErrorKind, SourceSystem, SystemError};
pub use fetch::{FetchOutcome, Fetched};
pub use record::{
    Account, ClmContract, ClmStatus, CrmContract, Invoice, InvoiceStatus, KeyTerms, Opportunity,
    ProvisioningResult, Signatory, User,
};
pub use report::{Narrative, RecommendedAction, RiskLevel, RiskReport};
pub use stage::Stage;

/// Engine version reported in summaries and logs.
pub const ENGINE_VERSION: &str = "1.0.0";
