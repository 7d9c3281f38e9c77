//! Zenlayer Cloud reconciliation primitives
//!
//! Provider-agnostic building blocks used by every resource handler:
//!
//! - **Error classification** and deadline-bounded **retry**
//! - A pull-based **state poller** for asynchronous remote lifecycles
//! - Bounded-parallel **pagination** over describe actions
//! - Declarative **schemas** validated before any remote call
//! - The **attribute map** handed to handlers, with partial-update tracking
//! - The **provider registry** that serves host entry points
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                      host                        │
//! └─────────────────┬───────────────────────────────┘
//!                   │ create / read / update / delete / import
//! ┌─────────────────▼───────────────────────────────┐
//! │                zenlayer-cloud                    │
//! │  Provider registry ─ schema validation           │
//! │  OpContext ─ retry ─ waiter ─ paginate           │
//! └─────────────────┬───────────────────────────────┘
//!                   │ trait Resource / DataSource
//! ┌─────────────────▼───────────────────────────────┐
//! │              zenlayer-provider                   │
//! │     handlers ─ services ─ client factory         │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                zenlayer-sdk                      │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod context;
pub mod data;
pub mod error;
pub mod id;
pub mod paginate;
pub mod provider;
pub mod query;
pub mod response;
pub mod retry;
pub mod schema;
pub mod waiter;

// Re-exports
pub use context::{OpContext, Operation};
pub use data::{Attributes, ResourceData};
pub use error::{CloudError, Result};
pub use id::{CompositeId, parse_pair, parse_triple};
pub use paginate::describe_all;
pub use provider::{DataSource, Provider, Resource, RetryConfig};
pub use query::{NameFilter, hash_ids, write_output_file};
pub use response::{ApplyResponse, DataSourceResponse, Diagnostic, PlanResponse, Severity};
pub use retry::{RetryError, classify, retry, retry_api};
pub use schema::{AttributeSchema, AttributeType, ResourceSchema, Rule, Timeouts, Validator};
pub use waiter::{StateChangeConf, StateRefreshFunc, state_refresh, wait_settled};
