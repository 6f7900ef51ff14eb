//! State Management
//!
//! Global application state, the cached-query hook and new-order alerts.

pub mod global;
pub mod order_alerts;
pub mod query;

pub use global::{provide_global_state, GlobalState};
pub use order_alerts::use_order_alerts;
pub use query::{use_query, QueryState};
