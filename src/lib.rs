//! # DineDesk
//!
//! Core of the restaurant operations dashboard: the data model, the REST
//! client, the shared query cache, new-order alerts, toasts and form rules.
//! The same crate backs the browser UI (`dinedesk-ui`) and the `dinedesk`
//! terminal client.
//!
//! ## Modules
//!
//! - [`models`]: DTOs returned by the backend
//! - [`client`]: REST client over a pluggable [`client::HttpTransport`]
//! - [`cache`]: shared query cache with in-flight de-duplication
//! - [`notify`]: new-order detection and the notification chime
//! - [`toast`]: transient notification queue
//! - [`validation`] / [`format`]: form rules and display helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use dinedesk::client::{ApiClient, ReqwestTransport, Session};
//! use dinedesk::models::OrderFilter;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Rc::new(Session::in_memory());
//!     session.set_token("secret");
//!     let api = ApiClient::new("http://localhost:3000/api", ReqwestTransport::new(30)?, session);
//!
//!     let orders = api.list_orders("acc_1", &OrderFilter::default()).await?;
//!     println!("{} orders", orders.len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod format;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod models;
pub mod notify;
pub mod toast;
pub mod validation;

// Re-export top-level types for convenience
pub use cache::{QueryCache, QueryKey, QueryPolicy, Resource};

pub use client::{ApiClient, ApiError, ApiResult, HttpTransport, Session, TokenStore};

pub use config::{Config, ConfigError, LoggingConfig, PollingConfig};

pub use notify::{AlertDecision, ChimePlayer, ChimeSpec, OrderAlert, OrderAlertTracker};

pub use toast::{Scheduler, Toast, ToastKind, Toaster};

pub use validation::ValidationError;
