//! # Budget Bridge
//!
//! Forwards cloud budget alerts to a Slack-compatible incoming webhook.
//!
//! Each invocation takes one budget alert event, renders it as a colored
//! Slack attachment, and posts it to the configured webhook.
//!
//! ## Architecture
//!
//! - **Models**: the inbound event envelope, budget notification and Slack payload
//! - **Alerting**: message formatting and webhook delivery
//! - **Handler**: per-event orchestration
//!
//! ## Quick Start
//!
//! ```bash
//! export SLACK_WEBHOOK_URL=https://hooks.slack.com/services/...
//! export ENVIRONMENT=production
//! budget-bridge handle --event event.json
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod alerting;
pub mod config;
pub mod error;
pub mod handler;
pub mod models;

pub use config::Config;
pub use error::{Error, Result};
pub use handler::{BudgetAlertHandler, HandlerResponse};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::alerting::{format_message, Notifier, WebhookDispatcher};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::handler::{BudgetAlertHandler, HandlerResponse, InvocationStage};
    pub use crate::models::*;
}
