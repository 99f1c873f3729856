//! Per-event entry point
//!
//! One call to [`BudgetAlertHandler::handle`] is one invocation: parse the
//! embedded notification, render it, deliver it. Any failure ends the
//! invocation and is returned unchanged so the caller can decide whether to
//! retry.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info_span, Instrument};

use crate::alerting::{format_message, Notifier};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{BudgetNotification, SlackPayload, SnsEvent};

/// Body returned when the alert was delivered
pub const SUCCESS_BODY: &str = "Notification sent successfully";

/// Stage an invocation is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStage {
    /// Extracting the notification from the event
    Parsing,
    /// Rendering and posting the alert
    Delivering,
    /// Finished, successfully or not
    Done,
}

impl fmt::Display for InvocationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsing => f.write_str("parsing"),
            Self::Delivering => f.write_str("delivering"),
            Self::Done => f.write_str("done"),
        }
    }
}

/// Acknowledgement returned to the invoking runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    /// Always 200 on success
    pub status_code: u16,
    /// Human-readable confirmation
    pub body: String,
}

impl HandlerResponse {
    /// The fixed success acknowledgement
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: SUCCESS_BODY.to_string(),
        }
    }
}

/// Extract and parse the budget notification embedded in an event
pub fn parse_notification(event: &SnsEvent) -> Result<BudgetNotification> {
    let message = event
        .first_message()
        .ok_or_else(|| Error::parse("event contains no records"))?;

    if message.trim().is_empty() {
        return Err(Error::parse("event record has an empty message"));
    }

    BudgetNotification::from_json(message)
        .map_err(|e| Error::parse(format!("invalid budget notification: {e}")))
}

/// Parse and render an event without delivering it
pub fn render(event: &SnsEvent, environment: &str) -> Result<SlackPayload> {
    let notification = parse_notification(event)?;
    Ok(format_message(&notification, environment))
}

/// Handles budget alert events
pub struct BudgetAlertHandler<N> {
    config: Config,
    notifier: N,
}

impl<N: Notifier> BudgetAlertHandler<N> {
    /// Create a handler that delivers through `notifier`
    pub fn new(config: Config, notifier: N) -> Self {
        Self { config, notifier }
    }

    /// The configuration this handler was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle a raw event document
    pub async fn handle_json(&self, raw: &str) -> Result<HandlerResponse> {
        let event: SnsEvent = serde_json::from_str(raw).map_err(|e| {
            error!(stage = %InvocationStage::Parsing, error = %e, "Event is not valid JSON");
            Error::parse(format!("invalid event: {e}"))
        })?;
        self.handle(&event).await
    }

    /// Handle one event
    pub async fn handle(&self, event: &SnsEvent) -> Result<HandlerResponse> {
        let span = info_span!("budget_alert", environment = self.config.environment_name());
        self.process(event).instrument(span).await
    }

    async fn process(&self, event: &SnsEvent) -> Result<HandlerResponse> {
        debug!(stage = %InvocationStage::Parsing, "Processing budget notification");
        let notification = parse_notification(event).map_err(|e| {
            error!(stage = %InvocationStage::Parsing, error = %e, "Error processing budget notification");
            e
        })?;

        debug!(
            stage = %InvocationStage::Delivering,
            budget = %notification.budget_name,
            threshold = %notification.threshold,
            "Delivering budget alert"
        );
        let webhook_url = self.config.webhook_url().map_err(|e| {
            error!(stage = %InvocationStage::Delivering, error = %e, "Error processing budget notification");
            e
        })?;
        let payload = format_message(&notification, self.config.environment_name());

        // The dispatcher logs its own failures.
        self.notifier.deliver(webhook_url, &payload).await?;

        debug!(stage = %InvocationStage::Done, "Budget notification handled");
        Ok(HandlerResponse::success())
    }
}
