//! Alert rendering and delivery
//!
//! Turns budget notifications into Slack attachments and posts them to a webhook.

mod formatter;
mod notifier;

pub use formatter::{format_message, format_message_at, FOOTER, TITLE_PREFIX};
pub use notifier::{Notifier, WebhookDispatcher};
