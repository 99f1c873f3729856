//! Renders budget notifications as Slack attachments

use chrono::{DateTime, Utc};

use crate::models::{BudgetNotification, Severity, SlackAttachment, SlackField, SlackPayload};

/// Footer shown under every budget alert
pub const FOOTER: &str = "AWS Budget Notification";

/// Title prefix; the budget name follows
pub const TITLE_PREFIX: &str = "AWS Budget Alert: ";

/// Render a notification as a Slack payload stamped with the current time
pub fn format_message(notification: &BudgetNotification, environment: &str) -> SlackPayload {
    format_message_at(notification, environment, Utc::now())
}

/// Render a notification as a Slack payload stamped with `now`.
///
/// Values are interpolated as received; nothing is validated.
pub fn format_message_at(
    notification: &BudgetNotification,
    environment: &str,
    now: DateTime<Utc>,
) -> SlackPayload {
    let unit = &notification.unit;
    let severity = Severity::from_threshold(notification.threshold.as_f64());

    SlackPayload {
        attachments: vec![SlackAttachment {
            color: severity.color().to_string(),
            title: format!("{TITLE_PREFIX}{}", notification.budget_name),
            fields: vec![
                SlackField::short("Account", notification.account.clone()),
                SlackField::short("Environment", environment),
                SlackField::short(
                    "Budget Limit",
                    format!("{} {unit}", notification.budget_limit),
                ),
                SlackField::short(
                    "Actual Spend",
                    format!("{} {unit}", notification.actual_spend),
                ),
                SlackField::short(
                    "Forecasted Spend",
                    format!("{} {unit}", notification.forecasted_spend),
                ),
                SlackField::short("Threshold", format!("{}%", notification.threshold)),
            ],
            footer: FOOTER.to_string(),
            ts: now.timestamp(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn monthly_ec2() -> BudgetNotification {
        BudgetNotification {
            account: "123456789012".to_string(),
            budget_name: "Monthly-EC2".to_string(),
            actual_spend: Amount::from("450.00"),
            budget_limit: Amount::from("500.00"),
            forecasted_spend: Amount::from("520.00"),
            threshold: Amount::from(90),
            unit: "USD".to_string(),
        }
    }

    #[test]
    fn test_format_monthly_ec2() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let payload = format_message_at(&monthly_ec2(), "production", now);

        let expected = serde_json::json!({
            "attachments": [{
                "color": "#ff0000",
                "title": "AWS Budget Alert: Monthly-EC2",
                "fields": [
                    { "title": "Account", "value": "123456789012", "short": true },
                    { "title": "Environment", "value": "production", "short": true },
                    { "title": "Budget Limit", "value": "500.00 USD", "short": true },
                    { "title": "Actual Spend", "value": "450.00 USD", "short": true },
                    { "title": "Forecasted Spend", "value": "520.00 USD", "short": true },
                    { "title": "Threshold", "value": "90%", "short": true }
                ],
                "footer": "AWS Budget Notification",
                "ts": 1_709_294_400
            }]
        });

        assert_eq!(serde_json::to_value(&payload).unwrap(), expected);
    }

    #[rstest]
    #[case(Amount::from(79), "#36a64f")]
    #[case(Amount::from(80), "#ffa500")]
    #[case(Amount::from(89), "#ffa500")]
    #[case(Amount::from(90), "#ff0000")]
    #[case(Amount::from(100), "#ff0000")]
    #[case(Amount::from("85"), "#ffa500")]
    #[case(Amount::from("unknown"), "#36a64f")]
    fn test_color_follows_threshold(#[case] threshold: Amount, #[case] color: &str) {
        let notification = BudgetNotification {
            threshold,
            ..monthly_ec2()
        };
        let payload = format_message(&notification, "dev");
        assert_eq!(payload.attachments[0].color, color);
    }

    #[test]
    fn test_field_order_is_fixed() {
        let notification = BudgetNotification {
            account: String::new(),
            budget_name: "weird".to_string(),
            actual_spend: Amount::from("abc"),
            budget_limit: Amount::from(0),
            forecasted_spend: Amount::from(""),
            threshold: Amount::from("-"),
            unit: String::new(),
        };
        let payload = format_message(&notification, "");

        assert_eq!(payload.attachments.len(), 1);
        let titles: Vec<&str> = payload.attachments[0]
            .fields
            .iter()
            .map(|f| f.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Account",
                "Environment",
                "Budget Limit",
                "Actual Spend",
                "Forecasted Spend",
                "Threshold"
            ]
        );
        assert!(payload.attachments[0].fields.iter().all(|f| f.short));
    }

    #[test]
    fn test_whole_float_amounts_render_without_fraction() {
        let message = r#"{"Account":"123456789012","BudgetName":"Monthly-EC2","ActualSpend":450.00,"BudgetLimit":500.0,"ForecastedSpend":1e3,"Threshold":90.0,"Unit":"USD"}"#;
        let notification = BudgetNotification::from_json(message).unwrap();
        let payload = format_message(&notification, "production");
        let attachment = payload.attachment().unwrap();

        assert_eq!(attachment.field("Budget Limit"), Some("500 USD"));
        assert_eq!(attachment.field("Actual Spend"), Some("450 USD"));
        assert_eq!(attachment.field("Forecasted Spend"), Some("1000 USD"));
        assert_eq!(attachment.field("Threshold"), Some("90%"));
        assert_eq!(attachment.color, "#ff0000");
    }

    #[test]
    fn test_malformed_values_render_literally() {
        let notification = BudgetNotification {
            actual_spend: Amount::from("lots"),
            threshold: Amount::from("ninety"),
            ..monthly_ec2()
        };
        let payload = format_message(&notification, "qa");
        let attachment = payload.attachment().unwrap();

        assert_eq!(attachment.field("Actual Spend"), Some("lots USD"));
        assert_eq!(attachment.field("Threshold"), Some("ninety%"));
    }

    #[test]
    fn test_timestamp_is_current_second() {
        let before = Utc::now().timestamp();
        let payload = format_message(&monthly_ec2(), "production");
        let after = Utc::now().timestamp();

        let ts = payload.attachments[0].ts;
        assert!(ts >= before && ts <= after);
    }

    #[test]
    fn test_timestamp_truncates_subseconds() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_999).unwrap();
        let payload = format_message_at(&monthly_ec2(), "production", now);
        assert_eq!(payload.attachments[0].ts, 1_700_000_000);
    }
}
