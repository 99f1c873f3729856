//! Budget notification data model

use std::fmt;

use serde::{Deserialize, Serialize};

/// A numeric value as it appears in a budget notification.
///
/// Budget notifications carry amounts either as JSON numbers (`90`) or as
/// strings (`"450.00"`). Either way the value renders exactly as it arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// A JSON number
    Number(serde_json::Number),
    /// A string, usually a decimal like `"450.00"`
    Text(String),
}

impl Amount {
    /// Numeric value, if the amount is a number or a numeric string
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
        }
    }
}

/// Largest magnitude at which every whole f64 is exactly an integer
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl fmt::Display for Amount {
    #[allow(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole floats render without a fraction: 500.0 -> "500", 1e3 -> "1000".
            Self::Number(n) if n.is_f64() => match n.as_f64() {
                Some(v) if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER => {
                    write!(f, "{}", v as i64)
                }
                _ => write!(f, "{n}"),
            },
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A cost budget alert emitted by the cloud budgeting service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BudgetNotification {
    /// Account the budget belongs to
    pub account: String,

    /// Human-readable budget name
    pub budget_name: String,

    /// Spend so far in the budget period
    pub actual_spend: Amount,

    /// Configured budget limit
    pub budget_limit: Amount,

    /// Forecasted spend at the end of the period
    pub forecasted_spend: Amount,

    /// Threshold percentage that fired
    pub threshold: Amount,

    /// Currency or usage unit, e.g. `USD`
    pub unit: String,
}

impl BudgetNotification {
    /// Parse a notification from its JSON text
    pub fn from_json(message: &str) -> serde_json::Result<Self> {
        serde_json::from_str(message)
    }
}
