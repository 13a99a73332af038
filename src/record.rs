use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pricing tier used as the lookup key into a [`PriceRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Annual,
    AnnualPerMonth,
    Monthly,
}

impl Plan {
    pub fn key(self) -> &'static str {
        match self {
            Plan::Annual => "annual",
            Plan::AnnualPerMonth => "annual_per_month",
            Plan::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown plan {0:?}")]
pub struct UnknownPlan(pub String);

impl FromStr for Plan {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annual" => Ok(Plan::Annual),
            "annual_per_month" => Ok(Plan::AnnualPerMonth),
            "monthly" => Ok(Plan::Monthly),
            other => Err(UnknownPlan(other.to_string())),
        }
    }
}

/// Decoded price payload. Only objects and arrays are accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord(Value);

impl PriceRecord {
    /// Wraps a decoded value, returning `None` for null and primitives.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(_) | Value::Array(_) => Some(Self(value)),
            _ => None,
        }
    }

    /// Decodes a response body. Malformed JSON is treated the same as a wrong shape.
    pub fn from_slice(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(Self::from_value)
    }

    #[allow(dead_code)]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Text to display for `plan`, if the record holds a string or number under its key.
    pub fn display_value(&self, plan: Plan) -> Option<String> {
        match self.0.get(plan.key())? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(number_text(n)),
            _ => None,
        }
    }
}

fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        // 60.0 renders as "60"
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
