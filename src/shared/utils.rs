//! Utility functions and helpers

use serde_json::Value;

/// Parse an unsigned balance rendered by the chain gateway.
///
/// Gateways render balances either as plain JSON numbers or as decimal
/// strings, sometimes comma-grouped ("1,234,567") when the human encoding is
/// in play.
pub fn parse_balance(value: &Value) -> Option<u128> {
    match value {
        Value::Number(n) => n.as_u64().map(u128::from),
        Value::String(s) => {
            let digits: String = s.chars().filter(|c| *c != ',').collect();
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            digits.parse().ok()
        }
        _ => None,
    }
}

/// Format a scaled amount for display
pub fn format_amount(value: f64) -> String {
    format!("{:.6}", value)
}
