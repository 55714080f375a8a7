use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tg_core::audit_detail::SiblingOrder;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// clap value parser for a sibling order: any finite number.
pub fn finite_order(raw: &str) -> Result<f64, String> {
    let order: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if order.is_finite() {
        Ok(order)
    } else {
        Err(format!("order must be finite, got '{raw}'"))
    }
}

/// clap value parser for one `<id>=<order>` reorder pair.
pub fn sibling_order(raw: &str) -> Result<SiblingOrder, String> {
    let (id, order) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <id>=<order>, got '{raw}'"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing id in '{raw}'"));
    }
    Ok(SiblingOrder {
        id: id.to_string(),
        order: finite_order(order)?,
    })
}

/// RFC 3339 timestamp, normalized to UTC.
pub fn parse_due(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|error| anyhow::anyhow!("invalid due date '{raw}': {error}"))
}

/// A JSON object for `decision.position`.
pub fn parse_position(raw: &str) -> anyhow::Result<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|error| anyhow::anyhow!("invalid position '{raw}': {error}"))?;
    if !value.is_object() {
        anyhow::bail!("invalid position '{raw}': expected a JSON object");
    }
    Ok(value)
}

/// Repeated flag values as an optional list (`None` when the flag was not given).
#[must_use]
pub fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}
