use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Quantity fields accept numbers or numeric strings; anything missing,
/// unparseable or not positive counts as 1.
pub fn deserialize_quantity<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(quantity_or_one(raw.as_ref()))
}

fn quantity_or_one(raw: Option<&Value>) -> i32 {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed
        .filter(|q| *q > 0)
        .and_then(|q| i32::try_from(q).ok())
        .unwrap_or(1)
}
