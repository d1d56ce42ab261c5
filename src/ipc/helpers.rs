use serde_json::json;

use super::error::err;
use crate::store::StoreError;

/// Absent, null, and empty string all read as "not provided"; required-field
/// checks happen in the store ops.
pub fn opt_str(params: &serde_json::Value, key: &str) -> String {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Optional column that should land as SQL NULL when not provided.
pub fn opt_nullable_str(params: &serde_json::Value, key: &str) -> Option<String> {
    let s = opt_str(params, key);
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Identifiers arrive as JSON numbers or numeric strings.
pub fn opt_id(params: &serde_json::Value, key: &str) -> Option<i64> {
    let v = params.get(key)?;
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    v.as_str().and_then(|s| s.trim().parse().ok())
}

pub fn opt_amount(params: &serde_json::Value, key: &str) -> Option<f64> {
    let v = params.get(key)?;
    if let Some(n) = v.as_f64() {
        return Some(n);
    }
    v.as_str().and_then(|s| s.trim().parse().ok())
}

/// Map a store failure onto the wire. `storage_code` names the statement
/// family that failed (db_insert_failed, db_update_failed, ...).
pub fn store_err(
    id: &str,
    e: StoreError,
    storage_code: &'static str,
    table: &'static str,
) -> serde_json::Value {
    match e {
        StoreError::Validation(message) => err(id, "bad_params", message, None),
        StoreError::Auth => err(id, "invalid_credentials", "Invalid credentials", None),
        StoreError::Storage(e) => err(
            id,
            storage_code,
            e.to_string(),
            Some(json!({ "table": table })),
        ),
    }
}
