use validator::ValidationError;

/// Rejects strings that are empty once surrounding whitespace is removed.
///
/// `length(min = 1)` alone accepts "   ", which would derive an empty slug.
/// NUL characters are rejected as well, see [`validate_no_nul`].
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    validate_no_nul(value)
}

/// Postgres text columns cannot store `\0`
pub fn validate_no_nul(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        let mut err = ValidationError::new("nul");
        err.message = Some("must not contain NUL characters".into());
        return Err(err);
    }
    Ok(())
}

/// Same rule for JSONB: no `\0` in any string or object key
pub fn validate_json_no_nul(value: &serde_json::Value) -> Result<(), ValidationError> {
    match value {
        serde_json::Value::String(s) => validate_no_nul(s),
        serde_json::Value::Array(items) => items.iter().try_for_each(validate_json_no_nul),
        serde_json::Value::Object(map) => map.iter().try_for_each(|(key, item)| {
            validate_no_nul(key)?;
            validate_json_no_nul(item)
        }),
        _ => Ok(()),
    }
}
