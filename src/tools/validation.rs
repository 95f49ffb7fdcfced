//! Required-field checks for tool call arguments.

/// Collect every schema-required field that the arguments fail to supply.
///
/// A field is missing when the key is absent, null, or an empty/whitespace
/// string. Returns the full list so the model can be told everything that is
/// needed in one result instead of discovering gaps one retry at a time.
pub fn missing_required(
    args: &serde_json::Value,
    schema: &serde_json::Value,
) -> Vec<String> {
    let Some(required) = schema.get("required").and_then(|r| r.as_array()) else {
        return Vec::new();
    };

    let obj = args.as_object();
    required
        .iter()
        .filter_map(|field| field.as_str())
        .filter(|name| {
            let value = obj.and_then(|o| o.get(*name));
            !is_supplied(value)
        })
        .map(str::to_string)
        .collect()
}

fn is_supplied(value: Option<&serde_json::Value>) -> bool {
    match value {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}
