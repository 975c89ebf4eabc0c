use serde_json::Value;

/// Report the first required field that is missing from the payload.
///
/// "Missing" is deliberately coarse: absent, null, empty string, zero and
/// false all count. Callers answer 400 with the returned message. The order
/// of `required` decides which field is named when several are missing.
pub fn validate_input(data: &Value, required: &[&str]) -> Option<String> {
    for field in required {
        let missing = match data.get(*field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Bool(b)) => !b,
            Some(Value::Number(n)) => n.as_f64() == Some(0.0),
            Some(_) => false,
        };
        if missing {
            return Some(format!("Missing required field: {}", field));
        }
    }
    None
}
