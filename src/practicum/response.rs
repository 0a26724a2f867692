use serde_json::Value;

use crate::domain::ApiResponse;

use super::error::PollError;

/// Checks an untrusted payload against the documented response shape.
pub fn validate(payload: Value) -> Result<ApiResponse, PollError> {
    let Value::Object(map) = payload else {
        return Err(PollError::schema("not a mapping"));
    };
    if !map.contains_key("current_date") {
        return Err(PollError::schema("missing current_date"));
    }
    if !map.contains_key("homeworks") {
        return Err(PollError::schema("missing homeworks"));
    }
    if !map.get("homeworks").is_some_and(Value::is_array) {
        return Err(PollError::schema("homeworks not a list"));
    }
    if !map.get("current_date").is_some_and(Value::is_i64) {
        return Err(PollError::schema("current_date not an integer"));
    }

    let response: ApiResponse = serde_json::from_value(Value::Object(map))
        .map_err(|err| PollError::schema(err.to_string()))?;

    if response.homeworks.is_empty() {
        tracing::debug!(target: "practicum", current_date = response.current_date, "no new statuses");
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema_detail(result: Result<ApiResponse, PollError>) -> String {
        match result {
            Err(PollError::Schema(detail)) => detail,
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_payload_is_typed() {
        let response = validate(json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1_700_000_000,
        }))
        .unwrap();

        assert_eq!(response.current_date, 1_700_000_000);
        assert_eq!(response.homeworks.len(), 1);
        assert_eq!(response.homeworks[0]["homework_name"], "hw1");
    }

    #[test]
    fn test_empty_homeworks_is_valid() {
        let response = validate(json!({"homeworks": [], "current_date": 5})).unwrap();
        assert!(response.homeworks.is_empty());
    }

    #[test]
    fn test_non_mapping_payloads_are_rejected() {
        for payload in [json!([]), json!("homeworks"), json!(42), Value::Null] {
            assert_eq!(schema_detail(validate(payload)), "not a mapping");
        }
    }

    #[test]
    fn test_missing_keys_are_distinguished() {
        assert_eq!(
            schema_detail(validate(json!({"homeworks": []}))),
            "missing current_date"
        );
        assert_eq!(
            schema_detail(validate(json!({"current_date": 1}))),
            "missing homeworks"
        );
    }

    #[test]
    fn test_homeworks_must_be_a_list() {
        for homeworks in [json!(3), json!("hw"), json!({"homework_name": "x"}), Value::Null] {
            let payload = json!({"homeworks": homeworks, "current_date": 1});
            assert_eq!(schema_detail(validate(payload)), "homeworks not a list");
        }
    }

    #[test]
    fn test_current_date_must_be_an_integer() {
        let payload = json!({"homeworks": [], "current_date": "yesterday"});
        assert_eq!(schema_detail(validate(payload)), "current_date not an integer");
    }
}
