use serde_json::Value;

use crate::domain::HomeworkStatus;

use super::error::PollError;

/// Builds the chat message for one homework record.
pub fn parse_status(record: &Value) -> Result<String, PollError> {
    let Value::Object(map) = record else {
        return Err(PollError::schema("homework is not a mapping"));
    };

    let homework_name = match map.get("homework_name") {
        None | Some(Value::Null) => return Err(PollError::schema("missing homework_name")),
        Some(Value::String(name)) if name.is_empty() => {
            return Err(PollError::schema("missing homework_name"))
        }
        Some(Value::String(name)) => name,
        Some(_) => return Err(PollError::schema("homework_name is not a string")),
    };

    let code = match map.get("status") {
        None | Some(Value::Null) => return Err(PollError::schema("missing status")),
        Some(Value::String(code)) => code,
        Some(_) => return Err(PollError::schema("status is not a string")),
    };

    let status =
        HomeworkStatus::from_code(code).ok_or_else(|| PollError::UnknownStatus(code.clone()))?;

    Ok(format!(
        "Changed status of work \"{homework_name}\". {}",
        status.verdict()
    ))
}
