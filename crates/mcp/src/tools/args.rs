#![forbid(unsafe_code)]

use super::envelope::{OutputFormat, ToolError};
use lr_core::ids::CaseId;
use lr_core::model::Role;
use lr_review::Materials;
use serde_json::{Map, Value, json};

pub(crate) const DEFAULT_TOP_K: usize = 3;

pub(crate) fn object(args: &Value) -> Result<&Map<String, Value>, ToolError> {
    args.as_object()
        .ok_or_else(|| ToolError::invalid_input("arguments must be an object"))
}

/// Integer ids, or strings holding one, are accepted.
pub(crate) fn optional_case_id(obj: &Map<String, Value>) -> Result<Option<CaseId>, ToolError> {
    let parsed = match obj.get("case_id") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };
    parsed
        .map(|id| Some(CaseId::new(id)))
        .ok_or_else(|| ToolError::invalid_input("case_id must be an integer"))
}

pub(crate) fn case_id(obj: &Map<String, Value>) -> Result<CaseId, ToolError> {
    optional_case_id(obj)?.ok_or_else(|| {
        ToolError::invalid_input("case_id is required")
            .with_recovery("Call identify_case or list_case_types to obtain one.")
    })
}

pub(crate) fn role(obj: &Map<String, Value>, default: Role) -> Result<Role, ToolError> {
    match obj.get("role") {
        None | Some(Value::Null) => Ok(default),
        Some(Value::String(raw)) => Role::parse(raw).map_err(|err| {
            ToolError::invalid_input(err.to_string())
                .with_recovery("Use one of: plaintiff, defendant, neutral.")
        }),
        Some(_) => Err(ToolError::invalid_input("role must be a string")),
    }
}

pub(crate) fn format(obj: &Map<String, Value>) -> Result<OutputFormat, ToolError> {
    match obj.get("format").and_then(Value::as_str).map(str::trim) {
        None => Ok(OutputFormat::Json),
        Some(raw) if raw.eq_ignore_ascii_case("json") => Ok(OutputFormat::Json),
        Some(raw) if raw.eq_ignore_ascii_case("markdown") || raw.eq_ignore_ascii_case("md") => {
            Ok(OutputFormat::Markdown)
        }
        Some(raw) => Err(ToolError::invalid_input(format!("unknown format: {raw}"))
            .with_recovery("Use json or markdown.")),
    }
}

pub(crate) fn optional_text<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a str>, ToolError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(_) => Err(ToolError::invalid_input(format!("{key} must be a string"))),
    }
}

/// Empty text is allowed: classification degrades instead of failing.
pub(crate) fn text<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a str, ToolError> {
    optional_text(obj, key)?
        .ok_or_else(|| ToolError::invalid_input(format!("{key} is required")))
}

pub(crate) fn top_k(obj: &Map<String, Value>) -> Result<usize, ToolError> {
    match obj.get("top_k") {
        None | Some(Value::Null) => Ok(DEFAULT_TOP_K),
        Some(value) => value
            .as_u64()
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| ToolError::invalid_input("top_k must be a non-negative integer")),
    }
}

/// Never fails. A bare array is read as the evidence list; unusable shapes mean no evidence.
pub(crate) fn materials(obj: &Map<String, Value>) -> Materials {
    match obj.get("materials") {
        Some(Value::Array(items)) => Materials::from_value(&json!({ "evidences": items })),
        Some(value) => Materials::from_value(value),
        None => Materials::default(),
    }
}
