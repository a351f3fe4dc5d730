#![forbid(unsafe_code)]

use lr_review::ReviewError;
use lr_storage::StoreError;
use serde_json::{Map, Value, json};

pub(crate) const INVALID_INPUT: &str = "INVALID_INPUT";
pub(crate) const NOT_FOUND: &str = "NOT_FOUND";
pub(crate) const STORE_ERROR: &str = "STORE_ERROR";
pub(crate) const UNKNOWN_TOOL: &str = "UNKNOWN_TOOL";
pub(crate) const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Json,
    Markdown,
}

impl OutputFormat {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ToolError {
    pub(crate) code: &'static str,
    pub(crate) message: String,
    pub(crate) recovery: Option<String>,
}

impl ToolError {
    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            recovery: None,
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(INVALID_INPUT, message)
    }

    pub(crate) fn with_recovery(mut self, recovery: impl Into<String>) -> Self {
        self.recovery = Some(recovery.into());
        self
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("code".to_string(), Value::String(self.code.to_string()));
        obj.insert("message".to_string(), Value::String(self.message.clone()));
        if let Some(recovery) = &self.recovery {
            obj.insert("recovery".to_string(), Value::String(recovery.clone()));
        }
        Value::Object(obj)
    }
}

impl From<StoreError> for ToolError {
    fn from(err: StoreError) -> Self {
        tracing::warn!(error = %err, "knowledge store failure");
        ToolError::new(STORE_ERROR, err.to_string())
            .with_recovery("Check that the knowledge database is readable and has the expected tables.")
    }
}

impl From<ReviewError> for ToolError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound { .. } => ToolError::new(NOT_FOUND, err.to_string())
                .with_recovery("Call list_case_types or identify_case to obtain a valid case_id."),
            ReviewError::EmptyCatalogue => ToolError::new(NOT_FOUND, err.to_string())
                .with_recovery("Load case types into the knowledge database."),
            ReviewError::Store(store) => store.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ToolResponse {
    pub(crate) intent: String,
    pub(crate) result: Value,
    pub(crate) format: OutputFormat,
    pub(crate) error: Option<ToolError>,
}

impl ToolResponse {
    pub(crate) fn success(intent: &str, result: Value) -> Self {
        Self {
            intent: intent.to_string(),
            result,
            format: OutputFormat::Json,
            error: None,
        }
    }

    pub(crate) fn markdown(intent: &str, rendered: String) -> Self {
        Self {
            intent: intent.to_string(),
            result: Value::String(rendered),
            format: OutputFormat::Markdown,
            error: None,
        }
    }

    pub(crate) fn error(error: ToolError) -> Self {
        Self {
            intent: "error".to_string(),
            result: json!({}),
            format: OutputFormat::Json,
            error: Some(error),
        }
    }

    pub(crate) fn unknown_tool(name: &str) -> Self {
        Self::error(
            ToolError::new(UNKNOWN_TOOL, format!("Unknown tool: {name}"))
                .with_recovery("Call tools/list to see the available tools."),
        )
    }

    pub(crate) fn internal(message: String) -> Self {
        Self::error(ToolError::new(INTERNAL_ERROR, message))
    }

    pub(crate) fn into_value(self) -> Value {
        json!({
            "success": self.error.is_none(),
            "intent": self.intent,
            "format": self.format.as_str(),
            "result": self.result,
            "error": self.error.as_ref().map(ToolError::to_value).unwrap_or(Value::Null)
        })
    }
}
