#![forbid(unsafe_code)]

mod args;
mod catalogue;
mod definitions;
mod envelope;
mod review;

pub(crate) use definitions::tool_definitions;
pub(crate) use envelope::ToolResponse;

use crate::McpServer;
use serde::Serialize;
use serde_json::Value;

pub(crate) fn is_tool(name: &str) -> bool {
    definitions::TOOL_NAMES.contains(&name)
}

pub(crate) fn dispatch_tool(server: &McpServer, name: &str, args: Value) -> ToolResponse {
    let outcome = match name {
        "identify_case" => review::identify_case(server, &args),
        "generate_checklist" => review::generate_checklist(server, &args),
        "analyze_gaps" => review::analyze_gaps(server, &args),
        "analyze_position" => review::analyze_position(server, &args),
        "case_report" => review::case_report(server, &args),
        "list_case_types" => catalogue::list_case_types(server, &args),
        "knowledge_stats" => catalogue::knowledge_stats(server, &args),
        "invalidate_cache" => catalogue::invalidate_cache(server, &args),
        _ => return ToolResponse::unknown_tool(name),
    };
    outcome.unwrap_or_else(|err| {
        tracing::debug!(tool = name, code = err.code, "tool failed");
        ToolResponse::error(err)
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, envelope::ToolError> {
    serde_json::to_value(value).map_err(|e| {
        envelope::ToolError::new(envelope::INTERNAL_ERROR, format!("serialize result: {e}"))
    })
}
