#![forbid(unsafe_code)]

use serde_json::{Value, json};

pub(crate) const TOOL_NAMES: [&str; 8] = [
    "identify_case",
    "generate_checklist",
    "analyze_gaps",
    "analyze_position",
    "case_report",
    "list_case_types",
    "knowledge_stats",
    "invalidate_cache",
];

fn role_schema(default: &str) -> Value {
    json!({
        "type": "string",
        "enum": ["plaintiff", "defendant", "neutral"],
        "default": default
    })
}

fn format_schema() -> Value {
    json!({ "type": "string", "enum": ["json", "markdown"], "default": "json" })
}

fn case_id_schema() -> Value {
    json!({ "type": "integer", "description": "Case type id from identify_case or list_case_types." })
}

fn materials_schema() -> Value {
    json!({
        "type": "object",
        "description": "Evidence already held. Entries may be {\"name\": ...} objects or plain strings.",
        "properties": {
            "evidences": {
                "type": "array",
                "items": {
                    "anyOf": [
                        { "type": "string" },
                        { "type": "object", "properties": { "name": { "type": "string" } } }
                    ]
                }
            }
        }
    })
}

pub(crate) fn tool_definitions() -> Vec<Value> {
    vec![
        json!({
            "name": "identify_case",
            "description": "Classify a free-text case narrative into a case type (keyword stage, then lexical overlap).",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "text": { "type": "string" },
                    "top_k": { "type": "integer", "minimum": 0, "default": 3 }
                },
                "required": ["text"]
            }
        }),
        json!({
            "name": "generate_checklist",
            "description": "Review checklist for a case type, grouped by the framework parts relevant to the role.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "case_id": case_id_schema(),
                    "role": role_schema("neutral"),
                    "format": format_schema()
                },
                "required": ["case_id"]
            }
        }),
        json!({
            "name": "analyze_gaps",
            "description": "Missing required evidence for the role, with prioritized remediation advice.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "case_id": case_id_schema(),
                    "materials": materials_schema(),
                    "role": role_schema("plaintiff"),
                    "format": format_schema()
                },
                "required": ["case_id"]
            }
        }),
        json!({
            "name": "analyze_position",
            "description": "Strengths and weaknesses of the role's position on the core review points.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "case_id": case_id_schema(),
                    "materials": materials_schema(),
                    "role": role_schema("plaintiff"),
                    "format": format_schema()
                },
                "required": ["case_id"]
            }
        }),
        json!({
            "name": "case_report",
            "description": "Combined Markdown report. Pass case_id, or text to classify first.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "text": { "type": "string" },
                    "case_id": case_id_schema(),
                    "materials": materials_schema(),
                    "role": role_schema("plaintiff")
                },
                "required": []
            }
        }),
        json!({
            "name": "list_case_types",
            "description": "Case type catalogue ordered by id, optionally filtered by keyword.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "keyword": { "type": "string" }
                },
                "required": []
            }
        }),
        json!({
            "name": "knowledge_stats",
            "description": "Row counts of the knowledge tables and query cache statistics.",
            "inputSchema": { "type": "object", "properties": {}, "required": [] }
        }),
        json!({
            "name": "invalidate_cache",
            "description": "Drop all memoized knowledge queries (after the database was updated).",
            "inputSchema": { "type": "object", "properties": {}, "required": [] }
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_match_dispatchable_names() {
        let names = tool_definitions()
            .iter()
            .map(|tool| tool["name"].as_str().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, TOOL_NAMES.map(str::to_string).to_vec());
        for tool in tool_definitions() {
            assert_eq!(tool["inputSchema"]["type"], "object");
        }
    }
}
