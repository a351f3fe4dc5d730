#![forbid(unsafe_code)]

use crate::McpServer;
use lr_core::classify::Classifier;
use lr_storage::KnowledgeStore;
use serde_json::{Value, json};

impl McpServer {
    pub(crate) fn new(store: KnowledgeStore, classifier: Classifier) -> Self {
        Self {
            initialized: false,
            store,
            classifier,
        }
    }

    pub(crate) fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub(crate) fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub(crate) fn handle(&mut self, request: crate::JsonRpcRequest) -> Option<Value> {
        let method = request.method.as_str();
        let expects_response = !matches!(request.id.as_ref(), None | Some(Value::Null));

        if method == "initialize" {
            // Echo the client's protocol version when it declares one.
            let protocol_version = request
                .params
                .as_ref()
                .and_then(|v| v.get("protocolVersion"))
                .and_then(|v| v.as_str())
                .unwrap_or(crate::MCP_VERSION);

            return Some(crate::json_rpc_response(
                request.id,
                json!({
                    "protocolVersion": protocol_version,
                    "serverInfo": {
                        "name": crate::SERVER_NAME,
                        "version": crate::build_fingerprint()
                    },
                    "capabilities": {
                        "tools": {},
                        "resources": {},
                        "prompts": {},
                        "logging": {}
                    }
                }),
            ));
        }

        // Both the namespaced and the bare notification are accepted; neither gets a reply.
        if method == "notifications/initialized" || method == "initialized" {
            self.initialized = true;
            return None;
        }

        if !self.initialized {
            // First real request initializes implicitly.
            if matches!(
                method,
                "tools/call"
                    | "tools/list"
                    | "resources/list"
                    | "resources/read"
                    | "resources/templates/list"
                    | "ping"
            ) {
                self.initialized = true;
            } else if expects_response {
                return Some(crate::json_rpc_error(
                    request.id,
                    -32002,
                    "Server not initialized",
                ));
            } else {
                return None;
            }
        }

        match method {
            "ping" | "logging/setLevel" => {
                return Some(crate::json_rpc_response(request.id, json!({})));
            }
            "resources/list" => {
                return Some(crate::json_rpc_response(
                    request.id,
                    json!({ "resources": [] }),
                ));
            }
            "resources/templates/list" => {
                return Some(crate::json_rpc_response(
                    request.id,
                    json!({ "resourceTemplates": [] }),
                ));
            }
            "resources/read" => {
                return Some(crate::json_rpc_response(
                    request.id,
                    json!({ "contents": [] }),
                ));
            }
            "prompts/list" => {
                return Some(crate::json_rpc_response(
                    request.id,
                    json!({ "prompts": [] }),
                ));
            }
            "prompts/get" => {
                return Some(crate::json_rpc_error(request.id, -32602, "Unknown prompt"));
            }
            "roots/list" => {
                return Some(crate::json_rpc_response(request.id, json!({ "roots": [] })));
            }
            "tools/list" => {
                return Some(crate::json_rpc_response(
                    request.id,
                    json!({ "tools": crate::tools::tool_definitions() }),
                ));
            }
            _ => {}
        }

        if method == "tools/call" {
            let Some(params_obj) = request.params.as_ref().and_then(Value::as_object) else {
                return Some(crate::json_rpc_error(
                    request.id,
                    -32602,
                    "params must be an object",
                ));
            };

            let tool_name = params_obj
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            // `"arguments": null` counts as no arguments; other non-objects reach the tool and
            // fail there with INVALID_INPUT.
            let args = match params_obj.get("arguments") {
                None | Some(Value::Null) => json!({}),
                Some(v) => v.clone(),
            };
            let response_body = self.call_tool(&tool_name, args);

            return Some(crate::json_rpc_response(
                request.id,
                json!({
                    "content": [crate::tool_text_content(&response_body)],
                    "isError": !response_body.get("success").and_then(|v| v.as_bool()).unwrap_or(false)
                }),
            ));
        }

        if !expects_response {
            return None;
        }

        Some(crate::json_rpc_error(
            request.id,
            -32601,
            &format!("Method not found: {method}"),
        ))
    }

    pub(crate) fn call_tool(&mut self, name: &str, args: Value) -> Value {
        let name = normalize_tool_name(name);
        if !crate::tools::is_tool(name) {
            tracing::warn!(tool = name, "unknown tool");
            return crate::tools::ToolResponse::unknown_tool(name).into_value();
        }

        tracing::debug!(tool = name, "tool call");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            crate::tools::dispatch_tool(self, name, args)
        }));

        match result {
            Ok(resp) => resp.into_value(),
            Err(_) => {
                tracing::error!(tool = name, "tool panicked");
                crate::tools::ToolResponse::internal(format!(
                    "Internal panic while handling {name}"
                ))
                .into_value()
            }
        }
    }
}

/// Some clients prefix tool names with the server namespace (`lexreview/identify_case`,
/// `lexreview.identify_case`). The transport already selects the server, so the prefix is dropped.
pub(crate) fn normalize_tool_name(name: &str) -> &str {
    let name = name.trim();
    if let Some((_, suffix)) = name.rsplit_once('/') {
        return suffix;
    }
    if let Some((prefix, suffix)) = name.split_once('.')
        && matches!(prefix, "lexreview" | "lr")
    {
        return suffix;
    }
    name
}
