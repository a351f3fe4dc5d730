#![forbid(unsafe_code)]

use super::args;
use super::envelope::{ToolError, ToolResponse};
use super::to_json;
use crate::McpServer;
use lr_storage::CacheStats;
use serde_json::{Value, json};

pub(crate) fn list_case_types(server: &McpServer, args: &Value) -> Result<ToolResponse, ToolError> {
    let obj = args::object(args)?;
    let keyword = args::optional_text(obj, "keyword")?
        .map(str::trim)
        .filter(|k| !k.is_empty());

    let case_types = match keyword {
        Some(keyword) => server.store().search_case_types(keyword)?,
        None => server.store().case_types()?,
    };
    Ok(ToolResponse::success(
        "list_case_types",
        json!({
            "count": case_types.len(),
            "keyword": keyword,
            "case_types": to_json(&case_types)?
        }),
    ))
}

pub(crate) fn knowledge_stats(server: &McpServer, args: &Value) -> Result<ToolResponse, ToolError> {
    args::object(args)?;
    let stats = server.store().statistics()?;
    let cache = server.store().cache();
    Ok(ToolResponse::success(
        "knowledge_stats",
        json!({
            "database": server.store().path().display().to_string(),
            "tables": {
                "case_types": stats.case_types,
                "case_frameworks": stats.frameworks,
                "review_points": stats.review_points,
                "evidence_checklists": stats.evidence_items,
                "reinforcement_templates": stats.templates
            },
            "cache": cache_json(cache.stats(), cache.capacity())
        }),
    ))
}

pub(crate) fn invalidate_cache(server: &McpServer, args: &Value) -> Result<ToolResponse, ToolError> {
    args::object(args)?;
    let cache = server.store().cache();
    let dropped = cache.stats().entries;
    cache.invalidate();
    Ok(ToolResponse::success(
        "invalidate_cache",
        json!({
            "invalidated": true,
            "dropped_entries": dropped,
            "cache": cache_json(cache.stats(), cache.capacity())
        }),
    ))
}

fn cache_json(stats: CacheStats, capacity: usize) -> Value {
    json!({
        "capacity": capacity,
        "entries": stats.entries,
        "hits": stats.hits,
        "misses": stats.misses
    })
}
