#![forbid(unsafe_code)]

use super::args;
use super::envelope::{OutputFormat, ToolError, ToolResponse};
use super::to_json;
use crate::McpServer;
use lr_core::model::Role;
use lr_review::{CaseIdentifier, ChecklistAssembler, GapAdvisor, PositionAnalyzer, report};
use serde_json::Value;

pub(crate) fn identify_case(server: &McpServer, args: &Value) -> Result<ToolResponse, ToolError> {
    let obj = args::object(args)?;
    let text = args::text(obj, "text")?;
    let top_k = args::top_k(obj)?;

    let identification =
        CaseIdentifier::new(server.store(), server.classifier()).identify(text, top_k)?;
    Ok(ToolResponse::success("identify_case", to_json(&identification)?))
}

pub(crate) fn generate_checklist(
    server: &McpServer,
    args: &Value,
) -> Result<ToolResponse, ToolError> {
    let obj = args::object(args)?;
    let case_id = args::case_id(obj)?;
    let role = args::role(obj, Role::Neutral)?;
    let format = args::format(obj)?;

    let checklist = ChecklistAssembler::new(server.store()).generate(case_id, role)?;
    Ok(match format {
        OutputFormat::Json => ToolResponse::success("generate_checklist", to_json(&checklist)?),
        OutputFormat::Markdown => {
            ToolResponse::markdown("generate_checklist", report::render_checklist(&checklist))
        }
    })
}

pub(crate) fn analyze_gaps(server: &McpServer, args: &Value) -> Result<ToolResponse, ToolError> {
    let obj = args::object(args)?;
    let case_id = args::case_id(obj)?;
    let role = args::role(obj, Role::Plaintiff)?;
    let format = args::format(obj)?;
    let materials = args::materials(obj);

    let recommendation =
        GapAdvisor::new(server.store()).analyze_and_recommend(case_id, &materials, role)?;
    Ok(match format {
        OutputFormat::Json => ToolResponse::success("analyze_gaps", to_json(&recommendation)?),
        OutputFormat::Markdown => ToolResponse::markdown(
            "analyze_gaps",
            report::render_recommendation(&recommendation),
        ),
    })
}

pub(crate) fn analyze_position(
    server: &McpServer,
    args: &Value,
) -> Result<ToolResponse, ToolError> {
    let obj = args::object(args)?;
    let case_id = args::case_id(obj)?;
    let role = args::role(obj, Role::Plaintiff)?;
    let format = args::format(obj)?;
    let materials = args::materials(obj);

    let analysis = PositionAnalyzer::new(server.store()).analyze(case_id, &materials, role)?;
    Ok(match format {
        OutputFormat::Json => ToolResponse::success("analyze_position", to_json(&analysis)?),
        OutputFormat::Markdown => {
            ToolResponse::markdown("analyze_position", report::render_position(&analysis))
        }
    })
}

/// `case_id` wins when both it and `text` are given; the identification section only appears
/// when the case was classified from text.
pub(crate) fn case_report(server: &McpServer, args: &Value) -> Result<ToolResponse, ToolError> {
    let obj = args::object(args)?;
    let role = args::role(obj, Role::Plaintiff)?;
    let materials = args::materials(obj);

    let (case_id, identification) = match args::optional_case_id(obj)? {
        Some(case_id) => (case_id, None),
        None => {
            let text = args::optional_text(obj, "text")?.ok_or_else(|| {
                ToolError::invalid_input("case_report needs case_id or text")
                    .with_recovery("Pass case_id, or the case narrative as text.")
            })?;
            let identification = CaseIdentifier::new(server.store(), server.classifier())
                .identify(text, args::DEFAULT_TOP_K)?;
            (identification.case_id, Some(identification))
        }
    };

    let checklist = ChecklistAssembler::new(server.store()).generate(case_id, role)?;
    let recommendation =
        GapAdvisor::new(server.store()).analyze_and_recommend(case_id, &materials, role)?;
    let rendered = report::render_combined(identification.as_ref(), &checklist, &recommendation);
    Ok(ToolResponse::markdown("case_report", rendered))
}
