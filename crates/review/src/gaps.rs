#![forbid(unsafe_code)]

use crate::materials::Materials;
use crate::{ReviewError, require_case};
use lr_core::ids::CaseId;
use lr_core::model::{Necessity, Priority, Role};
use lr_storage::{KnowledgeStore, TemplateRow};
use serde::Serialize;

pub const DEFAULT_GAP_TYPE: &str = "证据缺失";
pub const DEFAULT_DIFFICULTY: &str = "中等";
pub const DEFAULT_TIME_REQUIRED: &str = "1-2周";
pub const COMPLETE_SUMMARY: &str = "✅ 材料完整，无缺失要素";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GapKind {
    Evidence,
}

/// A required evidence item the supplied materials do not cover.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Gap {
    pub point_id: i64,
    pub evidence_id: i64,
    pub name: String,
    pub necessity: Necessity,
    #[serde(rename = "type")]
    pub kind: GapKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Advice {
    pub gap_name: String,
    pub point_id: i64,
    /// `None` for advice synthesized without a stored template.
    pub template_id: Option<i64>,
    pub gap_type: String,
    pub description: String,
    pub advice: String,
    pub priority: Priority,
    pub difficulty: String,
    pub time_required: String,
}

impl Advice {
    fn synthesized(gap: &Gap) -> Self {
        Self {
            gap_name: gap.name.clone(),
            point_id: gap.point_id,
            template_id: None,
            gap_type: DEFAULT_GAP_TYPE.to_string(),
            description: default_description(&gap.name),
            advice: default_advice(&gap.name),
            priority: Priority::Medium,
            difficulty: DEFAULT_DIFFICULTY.to_string(),
            time_required: DEFAULT_TIME_REQUIRED.to_string(),
        }
    }

    fn from_template(gap: &Gap, template: TemplateRow) -> Self {
        Self {
            gap_name: gap.name.clone(),
            point_id: gap.point_id,
            template_id: Some(template.template_id),
            gap_type: template.gap_type,
            description: template
                .gap_description
                .unwrap_or_else(|| default_description(&gap.name)),
            advice: template
                .reinforcement_advice
                .unwrap_or_else(|| default_advice(&gap.name)),
            priority: template.priority,
            difficulty: template
                .difficulty
                .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
            time_required: template
                .time_required
                .unwrap_or_else(|| DEFAULT_TIME_REQUIRED.to_string()),
        }
    }
}

fn default_description(name: &str) -> String {
    format!("缺少{name}相关材料")
}

fn default_advice(name: &str) -> String {
    format!("请尽快收集{name}相关证据材料")
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    pub case_id: CaseId,
    pub user_role: Role,
    pub gaps_count: usize,
    pub gaps: Vec<Gap>,
    pub advices: Vec<Advice>,
    pub summary: String,
}

/// Finds missing required evidence and matches remediation advice to it.
pub struct GapAdvisor<'a> {
    store: &'a KnowledgeStore,
}

impl<'a> GapAdvisor<'a> {
    pub fn new(store: &'a KnowledgeStore) -> Self {
        Self { store }
    }

    pub fn identify_gaps(
        &self,
        case_id: CaseId,
        materials: &Materials,
        role: Role,
    ) -> Result<Vec<Gap>, ReviewError> {
        require_case(self.store, case_id)?;
        let haystack = materials.haystack();
        let gaps = self
            .store
            .evidence(case_id, role)?
            .into_iter()
            .filter(|row| row.is_required())
            .filter(|row| !Materials::covers(&haystack, &row.evidence_name))
            .map(|row| Gap {
                point_id: row.point_id,
                evidence_id: row.evidence_id,
                name: row.evidence_name,
                necessity: Necessity::Required,
                kind: GapKind::Evidence,
            })
            .collect::<Vec<_>>();
        tracing::debug!(%case_id, role = role.as_str(), gaps = gaps.len(), "gaps identified");
        Ok(gaps)
    }

    /// At least one advice per gap, most urgent first. Equal priorities keep gap order.
    pub fn get_advices(&self, case_id: CaseId, gaps: &[Gap]) -> Result<Vec<Advice>, ReviewError> {
        let mut advices = Vec::new();
        for gap in gaps {
            let templates = self.store.templates(case_id, gap.point_id)?;
            if templates.is_empty() {
                advices.push(Advice::synthesized(gap));
            } else {
                advices.extend(
                    templates
                        .into_iter()
                        .map(|template| Advice::from_template(gap, template)),
                );
            }
        }
        advices.sort_by_key(|advice| advice.priority);
        Ok(advices)
    }

    pub fn analyze_and_recommend(
        &self,
        case_id: CaseId,
        materials: &Materials,
        role: Role,
    ) -> Result<Recommendation, ReviewError> {
        let gaps = self.identify_gaps(case_id, materials, role)?;
        let advices = self.get_advices(case_id, &gaps)?;
        let summary = summarize(&gaps, &advices);
        Ok(Recommendation {
            case_id,
            user_role: role,
            gaps_count: gaps.len(),
            gaps,
            advices,
            summary,
        })
    }
}

/// Short digest: the completion message, or the gap count with advice counts per priority.
pub fn summarize(gaps: &[Gap], advices: &[Advice]) -> String {
    if gaps.is_empty() {
        return COMPLETE_SUMMARY.to_string();
    }
    let count = |priority: Priority| advices.iter().filter(|a| a.priority == priority).count();
    let mut out = format!("发现 {} 个缺失要素：", gaps.len());
    for priority in Priority::ALL {
        out.push_str(&format!(
            "\n- {}优先级补强：{} 项",
            priority.label(),
            count(priority)
        ));
    }
    out
}
