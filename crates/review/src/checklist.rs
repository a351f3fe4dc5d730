#![forbid(unsafe_code)]

use crate::{ReviewError, require_case};
use lr_core::ids::CaseId;
use lr_core::model::{FrameworkPart, Role};
use lr_storage::{KnowledgeStore, ReviewPointRow};
use serde::Serialize;

const EXCERPT_CHARS: usize = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Pending,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChecklistItem {
    pub point_id: i64,
    pub item_name: String,
    pub point_type: String,
    pub review_content: String,
    pub attention_points: Option<String>,
    pub legal_basis: Option<String>,
    pub is_core: bool,
    pub status: ItemStatus,
}

impl From<ReviewPointRow> for ChecklistItem {
    fn from(row: ReviewPointRow) -> Self {
        Self {
            point_id: row.point_id,
            item_name: row.point_name,
            point_type: row.point_type,
            review_content: row.review_content,
            attention_points: row.attention_points,
            legal_basis: row.legal_basis,
            is_core: row.is_core,
            status: ItemStatus::Pending,
        }
    }
}

/// Never empty: parts without review points are left out of the checklist.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section {
    pub part_name: String,
    #[serde(rename = "part_number")]
    pub part: FrameworkPart,
    pub checklist_items: Vec<ChecklistItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Checklist {
    pub case_type: String,
    pub case_id: CaseId,
    pub user_role: Role,
    pub sections: Vec<Section>,
}

/// Projects the six-part review framework of a case type onto one party.
pub struct ChecklistAssembler<'a> {
    store: &'a KnowledgeStore,
}

impl<'a> ChecklistAssembler<'a> {
    pub fn new(store: &'a KnowledgeStore) -> Self {
        Self { store }
    }

    pub fn generate(&self, case_id: CaseId, role: Role) -> Result<Checklist, ReviewError> {
        let case = require_case(self.store, case_id)?;

        let mut sections = Vec::new();
        for &part in role.relevant_parts() {
            let points = self.store.review_points(case_id, part)?;
            if points.is_empty() {
                continue;
            }
            sections.push(Section {
                part_name: part.name().to_string(),
                part,
                checklist_items: points.into_iter().map(ChecklistItem::from).collect(),
            });
        }

        tracing::debug!(%case_id, role = role.as_str(), sections = sections.len(), "checklist generated");
        Ok(Checklist {
            case_type: case.name,
            case_id,
            user_role: role,
            sections,
        })
    }

    /// One line per item for terminal display, e.g. `❌ [核心] 借款合意`.
    pub fn checklist_lines(&self, case_id: CaseId, role: Role) -> Result<Vec<String>, ReviewError> {
        let checklist = self.generate(case_id, role)?;
        Ok(checklist
            .sections
            .iter()
            .flat_map(|section| section.checklist_items.iter())
            .map(item_line)
            .collect())
    }
}

fn item_line(item: &ChecklistItem) -> String {
    let core = if item.is_core { "[核心] " } else { "" };
    let mut line = format!("❌ {core}{}", item.item_name);
    if !item.review_content.is_empty() {
        line.push_str(&format!("\n  要点: {}", excerpt(&item.review_content, EXCERPT_CHARS)));
    }
    line
}

pub(crate) fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out = text.chars().take(max_chars).collect::<String>();
    out.push_str("...");
    out
}
