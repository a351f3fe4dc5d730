#![forbid(unsafe_code)]

use lr_core::ids::CaseId;
use lr_core::model::{Necessity, Priority, Role};

#[derive(Clone, Debug, PartialEq)]
pub struct EvidenceRow {
    pub evidence_id: i64,
    pub case_id: CaseId,
    pub point_id: i64,
    pub party: Role,
    pub evidence_name: String,
    pub evidence_type: Option<String>,
    /// `None` when the stored label is missing or not one of the known levels.
    pub necessity: Option<Necessity>,
    pub description: Option<String>,
}

impl EvidenceRow {
    pub fn is_required(&self) -> bool {
        self.necessity == Some(Necessity::Required)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TemplateRow {
    pub template_id: i64,
    pub case_id: CaseId,
    pub point_id: i64,
    pub gap_type: String,
    pub gap_description: Option<String>,
    pub reinforcement_advice: Option<String>,
    pub priority: Priority,
    pub difficulty: Option<String>,
    pub time_required: Option<String>,
}
