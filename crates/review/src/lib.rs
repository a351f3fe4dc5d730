#![forbid(unsafe_code)]

//! The review pipeline: identify a case type, project its review framework onto a party, and
//! compare supplied materials against the required evidence model.

mod checklist;
mod error;
mod gaps;
mod identify;
mod materials;
mod position;
pub mod report;

pub use checklist::{Checklist, ChecklistAssembler, ChecklistItem, ItemStatus, Section};
pub use error::ReviewError;
pub use gaps::{Advice, Gap, GapAdvisor, GapKind, Recommendation, summarize};
pub use identify::CaseIdentifier;
pub use materials::{EvidenceItem, Materials};
pub use position::{Claim, EvidenceEntry, PointAssessment, PositionAnalysis, PositionAnalyzer};

use lr_core::ids::CaseId;
use lr_core::model::CaseType;
use lr_storage::KnowledgeStore;

/// Looks up a case type or fails with [`ReviewError::NotFound`].
pub(crate) fn require_case(store: &KnowledgeStore, case_id: CaseId) -> Result<CaseType, ReviewError> {
    match store.case_type(case_id)? {
        Some(case) => Ok(case),
        None => {
            tracing::warn!(%case_id, "unknown case type");
            Err(ReviewError::NotFound { case_id })
        }
    }
}
