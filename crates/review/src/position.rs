#![forbid(unsafe_code)]

use crate::materials::Materials;
use crate::{ReviewError, require_case};
use lr_core::ids::CaseId;
use lr_core::model::{FrameworkPart, Necessity, Role};
use lr_storage::{EvidenceRow, KnowledgeStore};
use serde::Serialize;

const FALLBACK_EVIDENCE_TYPE: &str = "其他";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointAssessment {
    pub point_id: i64,
    pub name: String,
    pub content: String,
    /// Required evidence of this point absent from the materials.
    pub missing_evidence: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Claim {
    pub point_id: i64,
    pub name: String,
    pub content: String,
    pub basis: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvidenceEntry {
    pub name: String,
    pub evidence_type: String,
    pub necessity: Option<Necessity>,
    pub description: Option<String>,
}

impl From<EvidenceRow> for EvidenceEntry {
    fn from(row: EvidenceRow) -> Self {
        Self {
            name: row.evidence_name,
            evidence_type: row
                .evidence_type
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_EVIDENCE_TYPE.to_string()),
            necessity: row.necessity,
            description: row.description,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PositionAnalysis {
    pub case_type: String,
    pub case_id: CaseId,
    pub user_role: Role,
    pub strengths: Vec<PointAssessment>,
    pub gaps: Vec<PointAssessment>,
    pub claims: Vec<Claim>,
    /// Required first, then important, supplementary, unlabeled.
    pub evidence: Vec<EvidenceEntry>,
    pub winning_probability: f64,
}

/// Weighs a party's position: which core review points the materials already support.
pub struct PositionAnalyzer<'a> {
    store: &'a KnowledgeStore,
}

impl<'a> PositionAnalyzer<'a> {
    pub fn new(store: &'a KnowledgeStore) -> Self {
        Self { store }
    }

    pub fn analyze(
        &self,
        case_id: CaseId,
        materials: &Materials,
        role: Role,
    ) -> Result<PositionAnalysis, ReviewError> {
        let case = require_case(self.store, case_id)?;
        let evidence = self.store.evidence(case_id, role)?;
        let haystack = materials.haystack();
        let supplied = materials.has_any();

        let mut strengths = Vec::new();
        let mut gaps = Vec::new();
        for point in self.store.core_points(case_id)? {
            let required = evidence
                .iter()
                .filter(|row| row.point_id == point.point_id && row.is_required())
                .collect::<Vec<_>>();
            let missing = required
                .iter()
                .filter(|row| !Materials::covers(&haystack, &row.evidence_name))
                .map(|row| row.evidence_name.clone())
                .collect::<Vec<_>>();
            let strong = if required.is_empty() {
                supplied
            } else {
                missing.is_empty()
            };
            let assessment = PointAssessment {
                point_id: point.point_id,
                name: point.point_name,
                content: point.review_content,
                missing_evidence: missing,
            };
            if strong {
                strengths.push(assessment);
            } else {
                gaps.push(assessment);
            }
        }

        let claims = self
            .store
            .review_points(case_id, FrameworkPart::PlaintiffClaims)?
            .into_iter()
            .map(|point| Claim {
                point_id: point.point_id,
                name: point.point_name,
                content: point.review_content,
                basis: point.legal_basis,
            })
            .collect();

        let mut evidence = evidence
            .into_iter()
            .map(EvidenceEntry::from)
            .collect::<Vec<_>>();
        evidence.sort_by_key(|entry| entry.necessity.map_or(u8::MAX, Necessity::rank));

        let total = strengths.len() + gaps.len();
        let winning_probability = if total == 0 {
            0.5
        } else {
            strengths.len() as f64 / total as f64
        };

        tracing::debug!(
            %case_id,
            role = role.as_str(),
            strengths = strengths.len(),
            gaps = gaps.len(),
            "position analyzed"
        );
        Ok(PositionAnalysis {
            case_type: case.name,
            case_id,
            user_role: role,
            strengths,
            gaps,
            claims,
            evidence,
            winning_probability,
        })
    }
}
