#![forbid(unsafe_code)]

use lr_core::ids::CaseId;
use lr_core::model::FrameworkPart;

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewPointRow {
    pub point_id: i64,
    pub case_id: CaseId,
    /// Stored as `review_points.framework_id`.
    pub part: FrameworkPart,
    pub point_name: String,
    pub point_type: String,
    pub review_content: String,
    pub attention_points: Option<String>,
    pub legal_basis: Option<String>,
    pub sort_order: Option<i64>,
    pub is_core: bool,
}
