#![forbid(unsafe_code)]

/// Row counts of the knowledge tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub case_types: u64,
    pub frameworks: u64,
    pub review_points: u64,
    pub evidence_items: u64,
    pub templates: u64,
}
