#![forbid(unsafe_code)]

use crate::ReviewError;
use lr_core::classify::{Classifier, Identification};
use lr_storage::KnowledgeStore;

/// Classifies free text against the stored case-type catalogue.
pub struct CaseIdentifier<'a> {
    store: &'a KnowledgeStore,
    classifier: &'a Classifier,
}

impl<'a> CaseIdentifier<'a> {
    pub fn new(store: &'a KnowledgeStore, classifier: &'a Classifier) -> Self {
        Self { store, classifier }
    }

    pub fn identify(&self, text: &str, top_k: usize) -> Result<Identification, ReviewError> {
        let catalogue = self.store.case_types()?;
        let identification = self
            .classifier
            .identify(&catalogue, text, top_k)
            .ok_or(ReviewError::EmptyCatalogue)?;
        tracing::debug!(
            case_id = %identification.case_id,
            method = identification.method.as_str(),
            confidence = identification.confidence,
            "case identified"
        );
        Ok(identification)
    }
}
