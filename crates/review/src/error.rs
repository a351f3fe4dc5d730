#![forbid(unsafe_code)]

use lr_core::ids::CaseId;
use lr_storage::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum ReviewError {
    #[error("case type {case_id} not found")]
    NotFound { case_id: CaseId },

    #[error("case type catalogue is empty")]
    EmptyCatalogue,

    #[error(transparent)]
    Store(#[from] StoreError),
}
