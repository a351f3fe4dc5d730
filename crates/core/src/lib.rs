#![forbid(unsafe_code)]

pub mod classify;
pub mod error;
pub mod model;

pub use error::CoreError;

pub mod ids {
    use serde::{Deserialize, Serialize};

    /// Externally assigned, stable identity of a case type.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct CaseId(i64);

    impl CaseId {
        pub fn new(value: i64) -> Self {
            Self(value)
        }

        pub fn get(self) -> i64 {
            self.0
        }
    }

    impl From<i64> for CaseId {
        fn from(value: i64) -> Self {
            Self(value)
        }
    }

    impl std::fmt::Display for CaseId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }
}
