#![forbid(unsafe_code)]

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("unknown role: {0} (expected plaintiff, defendant or neutral)")]
    UnknownRole(String),

    #[error("framework part out of range: {0} (expected 1..=6)")]
    PartOutOfRange(i64),

    #[error("invalid classifier config: {0}")]
    InvalidConfig(String),
}
