#![forbid(unsafe_code)]

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Tunables of the keyword stage. The defaults are empirically tuned values and are kept as
/// configuration rather than constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Keyword confidence must be strictly above this for the keyword stage to answer.
    pub keyword_threshold: f64,
    /// Number of exact keyword hits treated as full confidence.
    pub full_match_keywords: f64,
    /// Weight of an input token (two or more characters) found inside a keyword.
    pub multi_char_weight: f64,
    /// Weight of an allow-listed single-character token found inside a keyword.
    pub single_char_weight: f64,
    pub single_char_allow_list: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            keyword_threshold: 0.2,
            full_match_keywords: 3.0,
            multi_char_weight: 0.5,
            single_char_weight: 0.3,
            single_char_allow_list: ["借", "还", "租", "欠"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(0.0..=1.0).contains(&self.keyword_threshold) {
            return Err(CoreError::InvalidConfig(format!(
                "keyword_threshold must be within [0, 1], got {}",
                self.keyword_threshold
            )));
        }
        if !(self.full_match_keywords.is_finite() && self.full_match_keywords > 0.0) {
            return Err(CoreError::InvalidConfig(
                "full_match_keywords must be a positive number".to_string(),
            ));
        }
        for (name, weight) in [
            ("multi_char_weight", self.multi_char_weight),
            ("single_char_weight", self.single_char_weight),
        ] {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(CoreError::InvalidConfig(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        if let Some(bad) = self
            .single_char_allow_list
            .iter()
            .find(|token| token.chars().count() != 1)
        {
            return Err(CoreError::InvalidConfig(format!(
                "single_char_allow_list entries must be one character, got {bad:?}"
            )));
        }
        Ok(())
    }
}
