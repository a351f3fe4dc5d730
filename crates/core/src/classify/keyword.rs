#![forbid(unsafe_code)]

use super::{ClassifierConfig, MatchMethod, MatchStrategy, PreparedInput, StrategyScore};
use crate::model::CaseType;
use std::collections::BTreeSet;

/// Keyword scoring: an exact keyword hit counts 1.0; otherwise the first input token that sits
/// inside the keyword decides the keyword's weight, which may be zero.
#[derive(Clone, Debug)]
pub struct KeywordStrategy {
    full_match_keywords: f64,
    multi_char_weight: f64,
    single_char_weight: f64,
    single_char_allow_list: BTreeSet<String>,
}

impl KeywordStrategy {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            full_match_keywords: config.full_match_keywords,
            multi_char_weight: config.multi_char_weight,
            single_char_weight: config.single_char_weight,
            single_char_allow_list: config
                .single_char_allow_list
                .iter()
                .map(|token| token.to_lowercase())
                .collect(),
        }
    }

    fn token_weight(&self, token: &str) -> f64 {
        let len = token.chars().count();
        if len >= 2 {
            self.multi_char_weight
        } else if len == 1 && self.single_char_allow_list.contains(token) {
            self.single_char_weight
        } else {
            0.0
        }
    }
}

impl Default for KeywordStrategy {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl MatchStrategy for KeywordStrategy {
    fn method(&self) -> MatchMethod {
        MatchMethod::Keyword
    }

    fn score(&self, case: &CaseType, input: &PreparedInput) -> StrategyScore {
        let mut out = StrategyScore::default();
        for keyword in &case.keywords {
            let lowered = keyword.to_lowercase();
            if lowered.is_empty() {
                continue;
            }
            if input.lowered().contains(&lowered) {
                out.score += 1.0;
                out.matched_keywords.push(keyword.clone());
                continue;
            }
            // Only the first contained token counts, even when it earns nothing.
            let first = input
                .tokens()
                .iter()
                .find(|token| lowered.contains(token.as_str()));
            if let Some(token) = first {
                out.score += self.token_weight(token);
                out.matched_keywords.push(keyword.clone());
            }
        }
        out
    }

    fn confidence(&self, score: f64) -> f64 {
        (score / self.full_match_keywords).clamp(0.0, 1.0)
    }
}
