#![forbid(unsafe_code)]

use super::input::word_set;
use super::{MatchMethod, MatchStrategy, PreparedInput, StrategyScore};
use crate::model::CaseType;

/// Jaccard similarity between the input words and a case type's description words plus its
/// keywords. A deterministic lexical heuristic, not a language model.
#[derive(Clone, Debug, Default)]
pub struct LexicalOverlapStrategy;

impl LexicalOverlapStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl MatchStrategy for LexicalOverlapStrategy {
    fn method(&self) -> MatchMethod {
        MatchMethod::Semantic
    }

    fn score(&self, case: &CaseType, input: &PreparedInput) -> StrategyScore {
        let mut case_words = word_set(&case.description.to_lowercase());
        case_words.extend(
            case.keywords
                .iter()
                .map(|kw| kw.trim().to_lowercase())
                .filter(|kw| !kw.is_empty()),
        );

        let union = input.words().union(&case_words).count();
        let score = if union == 0 {
            0.0
        } else {
            input.words().intersection(&case_words).count() as f64 / union as f64
        };
        StrategyScore {
            score,
            matched_keywords: Vec::new(),
        }
    }

    fn confidence(&self, score: f64) -> f64 {
        score.clamp(0.0, 1.0)
    }
}
