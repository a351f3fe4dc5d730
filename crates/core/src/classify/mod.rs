#![forbid(unsafe_code)]

//! Case-type classification.
//!
//! Two strategies run in a fixed order: [`KeywordStrategy`] scores keyword hits, and when its
//! confidence does not clear the configured threshold [`LexicalOverlapStrategy`] ranks every
//! case type by word overlap. Both sit behind [`MatchStrategy`], so either stage can be swapped
//! without touching the callers.

mod config;
mod input;
mod keyword;
mod overlap;

pub use config::ClassifierConfig;
pub use input::PreparedInput;
pub use keyword::KeywordStrategy;
pub use overlap::LexicalOverlapStrategy;

use crate::ids::CaseId;
use crate::model::CaseType;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Keyword,
    Semantic,
}

impl MatchMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchMethod::Keyword => "keyword",
            MatchMethod::Semantic => "semantic",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrategyScore {
    pub score: f64,
    pub matched_keywords: Vec<String>,
}

/// Capability: score one case type against prepared input text.
pub trait MatchStrategy: Send + Sync {
    fn method(&self) -> MatchMethod;

    fn score(&self, case: &CaseType, input: &PreparedInput) -> StrategyScore;

    /// Maps a raw score into `[0, 1]`.
    fn confidence(&self, score: f64) -> f64;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Alternative {
    pub case_id: CaseId,
    pub case_type: String,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Identification {
    pub case_type: String,
    pub case_id: CaseId,
    pub confidence: f64,
    pub method: MatchMethod,
    pub matched_keywords: Vec<String>,
    pub alternatives: Vec<Alternative>,
}

pub struct Classifier {
    primary: Box<dyn MatchStrategy>,
    fallback: Box<dyn MatchStrategy>,
    threshold: f64,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        let threshold = config.keyword_threshold;
        Self {
            primary: Box::new(KeywordStrategy::new(config)),
            fallback: Box::new(LexicalOverlapStrategy::new()),
            threshold,
        }
    }

    pub fn with_strategies(
        primary: Box<dyn MatchStrategy>,
        fallback: Box<dyn MatchStrategy>,
        threshold: f64,
    ) -> Self {
        Self {
            primary,
            fallback,
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns `None` only when the catalogue is empty.
    pub fn identify(&self, catalogue: &[CaseType], text: &str, top_k: usize) -> Option<Identification> {
        if catalogue.is_empty() {
            return None;
        }
        let input = PreparedInput::new(text);

        if let Some(hit) = self.primary_match(catalogue, &input) {
            return Some(hit);
        }

        let ranked = rank(self.fallback.as_ref(), catalogue, &input);
        let top_k = top_k.max(1);
        let (best, best_score) = ranked.first()?;
        let alternatives = ranked
            .iter()
            .skip(1)
            .take(top_k - 1)
            .map(|(case, score)| Alternative {
                case_id: case.case_id,
                case_type: case.name.clone(),
                score: self.fallback.confidence(*score),
            })
            .collect();

        Some(Identification {
            case_type: best.name.clone(),
            case_id: best.case_id,
            confidence: self.fallback.confidence(*best_score),
            method: self.fallback.method(),
            matched_keywords: Vec::new(),
            alternatives,
        })
    }

    fn primary_match(&self, catalogue: &[CaseType], input: &PreparedInput) -> Option<Identification> {
        let mut best: Option<(&CaseType, StrategyScore)> = None;
        for case in catalogue {
            let scored = self.primary.score(case, input);
            // Strictly greater: ties stay with the first case type scanned.
            let better = match &best {
                None => true,
                Some((_, current)) => scored.score > current.score,
            };
            if better {
                best = Some((case, scored));
            }
        }

        let (case, scored) = best?;
        let confidence = self.primary.confidence(scored.score);
        if confidence <= self.threshold {
            return None;
        }
        Some(Identification {
            case_type: case.name.clone(),
            case_id: case.case_id,
            confidence,
            method: self.primary.method(),
            matched_keywords: scored.matched_keywords,
            alternatives: Vec::new(),
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

/// Scores every case type and sorts by descending score, keeping catalogue order on ties.
pub fn rank<'a>(
    strategy: &dyn MatchStrategy,
    catalogue: &'a [CaseType],
    input: &PreparedInput,
) -> Vec<(&'a CaseType, f64)> {
    let mut ranked = catalogue
        .iter()
        .map(|case| (case, strategy.score(case, input).score))
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}
