#![forbid(unsafe_code)]

use crate::error::CoreError;
use crate::ids::CaseId;
use serde::{Deserialize, Serialize, Serializer};

/// The viewpoint a checklist or gap analysis is produced for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Plaintiff,
    Defendant,
    Neutral,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Plaintiff, Role::Defendant, Role::Neutral];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Plaintiff => "plaintiff",
            Role::Defendant => "defendant",
            Role::Neutral => "neutral",
        }
    }

    /// Accepts the stored English labels and the Chinese party names.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "plaintiff" | "原告" => Ok(Role::Plaintiff),
            "defendant" | "被告" => Ok(Role::Defendant),
            "neutral" | "中立" => Ok(Role::Neutral),
            _ => Err(CoreError::UnknownRole(value.to_string())),
        }
    }

    /// Fixed role-to-parts projection of the review framework.
    pub fn relevant_parts(self) -> &'static [FrameworkPart] {
        use FrameworkPart::*;
        match self {
            Role::Plaintiff => &[Overview, FilingReview, PlaintiffClaims, ElementFacts],
            Role::Defendant => &[Overview, DefendantDefenses, ElementFacts],
            Role::Neutral => &FrameworkPart::ALL,
        }
    }
}

impl std::str::FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six canonical stages of a structured case review.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrameworkPart {
    Overview,
    FilingReview,
    PlaintiffClaims,
    DefendantDefenses,
    ElementFacts,
    KnowledgeGraph,
}

impl FrameworkPart {
    pub const ALL: [FrameworkPart; 6] = [
        FrameworkPart::Overview,
        FrameworkPart::FilingReview,
        FrameworkPart::PlaintiffClaims,
        FrameworkPart::DefendantDefenses,
        FrameworkPart::ElementFacts,
        FrameworkPart::KnowledgeGraph,
    ];

    pub fn number(self) -> u8 {
        match self {
            FrameworkPart::Overview => 1,
            FrameworkPart::FilingReview => 2,
            FrameworkPart::PlaintiffClaims => 3,
            FrameworkPart::DefendantDefenses => 4,
            FrameworkPart::ElementFacts => 5,
            FrameworkPart::KnowledgeGraph => 6,
        }
    }

    pub fn from_number(value: i64) -> Result<Self, CoreError> {
        match value {
            1 => Ok(FrameworkPart::Overview),
            2 => Ok(FrameworkPart::FilingReview),
            3 => Ok(FrameworkPart::PlaintiffClaims),
            4 => Ok(FrameworkPart::DefendantDefenses),
            5 => Ok(FrameworkPart::ElementFacts),
            6 => Ok(FrameworkPart::KnowledgeGraph),
            other => Err(CoreError::PartOutOfRange(other)),
        }
    }

    /// Canonical section title used in checklists and reports.
    pub fn name(self) -> &'static str {
        match self {
            FrameworkPart::Overview => "总体情况概述",
            FrameworkPart::FilingReview => "立案审查",
            FrameworkPart::PlaintiffClaims => "原告诉请的审查",
            FrameworkPart::DefendantDefenses => "被告抗辩的审查",
            FrameworkPart::ElementFacts => "要件事实审查和裁判规则",
            FrameworkPart::KnowledgeGraph => "知识图谱",
        }
    }
}

impl Serialize for FrameworkPart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Necessity {
    Required,
    Important,
    Supplementary,
}

impl Necessity {
    /// Stored labels are either English or the Chinese originals. Unknown labels yield `None`
    /// and are never treated as required.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "required" | "必需" => Some(Necessity::Required),
            "important" | "重要" => Some(Necessity::Important),
            "supplementary" | "补充" => Some(Necessity::Supplementary),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Necessity::Required => "required",
            Necessity::Important => "important",
            Necessity::Supplementary => "supplementary",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Necessity::Required => "必需",
            Necessity::Important => "重要",
            Necessity::Supplementary => "补充",
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Necessity::Required => 0,
            Necessity::Important => 1,
            Necessity::Supplementary => 2,
        }
    }
}

/// Remediation urgency. Ordering follows urgency: `High < Medium < Low`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn from_level(level: Option<i64>) -> Self {
        match level {
            None => Priority::Medium,
            Some(v) if v <= 1 => Priority::High,
            Some(2) => Priority::Medium,
            Some(_) => Priority::Low,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "高",
            Priority::Medium => "中",
            Priority::Low => "低",
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

/// A case type as the classifier and the reports see it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CaseType {
    pub case_id: CaseId,
    pub name: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub description: String,
    pub legal_basis: Option<String>,
}

impl CaseType {
    /// Splits the comma-joined keyword column, dropping blanks.
    pub fn split_keywords(raw: &str) -> Vec<String> {
        raw.split([',', '，'])
            .map(str::trim)
            .filter(|kw| !kw.is_empty())
            .map(str::to_string)
            .collect()
    }
}
