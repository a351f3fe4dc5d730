#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    #[serde(default)]
    pub name: Option<String>,
}

/// Evidence the caller already holds. Items without a usable name count as no evidence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Materials {
    #[serde(default)]
    pub evidences: Vec<EvidenceItem>,
}

impl Materials {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            evidences: names
                .into_iter()
                .map(|name| EvidenceItem {
                    name: Some(name.into()),
                })
                .collect(),
        }
    }

    /// Tolerant reading of caller JSON: `evidences` entries may be objects with a `name`, bare
    /// strings, or anything else (ignored). Never fails.
    pub fn from_value(value: &Value) -> Self {
        let Some(items) = value.get("evidences").and_then(Value::as_array) else {
            return Self::default();
        };
        let evidences = items
            .iter()
            .map(|item| {
                let name = match item {
                    Value::String(name) => Some(name.clone()),
                    Value::Object(map) => match map.get("name") {
                        Some(Value::String(name)) => Some(name.clone()),
                        Some(Value::Number(n)) => Some(n.to_string()),
                        _ => None,
                    },
                    _ => None,
                };
                EvidenceItem { name }
            })
            .collect();
        Self { evidences }
    }

    /// Lower-cased names joined by single spaces; the containment test runs against this.
    pub(crate) fn haystack(&self) -> String {
        self.evidences
            .iter()
            .map(|item| item.name.as_deref().unwrap_or_default().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn has_any(&self) -> bool {
        self.evidences
            .iter()
            .any(|item| item.name.as_deref().is_some_and(|name| !name.trim().is_empty()))
    }

    /// Whether an evidence requirement named `name` is covered.
    pub(crate) fn covers(haystack: &str, name: &str) -> bool {
        haystack.contains(&name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tolerant_reading_skips_unusable_items() {
        let value = json!({
            "evidences": [
                {"name": "借条"},
                "转账记录",
                {"title": "no name"},
                {"name": 42},
                null,
                7
            ]
        });
        let materials = Materials::from_value(&value);
        let names = materials
            .evidences
            .iter()
            .map(|item| item.name.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                Some("借条".to_string()),
                Some("转账记录".to_string()),
                None,
                Some("42".to_string()),
                None,
                None
            ]
        );
        assert_eq!(materials.haystack(), "借条 转账记录  42  ");
    }

    #[test]
    fn missing_evidences_is_empty() {
        assert_eq!(Materials::from_value(&json!({})), Materials::default());
        assert_eq!(Materials::from_value(&json!("text")), Materials::default());
        assert!(!Materials::from_value(&json!({"evidences": [{}]})).has_any());
    }

    #[test]
    fn deserialization_defaults_missing_fields() {
        let materials: Materials =
            serde_json::from_value(json!({"evidences": [{}, {"name": "借条"}]})).unwrap();
        assert_eq!(materials.evidences[0].name, None);
        assert!(materials.has_any());
    }

    #[test]
    fn containment_is_case_insensitive() {
        let materials = Materials::from_names(["IOU Original", "Bank Transfer"]);
        let haystack = materials.haystack();
        assert!(Materials::covers(&haystack, "iou"));
        assert!(Materials::covers(&haystack, "BANK"));
        assert!(!Materials::covers(&haystack, "receipt"));
    }
}
