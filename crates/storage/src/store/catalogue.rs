#![forbid(unsafe_code)]

use super::{KnowledgeStore, StoreError, StoreStats};
use lr_core::ids::CaseId;
use lr_core::model::CaseType;
use rusqlite::{OptionalExtension, Row, params};

const CASE_TYPE_COLUMNS: &str =
    "case_id, case_name, category, keywords, description, legal_basis";

fn case_type_from_row(row: &Row<'_>) -> rusqlite::Result<CaseType> {
    let keywords: Option<String> = row.get(3)?;
    Ok(CaseType {
        case_id: CaseId::new(row.get(0)?),
        name: row.get(1)?,
        category: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        keywords: CaseType::split_keywords(keywords.as_deref().unwrap_or_default()),
        description: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        legal_basis: row.get(5)?,
    })
}

/// `LIKE` pattern matching `needle` anywhere, with wildcards in the needle taken literally.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl KnowledgeStore {
    /// The whole catalogue in ascending `case_id` order.
    pub fn case_types(&self) -> Result<Vec<CaseType>, StoreError> {
        self.cache.case_types.get_or_try_insert_with((), || {
            let mut stmt = self.conn.prepare(&format!(
                "SELECT {CASE_TYPE_COLUMNS} FROM case_types ORDER BY case_id ASC"
            ))?;
            let rows = stmt.query_map([], case_type_from_row)?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
    }

    pub fn case_type(&self, case_id: CaseId) -> Result<Option<CaseType>, StoreError> {
        self.cache.case_type.get_or_try_insert_with(case_id, || {
            Ok(self
                .conn
                .query_row(
                    &format!("SELECT {CASE_TYPE_COLUMNS} FROM case_types WHERE case_id = ?1"),
                    params![case_id.get()],
                    case_type_from_row,
                )
                .optional()?)
        })
    }

    /// Case types whose stored keyword list contains `keyword`.
    pub fn search_case_types(&self, keyword: &str) -> Result<Vec<CaseType>, StoreError> {
        let keyword = keyword.trim();
        self.cache
            .search
            .get_or_try_insert_with(keyword.to_string(), || {
                let mut stmt = self.conn.prepare(&format!(
                    r#"
                    SELECT {CASE_TYPE_COLUMNS}
                    FROM case_types
                    WHERE keywords LIKE ?1 ESCAPE '\'
                    ORDER BY case_id ASC
                    "#
                ))?;
                let rows = stmt.query_map(params![contains_pattern(keyword)], case_type_from_row)?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            })
    }

    /// Table row counts. Never cached.
    pub fn statistics(&self) -> Result<StoreStats, StoreError> {
        let count = |table: &str| -> Result<u64, StoreError> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
            Ok(n.max(0) as u64)
        };
        Ok(StoreStats {
            case_types: count("case_types")?,
            frameworks: count("case_frameworks")?,
            review_points: count("review_points")?,
            evidence_items: count("evidence_checklists")?,
            templates: count("reinforcement_templates")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("借贷"), "%借贷%");
        assert_eq!(contains_pattern("10%_"), "%10\\%\\_%");
    }
}
