#![forbid(unsafe_code)]

use super::{KnowledgeStore, ReviewPointRow, StoreError, part_column};
use lr_core::ids::CaseId;
use lr_core::model::FrameworkPart;
use rusqlite::{Row, params};

// `review_points.framework_id` holds the part number (1..=6), not a `case_frameworks` key.
const REVIEW_POINT_SELECT: &str = r#"
    SELECT point_id, case_id, framework_id, point_name, point_type, review_content,
           attention_points, legal_basis, sort_order, is_core
    FROM review_points
"#;

fn review_point_from_row(row: &Row<'_>) -> rusqlite::Result<ReviewPointRow> {
    Ok(ReviewPointRow {
        point_id: row.get(0)?,
        case_id: CaseId::new(row.get(1)?),
        part: part_column(row, 2)?,
        point_name: row.get(3)?,
        point_type: row.get(4)?,
        review_content: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        attention_points: row.get(6)?,
        legal_basis: row.get(7)?,
        sort_order: row.get(8)?,
        is_core: row.get::<_, Option<bool>>(9)?.unwrap_or(false),
    })
}

impl KnowledgeStore {
    /// Review points of one framework part, by `sort_order` then insertion order.
    pub fn review_points(
        &self,
        case_id: CaseId,
        part: FrameworkPart,
    ) -> Result<Vec<ReviewPointRow>, StoreError> {
        self.cache
            .review_points
            .get_or_try_insert_with((case_id, part), || {
                let mut stmt = self.conn.prepare(&format!(
                    "{REVIEW_POINT_SELECT}
                    WHERE case_id = ?1 AND framework_id = ?2
                    ORDER BY sort_order ASC, point_id ASC"
                ))?;
                let rows = stmt.query_map(
                    params![case_id.get(), i64::from(part.number())],
                    review_point_from_row,
                )?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            })
    }

    /// Core review points across all parts, in framework order.
    pub fn core_points(&self, case_id: CaseId) -> Result<Vec<ReviewPointRow>, StoreError> {
        self.cache.core_points.get_or_try_insert_with(case_id, || {
            let mut stmt = self.conn.prepare(&format!(
                "{REVIEW_POINT_SELECT}
                WHERE case_id = ?1 AND COALESCE(is_core, 0) <> 0
                  AND framework_id BETWEEN 1 AND 6
                ORDER BY framework_id ASC, sort_order ASC, point_id ASC"
            ))?;
            let rows = stmt.query_map(params![case_id.get()], review_point_from_row)?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
    }
}
