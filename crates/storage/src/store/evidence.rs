#![forbid(unsafe_code)]

use super::{EvidenceRow, KnowledgeStore, StoreError, TemplateRow};
use lr_core::ids::CaseId;
use lr_core::model::{Necessity, Priority, Role};
use rusqlite::params;

impl KnowledgeStore {
    /// Evidence requirements of one party, in insertion order.
    pub fn evidence(&self, case_id: CaseId, role: Role) -> Result<Vec<EvidenceRow>, StoreError> {
        self.cache
            .evidence
            .get_or_try_insert_with((case_id, role), || {
                let mut stmt = self.conn.prepare(
                    r#"
                    SELECT evidence_id, case_id, point_id, evidence_name, evidence_type,
                           necessity_level, description
                    FROM evidence_checklists
                    WHERE case_id = ?1 AND party_type = ?2
                    ORDER BY evidence_id ASC
                    "#,
                )?;
                let rows = stmt.query_map(params![case_id.get(), role.as_str()], |row| {
                    let necessity: Option<String> = row.get(5)?;
                    Ok(EvidenceRow {
                        evidence_id: row.get(0)?,
                        case_id: CaseId::new(row.get(1)?),
                        point_id: row.get(2)?,
                        party: role,
                        evidence_name: row.get(3)?,
                        evidence_type: row.get(4)?,
                        necessity: necessity.as_deref().and_then(Necessity::parse),
                        description: row.get(6)?,
                    })
                })?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            })
    }

    /// Remediation templates of one review point, most urgent first.
    pub fn templates(&self, case_id: CaseId, point_id: i64) -> Result<Vec<TemplateRow>, StoreError> {
        self.cache
            .templates
            .get_or_try_insert_with((case_id, point_id), || {
                let mut stmt = self.conn.prepare(
                    r#"
                    SELECT template_id, case_id, point_id, gap_type, gap_description,
                           reinforcement_advice, priority, difficulty, time_required
                    FROM reinforcement_templates
                    WHERE case_id = ?1 AND point_id = ?2
                    ORDER BY COALESCE(priority, 2) ASC, template_id ASC
                    "#,
                )?;
                let rows = stmt.query_map(params![case_id.get(), point_id], |row| {
                    Ok(TemplateRow {
                        template_id: row.get(0)?,
                        case_id: CaseId::new(row.get(1)?),
                        point_id: row.get(2)?,
                        gap_type: row.get(3)?,
                        gap_description: row.get(4)?,
                        reinforcement_advice: row.get(5)?,
                        priority: Priority::from_level(row.get(6)?),
                        difficulty: row.get(7)?,
                        time_required: row.get(8)?,
                    })
                })?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            })
    }
}
