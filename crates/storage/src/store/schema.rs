#![forbid(unsafe_code)]

//! Knowledge database layout.
//!
//! The store only reads; this DDL exists for fixtures, tests and external provisioning tools.

use super::StoreError;
use rusqlite::Connection;

pub fn create_tables(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS case_types (
          case_id INTEGER PRIMARY KEY,
          case_name TEXT NOT NULL,
          category TEXT NOT NULL,
          keywords TEXT NOT NULL,
          description TEXT,
          procedure_type TEXT,
          core_legal_basis TEXT,
          legal_basis TEXT,
          created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS case_frameworks (
          framework_id INTEGER PRIMARY KEY,
          case_id INTEGER NOT NULL,
          part_number INTEGER NOT NULL CHECK (part_number BETWEEN 1 AND 6),
          part_name TEXT NOT NULL,
          part_content TEXT,
          parent_id INTEGER,
          sort_order INTEGER,
          FOREIGN KEY (case_id) REFERENCES case_types(case_id)
        );

        CREATE TABLE IF NOT EXISTS review_points (
          point_id INTEGER PRIMARY KEY,
          case_id INTEGER NOT NULL,
          framework_id INTEGER NOT NULL,
          point_name TEXT NOT NULL,
          point_type TEXT NOT NULL,
          review_content TEXT,
          attention_points TEXT,
          legal_basis TEXT,
          typical_cases TEXT,
          is_core BOOLEAN DEFAULT 0,
          sort_order INTEGER,
          FOREIGN KEY (case_id) REFERENCES case_types(case_id),
          FOREIGN KEY (framework_id) REFERENCES case_frameworks(framework_id)
        );

        CREATE TABLE IF NOT EXISTS evidence_checklists (
          evidence_id INTEGER PRIMARY KEY,
          case_id INTEGER NOT NULL,
          point_id INTEGER NOT NULL,
          party_type TEXT NOT NULL,
          evidence_name TEXT NOT NULL,
          evidence_type TEXT,
          necessity_level TEXT,
          description TEXT,
          FOREIGN KEY (case_id) REFERENCES case_types(case_id),
          FOREIGN KEY (point_id) REFERENCES review_points(point_id)
        );

        CREATE TABLE IF NOT EXISTS reinforcement_templates (
          template_id INTEGER PRIMARY KEY,
          case_id INTEGER NOT NULL,
          point_id INTEGER NOT NULL,
          gap_type TEXT NOT NULL,
          gap_description TEXT,
          reinforcement_advice TEXT,
          priority INTEGER,
          difficulty TEXT,
          time_required TEXT,
          FOREIGN KEY (case_id) REFERENCES case_types(case_id),
          FOREIGN KEY (point_id) REFERENCES review_points(point_id)
        );

        CREATE INDEX IF NOT EXISTS idx_case_types_keywords ON case_types(keywords);
        CREATE INDEX IF NOT EXISTS idx_frameworks_case_id ON case_frameworks(case_id);
        CREATE INDEX IF NOT EXISTS idx_review_points_case_id ON review_points(case_id, framework_id);
        CREATE INDEX IF NOT EXISTS idx_evidence_case_id ON evidence_checklists(case_id, party_type);
        CREATE INDEX IF NOT EXISTS idx_templates_case_point ON reinforcement_templates(case_id, point_id);
        "#,
    )?;
    Ok(())
}
