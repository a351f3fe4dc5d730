#![forbid(unsafe_code)]
#![allow(dead_code)]

use lr_storage::schema;
use rusqlite::Connection;
use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

pub(crate) fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("lr_mcp_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// Lending case 7 with IOU and transfer record evidence, plus an equity case without review data.
pub(crate) fn seed_db(dir: &Path) -> PathBuf {
    let path = dir.join("case_types.db");
    let conn = Connection::open(&path).expect("create db");
    schema::create_tables(&conn).expect("schema");
    conn.execute_batch(
        r#"
        INSERT INTO case_types(case_id, case_name, category, keywords, description, legal_basis)
        VALUES (2, '股权转让纠纷', '公司纠纷', '股权转让,股权,股东,转让款',
                '股权转让 合同 纠纷 股东 转让款', NULL),
               (7, '民间借贷纠纷', '合同纠纷', '借贷,民间借贷,借款,借钱,不还,欠款',
                '自然人 之间 借款 纠纷 借条 欠款', '民法典第667条');

        INSERT INTO case_frameworks(framework_id, case_id, part_number, part_name, sort_order)
        VALUES (37, 7, 1, '总体情况概述', 1),
               (39, 7, 3, '原告诉请的审查', 3),
               (40, 7, 4, '被告抗辩的审查', 4),
               (41, 7, 5, '要件事实审查和裁判规则', 5);

        INSERT INTO review_points(point_id, case_id, framework_id, point_name, point_type,
                                  review_content, is_core, sort_order)
        VALUES (7101, 7, 1, '案情概述', '概述', '梳理借贷经过', 1, 1),
               (7301, 7, 3, '本金请求', '诉请', '核对借款本金', 0, 1),
               (7401, 7, 4, '已还款抗辩', '抗辩', '审查还款凭证', 1, 1),
               (7501, 7, 5, '借贷合意', '要件', '审查借条或借款合同', 1, 1),
               (7502, 7, 5, '款项交付', '要件', '审查资金实际交付', 1, 2);

        INSERT INTO evidence_checklists(evidence_id, case_id, point_id, party_type, evidence_name,
                                        evidence_type, necessity_level, description)
        VALUES (1, 7, 7501, 'plaintiff', '借条', '书证', '必需', '证明借贷合意'),
               (2, 7, 7502, 'plaintiff', '转账记录', '书证', '必需', '证明款项交付'),
               (3, 7, 7401, 'defendant', '还款凭证', '书证', '必需', NULL);

        INSERT INTO reinforcement_templates(template_id, case_id, point_id, gap_type, gap_description,
                                            reinforcement_advice, priority, difficulty, time_required)
        VALUES (21, 7, 7502, '证据缺失', '缺少资金交付凭证', '调取银行转账流水', 1, '容易', '3-5天');
        "#,
    )
    .expect("seed rows");
    path
}

pub(crate) struct Server {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    dir: PathBuf,
}

impl Server {
    pub(crate) fn start(test_name: &str) -> Self {
        Self::start_with_args(test_name, &[])
    }

    pub(crate) fn start_with_args(test_name: &str, extra_args: &[&str]) -> Self {
        let dir = temp_dir(test_name);
        let db = seed_db(&dir);
        let mut child = Command::new(env!("CARGO_BIN_EXE_lr_mcp"))
            .arg("--db")
            .arg(&db)
            .args(extra_args)
            .env("RUST_LOG", "warn")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn lr_mcp");

        let stdin = child.stdin.take().expect("stdin");
        let stdout = BufReader::new(child.stdout.take().expect("stdout"));
        Self {
            child,
            stdin,
            stdout,
            dir,
        }
    }

    pub(crate) fn start_initialized(test_name: &str) -> Self {
        let mut server = Self::start(test_name);
        server.initialize_default();
        server
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.dir.join("case_types.db")
    }

    pub(crate) fn send(&mut self, req: Value) {
        writeln!(self.stdin, "{req}").expect("write request");
        self.stdin.flush().expect("flush request");
    }

    pub(crate) fn recv(&mut self) -> Value {
        let mut line = String::new();
        self.stdout.read_line(&mut line).expect("read response");
        assert!(!line.trim().is_empty(), "empty response line");
        serde_json::from_str(&line).expect("parse response json")
    }

    pub(crate) fn request(&mut self, req: Value) -> Value {
        self.send(req);
        self.recv()
    }

    pub(crate) fn initialize_default(&mut self) {
        let _ = self.request(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": { "protocolVersion": "2024-11-05", "capabilities": {}, "clientInfo": { "name": "test", "version": "0" } }
        }));
        self.send(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
            "params": {}
        }));
    }

    /// Calls a tool and returns the decoded envelope, or the raw text for markdown results.
    pub(crate) fn call(&mut self, name: &str, arguments: Value) -> Value {
        let resp = self.request(json!({
            "jsonrpc": "2.0",
            "id": 100,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }));
        extract_tool_text(&resp)
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

pub(crate) fn extract_tool_text(resp: &Value) -> Value {
    let text = resp
        .get("result")
        .and_then(|v| v.get("content"))
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("text"))
        .and_then(|v| v.as_str())
        .expect("result.content[0].text");
    if let Ok(parsed) = serde_json::from_str(text) {
        return parsed;
    }
    Value::String(text.to_string())
}

pub(crate) fn assert_tool_error(envelope: &Value, expected_code: &str) {
    assert_eq!(envelope["success"], false, "expected failure: {envelope}");
    assert_eq!(envelope["error"]["code"], expected_code, "envelope: {envelope}");
}
