#![allow(dead_code)]

use lr_storage::{KnowledgeStore, schema};
use rusqlite::Connection;
use std::path::PathBuf;

pub const LENDING: i64 = 7;
pub const EQUITY: i64 = 2;
pub const LEASING: i64 = 1;
pub const BARE: i64 = 3;

pub fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("lr_review_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// Knowledge base with a fully modelled lending case plus a few thinner case types.
/// The leasing case has review points but no `case_frameworks` rows at all.
pub fn seed(test_name: &str) -> PathBuf {
    let path = temp_dir(test_name).join("case_types.db");
    let conn = Connection::open(&path).expect("create db");
    schema::create_tables(&conn).expect("schema");
    conn.execute_batch(
        r#"
        INSERT INTO case_types(case_id, case_name, category, keywords, description, legal_basis)
        VALUES (1, '融资租赁合同纠纷', '合同纠纷', '融资租赁,租金,承租人,出租人',
                '融资租赁合同纠纷 承租人 逾期 支付 租金', NULL),
               (2, '股权转让纠纷', '公司纠纷', '股权转让,股权,股东,转让款',
                '股权转让 合同 纠纷 股东 转让款', '公司法第84条'),
               (3, '空白案由', '其他', '空白', '尚未建模', NULL),
               (7, '民间借贷纠纷', '合同纠纷', '借贷,民间借贷,借款,借钱,不还,欠款,借条',
                '自然人 之间 借款 合同 纠纷 借条 欠款 利息', '民法典第667条');

        -- framework rows carry catalogue-wide keys; review points store the part number itself
        INSERT INTO case_frameworks(framework_id, case_id, part_number, part_name, sort_order)
        VALUES (37, 7, 1, '总体情况概述', 1),
               (38, 7, 2, '立案审查', 2),
               (39, 7, 3, '原告诉请的审查', 3),
               (40, 7, 4, '被告抗辩的审查', 4),
               (41, 7, 5, '要件事实审查和裁判规则', 5),
               (42, 7, 6, '知识图谱', 6),
               (7, 2, 1, '总体情况概述', 1);

        INSERT INTO review_points(point_id, case_id, framework_id, point_name, point_type,
                                  review_content, attention_points, legal_basis, is_core, sort_order)
        VALUES (7101, 7, 1, '案情概述', '概述', '梳理借贷经过', NULL, NULL, 1, 1),
               (7201, 7, 2, '管辖审查', '程序', '被告住所地或合同履行地', NULL, '民事诉讼法第24条', 0, 1),
               (7302, 7, 3, '利息请求', '诉请', '利率不得超过法定上限', NULL, NULL, 0, 2),
               (7301, 7, 3, '本金请求', '诉请', '核对借款本金', '扣除预扣利息', '民法典第667条', 1, 1),
               (7401, 7, 4, '已还款抗辩', '抗辩', '审查还款凭证', NULL, NULL, 1, 1),
               (7502, 7, 5, '款项交付', '要件', '审查资金实际交付', NULL, NULL, 1, 2),
               (7501, 7, 5, '借贷合意', '要件', '审查借条或借款合同', NULL, '民法典第679条', 1, 1),
               (2101, 2, 1, '股权概况', '概述', NULL, NULL, NULL, 0, 1),
               (1101, 1, 1, '租赁物概况', '概述', '核对租赁物', NULL, NULL, 1, 1),
               (1301, 1, 3, '租金请求', '诉请', '核对欠付租金', NULL, '民法典第752条', 1, 1);

        INSERT INTO evidence_checklists(evidence_id, case_id, point_id, party_type, evidence_name,
                                        evidence_type, necessity_level, description)
        VALUES (1, 7, 7501, 'plaintiff', '借条', '书证', '必需', '证明借贷合意'),
               (2, 7, 7502, 'plaintiff', '转账记录', '书证', '必需', '证明款项交付'),
               (3, 7, 7301, 'plaintiff', '催款记录', NULL, '重要', NULL),
               (4, 7, 7502, 'plaintiff', '聊天记录', '电子数据', '补充', NULL),
               (5, 7, 7401, 'defendant', '还款凭证', '书证', '必需', NULL);

        INSERT INTO reinforcement_templates(template_id, case_id, point_id, gap_type, gap_description,
                                            reinforcement_advice, priority, difficulty, time_required)
        VALUES (22, 7, 7502, '证据缺失', '缺少证人', '补充证人证言', 3, '较难', '2-4周'),
               (21, 7, 7502, '证据缺失', '缺少资金交付凭证', '调取银行转账流水', 1, '容易', '3-5天');
        "#,
    )
    .expect("seed rows");
    path
}

pub fn open(test_name: &str) -> KnowledgeStore {
    KnowledgeStore::open(seed(test_name)).expect("open store")
}
