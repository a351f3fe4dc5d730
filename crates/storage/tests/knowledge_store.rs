#![forbid(unsafe_code)]

use lr_core::ids::CaseId;
use lr_core::model::{FrameworkPart, Necessity, Priority, Role};
use lr_storage::{KnowledgeCache, KnowledgeStore, StoreError, schema};
use rusqlite::{Connection, params};
use std::path::PathBuf;
use std::sync::Arc;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("lr_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn seed(test_name: &str) -> PathBuf {
    let path = temp_dir(test_name).join("case_types.db");
    let conn = Connection::open(&path).expect("create db");
    schema::create_tables(&conn).expect("schema");
    conn.execute_batch(
        r#"
        INSERT INTO case_types(case_id, case_name, category, keywords, description, legal_basis)
        VALUES (7, '民间借贷纠纷', '合同纠纷', '借贷, 民间，借款,, 欠款', '自然人之间借款', '民法典第667条'),
               (2, '股权转让纠纷', '公司纠纷', '股权转让,股东', NULL, NULL),
               (9, '100%_测试', '其他', '100%,折扣_码', '', NULL);

        INSERT INTO case_frameworks(framework_id, case_id, part_number, part_name, part_content, sort_order)
        VALUES (37, 7, 1, '总体情况概述', NULL, 1),
               (39, 7, 3, '原告诉请的审查', '诉请', 3),
               (40, 7, 4, '被告抗辩的审查', NULL, 4);

        INSERT INTO review_points(point_id, case_id, framework_id, point_name, point_type,
                                  review_content, attention_points, legal_basis, is_core, sort_order)
        VALUES (703, 7, 3, '利息请求', '诉请', '利率上限', NULL, NULL, 0, 2),
               (701, 7, 3, '本金请求', '诉请', '借款本金', '核对转账', '第667条', 1, 1),
               (702, 7, 3, '逾期利息', '诉请', NULL, NULL, NULL, 0, 2),
               (704, 7, 1, '案情概述', '概述', '概要', NULL, NULL, 1, 1),
               (705, 7, 4, '已还款抗辩', '抗辩', '还款凭证', NULL, NULL, NULL, 1),
               (706, 7, 39, '旧版框架引用', '其他', NULL, NULL, NULL, 1, 1);

        INSERT INTO evidence_checklists(evidence_id, case_id, point_id, party_type, evidence_name,
                                        evidence_type, necessity_level, description)
        VALUES (1, 7, 701, 'plaintiff', '借条', '书证', '必需', '借款合意'),
               (2, 7, 701, 'plaintiff', '转账记录', '书证', 'required', NULL),
               (3, 7, 701, 'plaintiff', '聊天记录', '电子数据', '补充', NULL),
               (4, 7, 705, 'defendant', '还款凭证', '书证', '必需', NULL),
               (5, 7, 701, 'plaintiff', '催款记录', NULL, 'maybe', NULL);

        INSERT INTO reinforcement_templates(template_id, case_id, point_id, gap_type, gap_description,
                                            reinforcement_advice, priority, difficulty, time_required)
        VALUES (11, 7, 701, '证据缺失', '缺少转账记录', '调取银行流水', 3, '容易', '1周'),
               (12, 7, 701, '证据缺失', '缺少借条', '补签借条', 1, '中等', '3天'),
               (13, 7, 701, '证据缺失', NULL, NULL, NULL, NULL, NULL);
        "#,
    )
    .expect("seed rows");
    path
}

#[test]
fn missing_database_is_reported() {
    let path = temp_dir("missing_database_is_reported").join("absent.db");
    match KnowledgeStore::open(&path) {
        Err(StoreError::MissingDatabase(reported)) => assert_eq!(reported, path),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected missing database"),
    }
}

#[test]
fn catalogue_is_ordered_and_keywords_are_normalized() {
    let store = KnowledgeStore::open(seed("catalogue_is_ordered")).expect("open store");
    let cases = store.case_types().expect("case types");
    let ids = cases.iter().map(|c| c.case_id.get()).collect::<Vec<_>>();
    assert_eq!(ids, vec![2, 7, 9]);

    let lending = &cases[1];
    assert_eq!(lending.name, "民间借贷纠纷");
    assert_eq!(lending.keywords, vec!["借贷", "民间", "借款", "欠款"]);
    assert_eq!(lending.legal_basis.as_deref(), Some("民法典第667条"));
    assert_eq!(cases[0].description, "");

    assert!(store.case_type(CaseId::new(404)).expect("lookup").is_none());
    let single = store.case_type(CaseId::new(7)).expect("lookup").expect("present");
    assert_eq!(&single, lending);
}

#[test]
fn keyword_search_uses_substring_matching() {
    let store = KnowledgeStore::open(seed("keyword_search")).expect("open store");
    let hits = store.search_case_types("借").expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].case_id, CaseId::new(7));

    let literal = store.search_case_types("0%").expect("search");
    assert_eq!(literal.len(), 1);
    assert_eq!(literal[0].case_id, CaseId::new(9));

    let underscore = store.search_case_types("扣_").expect("search");
    assert_eq!(underscore.len(), 1);
    assert!(store.search_case_types("扣x").expect("search").is_empty());
}

#[test]
fn review_points_follow_sort_order_then_insertion() {
    let store = KnowledgeStore::open(seed("review_points_order")).expect("open store");
    let points = store
        .review_points(CaseId::new(7), FrameworkPart::PlaintiffClaims)
        .expect("points");
    let ids = points.iter().map(|p| p.point_id).collect::<Vec<_>>();
    assert_eq!(ids, vec![701, 702, 703]);
    assert!(points.iter().all(|p| p.part == FrameworkPart::PlaintiffClaims));
    assert!(points[0].is_core);
    assert_eq!(points[1].review_content, "");

    let none = store
        .review_points(CaseId::new(7), FrameworkPart::KnowledgeGraph)
        .expect("points");
    assert!(none.is_empty());

    let core = store.core_points(CaseId::new(7)).expect("core");
    let ids = core.iter().map(|p| p.point_id).collect::<Vec<_>>();
    assert_eq!(ids, vec![704, 701]);
}

#[test]
fn review_points_are_keyed_by_part_number_not_framework_row() {
    let store = KnowledgeStore::open(seed("points_by_part_number")).expect("open store");
    let overview = store
        .review_points(CaseId::new(7), FrameworkPart::Overview)
        .expect("points");
    assert_eq!(overview.iter().map(|p| p.point_id).collect::<Vec<_>>(), vec![704]);

    let defense = store
        .review_points(CaseId::new(7), FrameworkPart::DefendantDefenses)
        .expect("points");
    assert_eq!(defense.len(), 1);
    assert!(!defense[0].is_core);

    // 706 points at a case_frameworks key rather than a part number.
    let core = store.core_points(CaseId::new(7)).expect("core");
    assert!(core.iter().all(|p| p.point_id != 706));
}

#[test]
fn evidence_is_filtered_by_party_and_labels_are_parsed() {
    let store = KnowledgeStore::open(seed("evidence_labels")).expect("open store");
    let plaintiff = store
        .evidence(CaseId::new(7), Role::Plaintiff)
        .expect("evidence");
    let names = plaintiff
        .iter()
        .map(|e| e.evidence_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["借条", "转账记录", "聊天记录", "催款记录"]);
    assert_eq!(plaintiff[0].necessity, Some(Necessity::Required));
    assert_eq!(plaintiff[1].necessity, Some(Necessity::Required));
    assert_eq!(plaintiff[2].necessity, Some(Necessity::Supplementary));
    assert_eq!(plaintiff[3].necessity, None);
    assert!(!plaintiff[3].is_required());

    let defendant = store
        .evidence(CaseId::new(7), Role::Defendant)
        .expect("evidence");
    assert_eq!(defendant.len(), 1);
    assert_eq!(defendant[0].party, Role::Defendant);
    assert!(store.evidence(CaseId::new(7), Role::Neutral).expect("evidence").is_empty());
}

#[test]
fn templates_are_ordered_by_priority() {
    let store = KnowledgeStore::open(seed("templates_priority")).expect("open store");
    let templates = store.templates(CaseId::new(7), 701).expect("templates");
    let order = templates
        .iter()
        .map(|t| (t.template_id, t.priority))
        .collect::<Vec<_>>();
    assert_eq!(
        order,
        vec![(12, Priority::High), (13, Priority::Medium), (11, Priority::Low)]
    );
    assert!(store.templates(CaseId::new(7), 999).expect("templates").is_empty());
}

#[test]
fn statistics_count_every_table() {
    let store = KnowledgeStore::open(seed("statistics_count")).expect("open store");
    let stats = store.statistics().expect("stats");
    assert_eq!(stats.case_types, 3);
    assert_eq!(stats.frameworks, 3);
    assert_eq!(stats.review_points, 6);
    assert_eq!(stats.evidence_items, 5);
    assert_eq!(stats.templates, 3);
}

#[test]
fn cache_serves_stale_rows_until_invalidated() {
    let path = seed("cache_until_invalidated");
    let cache = Arc::new(KnowledgeCache::new(16));
    let store = KnowledgeStore::open(&path)
        .expect("open store")
        .with_cache(Arc::clone(&cache));

    assert_eq!(store.case_types().expect("case types").len(), 3);

    let writer = Connection::open(&path).expect("writer");
    writer
        .execute(
            "INSERT INTO case_types(case_id, case_name, category, keywords) VALUES (?1, ?2, ?3, ?4)",
            params![11, "租赁合同纠纷", "合同纠纷", "租金"],
        )
        .expect("insert");

    assert_eq!(store.case_types().expect("case types").len(), 3);
    assert!(cache.stats().hits >= 1);

    cache.invalidate();
    assert_eq!(store.case_types().expect("case types").len(), 4);
}

#[test]
fn shared_cache_spans_stores() {
    let path = seed("shared_cache_spans_stores");
    let cache = Arc::new(KnowledgeCache::new(16));
    let first = KnowledgeStore::open(&path)
        .expect("open store")
        .with_cache(Arc::clone(&cache));
    let second = KnowledgeStore::open(&path)
        .expect("open store")
        .with_cache(Arc::clone(&cache));

    first.evidence(CaseId::new(7), Role::Plaintiff).expect("evidence");
    let before = cache.stats();
    second.evidence(CaseId::new(7), Role::Plaintiff).expect("evidence");
    let after = cache.stats();
    assert_eq!(after.hits, before.hits + 1);
    assert_eq!(after.entries, before.entries);
}

#[test]
fn default_cache_has_default_capacity() {
    let store = KnowledgeStore::open(seed("default_cache_capacity")).expect("open store");
    assert_eq!(
        store.cache().capacity(),
        lr_storage::cache::DEFAULT_CACHE_CAPACITY
    );
    store.case_types().expect("case types");
    assert_eq!(store.cache().stats().entries, 1);
}
