#![forbid(unsafe_code)]

//! Markdown rendering of pipeline results. Pure formatting; callers may substitute their own.

use crate::checklist::Checklist;
use crate::gaps::{Advice, Recommendation};
use crate::position::{EvidenceEntry, PositionAnalysis};
use lr_core::classify::{Identification, MatchMethod};
use lr_core::model::{Necessity, Priority, Role};

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Plaintiff => "原告",
        Role::Defendant => "被告",
        Role::Neutral => "中立",
    }
}

fn priority_heading(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴 高优先级（立即处理）",
        Priority::Medium => "🟡 中优先级（建议尽快处理）",
        Priority::Low => "🟢 低优先级（可选）",
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn render_checklist(checklist: &Checklist) -> String {
    let mut out = format!(
        "# {} - {}视角要件清单\n\n",
        checklist.case_type,
        role_label(checklist.user_role)
    );
    out.push_str(&format!("**案件ID**: {}\n\n", checklist.case_id));
    push_checklist_sections(&mut out, checklist, "##");
    out
}

fn push_checklist_sections(out: &mut String, checklist: &Checklist, heading: &str) {
    if checklist.sections.is_empty() {
        out.push_str("暂无审查要点\n\n");
        return;
    }
    for section in &checklist.sections {
        out.push_str(&format!("{heading} {}\n\n", section.part_name));
        for item in &section.checklist_items {
            let core = if item.is_core { " **[核心]**" } else { "" };
            out.push_str(&format!("- [ ] {}{core}\n", item.item_name));
            if !item.review_content.is_empty() {
                out.push_str(&format!("  - **审查要点**: {}\n", item.review_content));
            }
            if let Some(attention) = item.attention_points.as_deref().filter(|s| !s.is_empty()) {
                out.push_str(&format!("  - **注意事项**: {attention}\n"));
            }
            if let Some(basis) = item.legal_basis.as_deref().filter(|s| !s.is_empty()) {
                out.push_str(&format!("  - **法律依据**: {basis}\n"));
            }
        }
        out.push('\n');
    }
}

pub fn render_recommendation(recommendation: &Recommendation) -> String {
    let mut out = String::from("# 补强建议报告\n\n");
    out.push_str(&format!("**案件ID**: {}\n", recommendation.case_id));
    out.push_str(&format!(
        "**用户角色**: {}\n",
        role_label(recommendation.user_role)
    ));
    out.push_str(&format!("**缺失要素**: {} 个\n\n", recommendation.gaps_count));
    push_recommendation_body(&mut out, recommendation, "##");
    out
}

fn push_recommendation_body(out: &mut String, recommendation: &Recommendation, heading: &str) {
    out.push_str(&format!("{heading} 摘要\n\n{}\n\n", recommendation.summary));

    if !recommendation.gaps.is_empty() {
        out.push_str(&format!("{heading} 缺失要素\n\n"));
        for gap in &recommendation.gaps {
            out.push_str(&format!("- ❌ {} （{}）\n", gap.name, gap.necessity.label()));
        }
        out.push('\n');
    }

    if recommendation.advices.is_empty() {
        out.push_str("✅ 无需补强\n");
        return;
    }
    out.push_str(&format!("{heading} 补强建议\n\n"));
    for priority in Priority::ALL {
        let group = recommendation
            .advices
            .iter()
            .filter(|advice| advice.priority == priority)
            .collect::<Vec<_>>();
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!("{heading}# {}\n\n", priority_heading(priority)));
        for advice in group {
            push_advice(out, advice, heading);
        }
    }
}

fn push_advice(out: &mut String, advice: &Advice, heading: &str) {
    out.push_str(&format!("{heading}## {}\n\n", advice.gap_name));
    out.push_str(&format!("**问题**: {}\n\n", advice.description));
    out.push_str(&format!("**建议**: {}\n\n", advice.advice));
    out.push_str(&format!("- 难度: {}\n", advice.difficulty));
    out.push_str(&format!("- 时间: {}\n\n", advice.time_required));
}

pub fn render_position(analysis: &PositionAnalysis) -> String {
    let mut out = format!(
        "# {} - {}视角分析报告\n\n",
        analysis.case_type,
        role_label(analysis.user_role)
    );
    out.push_str(&format!("**案件ID**: {}\n", analysis.case_id));
    out.push_str(&format!(
        "**胜诉概率**: {}\n\n",
        percent(analysis.winning_probability)
    ));

    out.push_str("## 一、优势识别\n\n");
    if analysis.strengths.is_empty() {
        out.push_str("暂无识别的优势\n");
    }
    for strength in &analysis.strengths {
        out.push_str(&format!("- ✅ {}\n", strength.name));
        if !strength.content.is_empty() {
            out.push_str(&format!("  {}\n", strength.content));
        }
    }
    out.push('\n');

    out.push_str("## 二、缺失识别\n\n");
    if analysis.gaps.is_empty() {
        out.push_str("✅ 要件完整，无明显缺失\n");
    }
    for gap in &analysis.gaps {
        out.push_str(&format!("- ❌ {}\n", gap.name));
        if !gap.missing_evidence.is_empty() {
            out.push_str(&format!("  缺少: {}\n", gap.missing_evidence.join("、")));
        } else if !gap.content.is_empty() {
            out.push_str(&format!("  {}\n", gap.content));
        }
    }
    out.push('\n');

    out.push_str("## 三、诉请建议\n\n");
    if analysis.claims.is_empty() {
        out.push_str("暂无诉请建议\n\n");
    }
    for claim in &analysis.claims {
        out.push_str(&format!("### {}\n\n", claim.name));
        if !claim.content.is_empty() {
            out.push_str(&format!("{}\n\n", claim.content));
        }
        if let Some(basis) = claim.basis.as_deref().filter(|s| !s.is_empty()) {
            out.push_str(&format!("**法律依据**: {basis}\n\n"));
        }
    }

    out.push_str("## 四、证据清单\n\n");
    if analysis.evidence.is_empty() {
        out.push_str("暂无证据清单\n");
        return out;
    }
    let groups: [(Option<Necessity>, &str); 4] = [
        (Some(Necessity::Required), "必需证据"),
        (Some(Necessity::Important), "重要证据"),
        (Some(Necessity::Supplementary), "补充证据"),
        (None, "其他证据"),
    ];
    for (necessity, title) in groups {
        let group = analysis
            .evidence
            .iter()
            .filter(|entry| entry.necessity == necessity)
            .collect::<Vec<_>>();
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!("### {title}\n\n"));
        for entry in group {
            push_evidence(&mut out, entry);
        }
        out.push('\n');
    }
    out
}

fn push_evidence(out: &mut String, entry: &EvidenceEntry) {
    out.push_str(&format!("- **{}** ({})\n", entry.name, entry.evidence_type));
    if let Some(description) = entry.description.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!("  {description}\n"));
    }
}

/// Full report: identification (when the case was classified from text), checklist, advice.
pub fn render_combined(
    identification: Option<&Identification>,
    checklist: &Checklist,
    recommendation: &Recommendation,
) -> String {
    let mut out = format!("# {} 案件审查报告\n\n", checklist.case_type);
    out.push_str(&format!("**案件ID**: {}\n", checklist.case_id));
    out.push_str(&format!(
        "**用户角色**: {}\n\n",
        role_label(checklist.user_role)
    ));

    if let Some(identification) = identification {
        out.push_str("## 案件识别\n\n");
        let method = match identification.method {
            MatchMethod::Keyword => "关键词匹配",
            MatchMethod::Semantic => "语义匹配",
        };
        out.push_str(&format!(
            "- **案件类型**: {}\n- **置信度**: {}\n- **识别方式**: {method}\n",
            identification.case_type,
            percent(identification.confidence)
        ));
        if !identification.matched_keywords.is_empty() {
            out.push_str(&format!(
                "- **匹配关键词**: {}\n",
                identification.matched_keywords.join("、")
            ));
        }
        for alternative in &identification.alternatives {
            out.push_str(&format!(
                "- 备选: {} ({})\n",
                alternative.case_type,
                percent(alternative.score)
            ));
        }
        out.push('\n');
    }

    out.push_str("## 要件清单\n\n");
    push_checklist_sections(&mut out, checklist, "###");

    out.push_str("## 补强建议\n\n");
    push_recommendation_body(&mut out, recommendation, "###");
    out
}
