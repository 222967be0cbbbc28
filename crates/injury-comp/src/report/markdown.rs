use super::ReportMetadata;
use crate::compensation::format::money;
use crate::compensation::{ComputationResult, ComputationStandards};
use std::fmt::Write;

const TITLE: &str = "广西人身损害赔偿计算结果";

const REMARKS: [&str; 4] = [
    "本计算结果仅供参考，实际赔偿金额以法院判决为准。",
    "各项费用需提供相应的票据和证明材料。",
    "误工费、护理费的计算方式已根据收入类型进行区分。",
    "被扶养人生活费的计算已考虑年赔偿总额限制。",
];

/// Renders the full report. Only strictly positive items appear in the itemized table.
pub fn render_markdown(
    result: &ComputationResult,
    standards: &ComputationStandards,
    metadata: &ReportMetadata,
) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = write_document(&mut out, result, standards, metadata);
    out
}

fn write_document(
    out: &mut String,
    result: &ComputationResult,
    standards: &ComputationStandards,
    metadata: &ReportMetadata,
) -> std::fmt::Result {
    writeln!(out, "# {TITLE}")?;
    writeln!(out)?;

    writeln!(out, "## 一、基本信息")?;
    writeln!(out)?;
    writeln!(out, "| 项目 | 内容 |")?;
    writeln!(out, "| --- | --- |")?;
    writeln!(out, "| 受害人姓名 | {} |", escape_cell(&result.victim_name))?;
    writeln!(out, "| 受害人年龄 | {}岁 |", result.victim_age)?;
    writeln!(
        out,
        "| 计算基准日期 | {} |",
        metadata.reference_date.format("%Y年%m月%d日")
    )?;
    writeln!(out)?;

    writeln!(out, "## 二、赔偿明细及计算公式")?;
    writeln!(out)?;
    let mut positive = result.positive_items().peekable();
    if positive.peek().is_none() {
        writeln!(out, "无可计算的赔偿项目。")?;
    } else {
        writeln!(out, "| 序号 | 赔偿项目 | 金额（元） | 计算公式 |")?;
        writeln!(out, "| ---: | --- | ---: | --- |")?;
        for (idx, item) in positive.enumerate() {
            writeln!(
                out,
                "| {} | {} | {} | {} |",
                idx + 1,
                item.name,
                money(item.amount),
                narrative_cell(&item.narrative)
            )?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## 三、赔偿总额")?;
    writeln!(out)?;
    writeln!(out, "| 项目 | 金额（元） |")?;
    writeln!(out, "| --- | ---: |")?;
    writeln!(out, "| 赔偿总额 | **{}** |", money(result.total))?;
    writeln!(out)?;
    writeln!(out, "**计算公式：**")?;
    writeln!(out)?;
    writeln!(out, "{}", result.total_narrative)?;
    writeln!(out)?;

    writeln!(out, "## 四、计算依据")?;
    writeln!(out)?;
    writeln!(out, "本计算依据以下法律法规及标准文件：")?;
    writeln!(out)?;
    for (idx, citation) in standards.citations.iter().enumerate() {
        writeln!(out, "{}. {citation}", idx + 1)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "注：统一使用上一年度城镇居民人均可支配收入（{}元/年）和城镇居民人均消费支出（{}元/年）标准进行计算。",
        money(standards.disposable_income),
        money(standards.consumption)
    )?;
    writeln!(out)?;

    writeln!(out, "## 五、备注")?;
    writeln!(out)?;
    for (idx, remark) in REMARKS.iter().enumerate() {
        writeln!(out, "{}. {remark}", idx + 1)?;
    }
    Ok(())
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Table cells cannot hold newlines, so narrative lines are joined with `<br>`.
fn narrative_cell(narrative: &str) -> String {
    narrative
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(escape_cell)
        .collect::<Vec<_>>()
        .join("<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compensation::{compute, CaseInput};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn render(input: CaseInput, standards: &ComputationStandards) -> String {
        let metadata = ReportMetadata {
            reference_date: NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date"),
        };
        render_markdown(&compute(&input, standards), standards, &metadata)
    }

    #[test]
    fn only_positive_items_are_tabulated_in_order() {
        let standards = ComputationStandards::guangxi_2025();
        let doc = render(
            CaseInput {
                victim_name: "张三".to_string(),
                victim_age: 45,
                medical_expense: Decimal::from(10000),
                mental_damage: Decimal::from(5000),
                ..CaseInput::empty(&standards)
            },
            &standards,
        );

        assert!(doc.contains("| 受害人姓名 | 张三 |"));
        assert!(doc.contains("2025年06月30日"));
        assert!(doc.contains("| 1 | 医疗费 | 10,000.00 |"));
        assert!(doc.contains("| 2 | 精神损害抚慰金 | 5,000.00 |"));
        assert!(!doc.contains("| 误工费 |"));
        assert!(doc.contains("总计 = 10,000.00 + 5,000.00 = 15,000.00元"));
        assert!(doc.contains("桂高法会〔2025〕13号"));
        assert!(doc.contains("## 五、备注"));
    }

    #[test]
    fn multi_line_narratives_become_breaks() {
        let standards = ComputationStandards::guangxi_2025();
        let doc = render(
            CaseInput {
                hospital_days: 2,
                ..CaseInput::empty(&standards)
            },
            &standards,
        );
        assert!(doc.contains("住院天数：2天<br>补助标准：100.00元/天<br>"));
    }

    #[test]
    fn empty_case_says_nothing_was_computed() {
        let standards = ComputationStandards::guangxi_2025();
        let doc = render(CaseInput::empty(&standards), &standards);
        assert!(doc.contains("无可计算的赔偿项目。"));
        assert!(doc.contains("| 受害人姓名 | 未填写 |"));
    }
}
