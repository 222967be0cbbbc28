//! Dependents' living expense.
//!
//! Each dependent is owed `consumption / support_count` per year for an age-bracketed
//! number of years. Overlapping years are summed and every year's sum is capped at the
//! base consumption figure before the years are added up.

use crate::compensation::domain::{CompensationItem, ItemKind};
use crate::compensation::format::{fixed2, money};
use crate::compensation::parser::{parse_dependents, SpecParse};
use crate::compensation::standards::ComputationStandards;
use crate::compensation::years::dependent_years;
use rust_decimal::Decimal;
use tracing::warn;

struct Entitlement {
    age: u32,
    years: u32,
    annual: Decimal,
}

/// `coefficient` is the resolved disability coefficient; it is ignored on death.
pub fn dependent_living_expense(
    spec: &str,
    coefficient: Decimal,
    is_death: bool,
    standards: &ComputationStandards,
) -> CompensationItem {
    let kind = ItemKind::DependentLivingExpense;
    let dependents = match parse_dependents(spec) {
        SpecParse::Empty => {
            return CompensationItem::zero(kind, "未填写被扶养人信息，不计算被扶养人生活费")
        }
        SpecParse::Malformed(reason) => {
            warn!(spec, %reason, "dependent list unreadable, living expense not computed");
            return CompensationItem::zero(kind, format!("被扶养人信息格式错误（{reason}）"));
        }
        SpecParse::Parsed(dependents) => dependents,
    };

    let base = standards.consumption;
    let mut narrative = format!(
        "广西上一年度城镇居民人均消费支出：{}元/年\n",
        money(base)
    );

    let mut entitlements = Vec::with_capacity(dependents.len());
    for (idx, dependent) in dependents.iter().enumerate() {
        let (years, bracket) = dependent_years(dependent.age);
        if years == 0 {
            continue;
        }
        let support_count = dependent.support_count.max(1);
        let annual = base / Decimal::from(support_count);
        narrative.push_str(&format!(
            "被扶养人{}：{}岁，{bracket}，扶养人数{support_count}人\n年生活费 = {} ÷ {support_count} = {}元/年\n",
            idx + 1,
            dependent.age,
            money(base),
            money(annual)
        ));
        entitlements.push(Entitlement {
            age: dependent.age,
            years,
            annual,
        });
    }

    let Some(max_years) = entitlements.iter().map(|e| e.years).max() else {
        return CompensationItem::zero(kind, "被扶养人信息无效");
    };

    let mut year_lines = Vec::new();
    let mut year_amounts = Vec::new();
    let mut subtotal = Decimal::ZERO;
    for year in 0..max_years {
        let active: Vec<&Entitlement> = entitlements.iter().filter(|e| year < e.years).collect();
        let uncapped: Decimal = active.iter().map(|e| e.annual).sum();
        let capped = uncapped.min(base);
        if capped <= Decimal::ZERO {
            continue;
        }
        subtotal += capped;
        year_amounts.push(money(capped));

        let ages = active
            .iter()
            .map(|e| format!("{}岁", e.age))
            .collect::<Vec<_>>()
            .join("+");
        if uncapped > base {
            year_lines.push(format!(
                "第{}年：{ages}的年生活费合计{}元，超过{}元，按{}元计算",
                year + 1,
                money(uncapped),
                money(base),
                money(base)
            ));
        } else {
            year_lines.push(format!("第{}年：{ages}的年生活费合计{}元", year + 1, money(capped)));
        }
    }

    let formula = if year_amounts.is_empty() {
        "0".to_string()
    } else {
        year_amounts.join(" + ")
    };
    narrative.push_str("\n按年计算明细：\n");
    narrative.push_str(&year_lines.join("\n"));

    let amount = if is_death {
        narrative.push_str(&format!(
            "\n\n小计 = {formula} = {}元\n受害人死亡，系数为100%（无需乘以伤残系数）\n被扶养人生活费 = 小计 × 100% = {} × 1.0 = {}元",
            money(subtotal),
            money(subtotal),
            money(subtotal)
        ));
        subtotal
    } else if coefficient < Decimal::ONE {
        let amount = subtotal * coefficient;
        narrative.push_str(&format!(
            "\n\n小计 = {formula} = {}元\n伤残系数：{}\n被扶养人生活费 = 小计 × 伤残系数 = {} × {} = {}元",
            money(subtotal),
            fixed2(coefficient),
            money(subtotal),
            fixed2(coefficient),
            money(amount)
        ));
        amount
    } else {
        let amount = subtotal * coefficient;
        narrative.push_str(&format!("\n\n总计 = {formula} = {}元", money(amount)));
        amount
    };

    CompensationItem::new(kind, amount, narrative)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standards() -> ComputationStandards {
        ComputationStandards::guangxi_2025()
    }

    #[test]
    fn overlapping_years_are_capped_at_base_consumption() {
        let item = dependent_living_expense("10,1;70,2", Decimal::ONE, false, &standards());
        assert_eq!(item.amount, Decimal::from(234754));
        assert!(item
            .narrative
            .contains("第1年：10岁+70岁的年生活费合计39,126.00元，超过26,084.00元，按26,084.00元计算"));
        assert!(item.narrative.contains("第9年：70岁的年生活费合计13,042.00元"));
        assert!(item.narrative.contains("总计 = 26,084.00 + "));
        assert!(!item.narrative.contains("第11年"));
    }

    #[test]
    fn disability_coefficient_scales_the_subtotal() {
        let item = dependent_living_expense("16", Decimal::new(6, 1), false, &standards());
        // two years at 26084, times 0.6
        assert_eq!(item.amount, Decimal::new(3130080, 2));
        assert!(item.narrative.contains("伤残系数：0.60"));
    }

    #[test]
    fn death_bypasses_the_coefficient_and_says_so() {
        let item = dependent_living_expense("16", Decimal::new(6, 1), true, &standards());
        assert_eq!(item.amount, Decimal::from(52168));
        assert!(item.narrative.contains("受害人死亡，系数为100%（无需乘以伤残系数）"));
        assert!(!item.narrative.contains("伤残系数："));
    }

    #[test]
    fn shared_support_splits_the_annual_amount() {
        let item = dependent_living_expense("80,4", Decimal::ONE, false, &standards());
        assert_eq!(item.amount, Decimal::from(32605));
        assert!(item.narrative.contains("26,084.00 ÷ 4 = 6,521.00元/年"));
    }

    #[test]
    fn blank_and_malformed_lists_yield_zero() {
        let blank = dependent_living_expense("  ", Decimal::ONE, false, &standards());
        assert_eq!(blank.amount, Decimal::ZERO);
        assert!(blank.narrative.contains("未填写被扶养人信息"));

        let malformed = dependent_living_expense("abc,1", Decimal::ONE, false, &standards());
        assert_eq!(malformed.amount, Decimal::ZERO);
        assert!(malformed.narrative.starts_with("被扶养人信息格式错误"));
    }

    #[test]
    fn alternate_schedule_changes_the_cap() {
        let table = ComputationStandards {
            consumption: Decimal::from(10000),
            ..standards()
        };
        let item = dependent_living_expense("17;17", Decimal::ONE, false, &table);
        assert_eq!(item.amount, Decimal::from(10000));
    }
}
