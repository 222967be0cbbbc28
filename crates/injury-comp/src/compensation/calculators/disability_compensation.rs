use crate::compensation::disability::DisabilityResolution;
use crate::compensation::domain::{CaseInput, CompensationItem, ItemKind};
use crate::compensation::format::{fixed2, money};
use crate::compensation::standards::ComputationStandards;
use crate::compensation::years::{compensation_years, compensation_years_description};
use rust_decimal::Decimal;

use super::{checked_product, out_of_range};

/// Applies only when at least one level was parsed and the victim survived.
pub fn disability_compensation(
    input: &CaseInput,
    disability: &DisabilityResolution,
    standards: &ComputationStandards,
) -> CompensationItem {
    let kind = ItemKind::DisabilityCompensation;
    if input.is_death {
        return CompensationItem::zero(kind, "受害人死亡，不计算残疾赔偿金");
    }
    if !disability.has_disability() {
        return CompensationItem::zero(
            kind,
            format!("{}\n未评定伤残等级，不计算残疾赔偿金", disability.narrative),
        );
    }

    let base = standards.disposable_income;
    let years = compensation_years(input.victim_age);
    let coefficient = disability.final_coefficient;
    let Some(amount) = checked_product(&[base, Decimal::from(years), coefficient]) else {
        return out_of_range(kind);
    };
    let narrative = format!(
        "{}\n广西上一年度城镇居民人均可支配收入：{}元/年\n赔偿年限：{}\n残疾赔偿金 = 广西上一年度城镇居民人均可支配收入 × 赔偿年限 × 伤残系数 = {} × {years} × {} = {}元",
        disability.narrative,
        money(base),
        compensation_years_description(input.victim_age),
        money(base),
        fixed2(coefficient),
        money(amount)
    );
    CompensationItem::new(kind, amount, narrative)
}
