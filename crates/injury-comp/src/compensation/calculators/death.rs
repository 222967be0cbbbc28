use crate::compensation::domain::{CaseInput, CompensationItem, ItemKind};
use crate::compensation::format::money;
use crate::compensation::standards::ComputationStandards;
use crate::compensation::years::{compensation_years, compensation_years_description};
use rust_decimal::Decimal;

use super::{checked_product, out_of_range};

pub fn death_compensation(input: &CaseInput, standards: &ComputationStandards) -> CompensationItem {
    let kind = ItemKind::DeathCompensation;
    if !input.is_death {
        return CompensationItem::zero(kind, "受害人未死亡，不计算死亡赔偿金");
    }
    let base = standards.disposable_income;
    let years = compensation_years(input.victim_age);
    let Some(amount) = checked_product(&[base, Decimal::from(years)]) else {
        return out_of_range(kind);
    };
    let narrative = format!(
        "广西上一年度城镇居民人均可支配收入：{}元/年\n赔偿年限：{}\n死亡赔偿金 = 广西上一年度城镇居民人均可支配收入 × 赔偿年限 = {} × {years} = {}元",
        money(base),
        compensation_years_description(input.victim_age),
        money(base),
        money(amount)
    );
    CompensationItem::new(kind, amount, narrative)
}

pub fn funeral_expense(input: &CaseInput, standards: &ComputationStandards) -> CompensationItem {
    let kind = ItemKind::FuneralExpense;
    if !input.is_death {
        return CompensationItem::zero(kind, "受害人未死亡，不计算丧葬费");
    }
    let amount = standards.funeral_expense;
    CompensationItem::new(kind, amount, format!("丧葬费 = {}元", money(amount)))
}
