use crate::compensation::domain::{CaseInput, CompensationItem, ItemKind, NursingMode};
use crate::compensation::format::money;
use crate::compensation::standards::ComputationStandards;
use rust_decimal::Decimal;

use super::{checked_product, out_of_range};

pub fn nursing_fee(input: &CaseInput, standards: &ComputationStandards) -> CompensationItem {
    let kind = ItemKind::Nursing;
    let days = input.nursing_days;
    let carers = input.nursing_count.max(1);
    if days == 0 {
        return CompensationItem::zero(kind, "护理天数为0，不计算护理费");
    }

    let (rate, heading, rate_label) = match &input.nursing {
        NursingMode::HasIncome { daily_income } => {
            if *daily_income <= Decimal::ZERO {
                return CompensationItem::zero(kind, "护理人员日均收入为0，不计算护理费");
            }
            (*daily_income, "护理人员有收入计算", "日均收入")
        }
        NursingMode::NoIncomeOrHired => (
            standards.daily_nursing_fee,
            "无收入或雇佣护工计算",
            "护工标准",
        ),
    };

    let Some(amount) = checked_product(&[rate, Decimal::from(days), Decimal::from(carers)]) else {
        return out_of_range(kind);
    };
    let narrative = format!(
        "{heading}：\n{rate_label}：{}元/天\n护理天数：{days}天\n护理人数：{carers}人\n护理费 = {rate_label} × 护理天数 × 护理人数 = {} × {days} × {carers} = {}元",
        money(rate),
        money(rate),
        money(amount)
    );
    CompensationItem::new(kind, amount, narrative)
}
