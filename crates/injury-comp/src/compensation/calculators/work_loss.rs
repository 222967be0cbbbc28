use crate::compensation::domain::{CaseInput, CompensationItem, ItemKind, WorkIncome};
use crate::compensation::format::money;
use crate::compensation::standards::ComputationStandards;
use rust_decimal::Decimal;

use super::{checked_product, out_of_range};

const DAYS_PER_MONTH: u32 = 30;
const DAYS_PER_YEAR: u32 = 365;

pub fn work_loss_fee(input: &CaseInput, standards: &ComputationStandards) -> CompensationItem {
    let kind = ItemKind::WorkLoss;
    let days = input.work_loss_days;
    if days == 0 {
        return CompensationItem::zero(kind, "误工天数为0，不计算误工费");
    }
    let day_count = Decimal::from(days);

    match &input.work_income {
        WorkIncome::Fixed { monthly_income } => {
            if *monthly_income <= Decimal::ZERO {
                return CompensationItem::zero(kind, "月收入为0，不计算误工费");
            }
            let daily = *monthly_income / Decimal::from(DAYS_PER_MONTH);
            let Some(amount) = checked_product(&[daily, day_count]) else {
                return out_of_range(kind);
            };
            let narrative = format!(
                "固定收入计算：\n月收入：{}元\n日均收入 = 月收入 ÷ 30 = {} ÷ 30 = {}元/天\n误工费 = 日均收入 × 误工天数 = {} × {} = {}元",
                money(*monthly_income),
                money(*monthly_income),
                money(daily),
                money(daily),
                days,
                money(amount)
            );
            CompensationItem::new(kind, amount, narrative)
        }
        WorkIncome::ProvenAverage { avg_daily_income } => {
            if *avg_daily_income <= Decimal::ZERO {
                return CompensationItem::zero(kind, "日均收入为0，不计算误工费");
            }
            let Some(amount) = checked_product(&[*avg_daily_income, day_count]) else {
                return out_of_range(kind);
            };
            let narrative = format!(
                "无固定收入（能证明最近三年平均）计算：\n最近三年平均日均收入：{}元/天\n误工费 = 日均收入 × 误工天数 = {} × {} = {}元",
                money(*avg_daily_income),
                money(*avg_daily_income),
                days,
                money(amount)
            );
            CompensationItem::new(kind, amount, narrative)
        }
        WorkIncome::IndustryAverage { industry } => {
            let (matched, annual) = standards.industry_salary(industry);
            let daily = annual / Decimal::from(DAYS_PER_YEAR);
            let Some(amount) = checked_product(&[daily, day_count]) else {
                return out_of_range(kind);
            };
            let fallback_note = if matched == industry.trim() {
                String::new()
            } else {
                format!("（未找到“{industry}”，按{matched}计算）")
            };
            let narrative = format!(
                "无固定收入（不能证明，参照行业平均）计算\n选择行业：{matched}{fallback_note}\n行业平均工资：{}元/年\n日均工资 = 年工资 ÷ 365 = {} ÷ 365 = {}元/天\n误工费 = 日均工资 × 误工天数 = {} × {} = {}元",
                money(annual),
                money(annual),
                money(daily),
                money(daily),
                days,
                money(amount)
            );
            CompensationItem::new(kind, amount, narrative)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(days: u32, work_income: WorkIncome) -> CaseInput {
        CaseInput {
            work_loss_days: days,
            work_income,
            ..CaseInput::empty(&ComputationStandards::guangxi_2025())
        }
    }

    #[test]
    fn zero_days_short_circuits_every_mode() {
        let standards = ComputationStandards::guangxi_2025();
        let modes = [
            WorkIncome::Fixed {
                monthly_income: Decimal::from(9000),
            },
            WorkIncome::ProvenAverage {
                avg_daily_income: Decimal::from(300),
            },
            WorkIncome::IndustryAverage {
                industry: "金融业".to_string(),
            },
        ];
        for mode in modes {
            let item = work_loss_fee(&case(0, mode), &standards);
            assert_eq!(item.amount, Decimal::ZERO);
            assert!(item.narrative.contains("误工天数为0"));
        }
    }

    #[test]
    fn fixed_income_prorates_over_thirty_days() {
        let standards = ComputationStandards::guangxi_2025();
        let item = work_loss_fee(
            &case(
                10,
                WorkIncome::Fixed {
                    monthly_income: Decimal::from(3000),
                },
            ),
            &standards,
        );
        assert_eq!(item.amount, Decimal::from(1000));
        assert!(item.narrative.contains("3,000.00 ÷ 30 = 100.00元/天"));
    }

    #[test]
    fn fixed_income_without_salary_is_zero() {
        let standards = ComputationStandards::guangxi_2025();
        let item = work_loss_fee(
            &case(
                10,
                WorkIncome::Fixed {
                    monthly_income: Decimal::ZERO,
                },
            ),
            &standards,
        );
        assert_eq!(item.amount, Decimal::ZERO);
        assert!(item.narrative.contains("月收入为0"));
    }

    #[test]
    fn proven_average_multiplies_daily_income() {
        let standards = ComputationStandards::guangxi_2025();
        let item = work_loss_fee(
            &case(
                4,
                WorkIncome::ProvenAverage {
                    avg_daily_income: Decimal::new(2505, 1),
                },
            ),
            &standards,
        );
        assert_eq!(item.amount, Decimal::from(1002));
    }

    #[test]
    fn proven_average_past_decimal_range_is_zero() {
        let standards = ComputationStandards::guangxi_2025();
        let item = work_loss_fee(
            &case(
                3,
                WorkIncome::ProvenAverage {
                    avg_daily_income: Decimal::MAX,
                },
            ),
            &standards,
        );
        assert_eq!(item.amount, Decimal::ZERO);
        assert!(item.narrative.contains("超出可计算范围"));
    }

    #[test]
    fn unknown_industry_uses_fallback_rate() {
        let standards = ComputationStandards::guangxi_2025();
        let item = work_loss_fee(
            &case(
                365,
                WorkIncome::IndustryAverage {
                    industry: "航天业".to_string(),
                },
            ),
            &standards,
        );
        assert_eq!(item.amount.round_dp(2), Decimal::from(60000));
        assert!(item.narrative.contains("按其他行业计算"));
    }
}
