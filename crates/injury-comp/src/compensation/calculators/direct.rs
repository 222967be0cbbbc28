use crate::compensation::domain::{CaseInput, CompensationItem, ItemKind};
use crate::compensation::format::money;
use crate::compensation::standards::ComputationStandards;
use rust_decimal::Decimal;

use super::{checked_product, out_of_range};

/// Items claimed as a single receipted amount.
pub fn pass_through(kind: ItemKind, amount: Decimal) -> CompensationItem {
    let narrative = match kind {
        ItemKind::MedicalExpense => {
            format!("医疗费 = 诊疗费 + 医药费 + 住院费 = {}元", money(amount))
        }
        _ => format!("{} = {}元", kind.label(), money(amount)),
    };
    CompensationItem::new(kind, amount, narrative)
}

pub fn hospital_meal_subsidy(input: &CaseInput) -> CompensationItem {
    let days = Decimal::from(input.hospital_days);
    let Some(amount) = checked_product(&[days, input.meal_subsidy_per_day]) else {
        return out_of_range(ItemKind::HospitalMealSubsidy);
    };
    let narrative = format!(
        "住院天数：{}天\n补助标准：{}元/天\n住院伙食补助费 = 住院天数 × 补助标准 = {} × {} = {}元",
        input.hospital_days,
        money(input.meal_subsidy_per_day),
        input.hospital_days,
        money(input.meal_subsidy_per_day),
        money(amount)
    );
    CompensationItem::new(ItemKind::HospitalMealSubsidy, amount, narrative)
}

pub fn accommodation(input: &CaseInput, standards: &ComputationStandards) -> CompensationItem {
    let rate = standards.daily_accommodation_fee;
    let Some(amount) = checked_product(&[Decimal::from(input.accommodation_days), rate]) else {
        return out_of_range(ItemKind::Accommodation);
    };
    let narrative = format!(
        "住宿天数：{}天\n住宿费标准：{}元/天\n住宿费 = 住宿天数 × 住宿费标准 = {} × {} = {}元",
        input.accommodation_days,
        money(rate),
        input.accommodation_days,
        money(rate),
        money(amount)
    );
    CompensationItem::new(ItemKind::Accommodation, amount, narrative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_subsidy_multiplies_days_by_rate() {
        let standards = ComputationStandards::guangxi_2025();
        let input = CaseInput {
            hospital_days: 10,
            ..CaseInput::empty(&standards)
        };
        let item = hospital_meal_subsidy(&input);
        assert_eq!(item.amount, Decimal::from(1000));
        assert!(item.narrative.ends_with("10 × 100.00 = 1,000.00元"));
    }

    #[test]
    fn meal_subsidy_past_decimal_range_is_zero() {
        let standards = ComputationStandards::guangxi_2025();
        let input = CaseInput {
            hospital_days: 2,
            meal_subsidy_per_day: Decimal::MAX,
            ..CaseInput::empty(&standards)
        };
        let item = hospital_meal_subsidy(&input);
        assert_eq!(item.amount, Decimal::ZERO);
        assert_eq!(
            item.narrative,
            "住院伙食补助费计算结果超出可计算范围，不计算住院伙食补助费"
        );
    }

    #[test]
    fn accommodation_uses_fixed_rate() {
        let standards = ComputationStandards::guangxi_2025();
        let input = CaseInput {
            accommodation_days: 3,
            ..CaseInput::empty(&standards)
        };
        assert_eq!(accommodation(&input, &standards).amount, Decimal::from(990));
    }

    #[test]
    fn pass_through_copies_amount() {
        let item = pass_through(ItemKind::MentalDamage, Decimal::from(5000));
        assert_eq!(item.amount, Decimal::from(5000));
        assert_eq!(item.name, "精神损害抚慰金");
        assert_eq!(item.narrative, "精神损害抚慰金 = 5,000.00元");
    }
}
