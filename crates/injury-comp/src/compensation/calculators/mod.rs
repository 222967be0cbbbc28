//! One calculator per compensation category.

mod death;
mod dependents;
mod direct;
mod disability_compensation;
mod nursing;
mod work_loss;

pub use death::{death_compensation, funeral_expense};
pub use dependents::dependent_living_expense;
pub use direct::{accommodation, hospital_meal_subsidy, pass_through};
pub use disability_compensation::disability_compensation;
pub use nursing::nursing_fee;
pub use work_loss::work_loss_fee;

use super::disability::DisabilityResolution;
use super::domain::{CaseInput, CompensationItem, ItemKind};
use super::standards::ComputationStandards;
use rust_decimal::Decimal;
use tracing::warn;

/// Product of `factors`, or `None` once it leaves the range `Decimal` can hold.
pub(crate) fn checked_product(factors: &[Decimal]) -> Option<Decimal> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, factor| acc.checked_mul(*factor))
}

/// Zero item for a category whose amount cannot be represented.
pub(crate) fn out_of_range(kind: ItemKind) -> CompensationItem {
    warn!(item = kind.label(), "amount out of range, item set to zero");
    CompensationItem::zero(
        kind,
        format!("{}计算结果超出可计算范围，不计算{}", kind.label(), kind.label()),
    )
}

/// Dispatches one category to its calculator.
pub fn calculate(
    kind: ItemKind,
    input: &CaseInput,
    disability: &DisabilityResolution,
    standards: &ComputationStandards,
) -> CompensationItem {
    match kind {
        ItemKind::MedicalExpense => pass_through(kind, input.medical_expense),
        ItemKind::FollowUpTreatment => pass_through(kind, input.follow_up_treatment_fee),
        ItemKind::WorkLoss => work_loss_fee(input, standards),
        ItemKind::Nursing => nursing_fee(input, standards),
        ItemKind::Traffic => pass_through(kind, input.traffic_fee),
        ItemKind::Accommodation => accommodation(input, standards),
        ItemKind::HospitalMealSubsidy => hospital_meal_subsidy(input),
        ItemKind::Nutrition => pass_through(kind, input.nutrition_fee),
        ItemKind::DisabilityCompensation => disability_compensation(input, disability, standards),
        ItemKind::DisabilityAppliance if input.is_death => {
            CompensationItem::zero(kind, "受害人死亡，不计算残疾辅助器具费")
        }
        ItemKind::DisabilityAppliance => pass_through(kind, input.disability_appliance_fee),
        ItemKind::DependentLivingExpense => {
            let coefficient = if input.is_death {
                Decimal::ONE
            } else {
                disability.final_coefficient
            };
            dependent_living_expense(&input.dependent_spec, coefficient, input.is_death, standards)
        }
        ItemKind::DeathCompensation => death_compensation(input, standards),
        ItemKind::FuneralExpense => funeral_expense(input, standards),
        ItemKind::MentalDamage => pass_through(kind, input.mental_damage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compensation::disability::resolve_disability;

    #[test]
    fn product_stops_at_the_decimal_range() {
        assert_eq!(
            checked_product(&[Decimal::from(3), Decimal::new(25, 1)]),
            Some(Decimal::new(75, 1))
        );
        assert_eq!(checked_product(&[Decimal::MAX, Decimal::from(2)]), None);
    }

    #[test]
    fn appliance_fee_is_dropped_when_the_victim_died() {
        let standards = ComputationStandards::guangxi_2025();
        let disability = resolve_disability("无", &standards);
        let mut input = CaseInput {
            disability_appliance_fee: Decimal::from(8000),
            ..CaseInput::empty(&standards)
        };

        let item = calculate(ItemKind::DisabilityAppliance, &input, &disability, &standards);
        assert_eq!(item.amount, Decimal::from(8000));

        input.is_death = true;
        let item = calculate(ItemKind::DisabilityAppliance, &input, &disability, &standards);
        assert_eq!(item.amount, Decimal::ZERO);
        assert_eq!(item.narrative, "受害人死亡，不计算残疾辅助器具费");
    }
}
