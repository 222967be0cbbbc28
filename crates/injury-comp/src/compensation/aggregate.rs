use super::domain::{CaseInput, CompensationItem, ComputationResult};
use super::format::money;
use rust_decimal::Decimal;
use tracing::warn;

/// Sums every item, zero-valued ones included, and renders the total's derivation
/// from the strictly positive items.
///
/// An item that would push the total past the `Decimal` range is zeroed in place, so
/// the total always equals the sum of the returned items.
pub fn aggregate(input: &CaseInput, items: Vec<CompensationItem>) -> ComputationResult {
    let mut total = Decimal::ZERO;
    let mut summed = Vec::with_capacity(items.len());
    for item in items {
        match total.checked_add(item.amount) {
            Some(next) => {
                total = next;
                summed.push(item);
            }
            None => {
                warn!(item = item.name, amount = %item.amount, "total out of range, item left out");
                summed.push(CompensationItem::zero(
                    item.kind,
                    format!("{}金额超出可计算范围，未计入总计", item.name),
                ));
            }
        }
    }
    let items = summed;
    let positive: Vec<String> = items
        .iter()
        .filter(|item| item.is_positive())
        .map(|item| money(item.amount))
        .collect();
    let lhs = if positive.is_empty() {
        money(Decimal::ZERO)
    } else {
        positive.join(" + ")
    };

    ComputationResult {
        items,
        total,
        total_narrative: format!("总计 = {lhs} = {}元", money(total)),
        victim_name: input.victim_name.clone(),
        victim_age: input.victim_age,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compensation::domain::ItemKind;
    use crate::compensation::standards::ComputationStandards;

    #[test]
    fn zero_items_are_kept_but_left_out_of_the_narrative() {
        let input = CaseInput::empty(&ComputationStandards::guangxi_2025());
        let items = vec![
            CompensationItem::new(ItemKind::MedicalExpense, Decimal::new(1234567, 2), "a"),
            CompensationItem::zero(ItemKind::WorkLoss, "b"),
            CompensationItem::new(ItemKind::MentalDamage, Decimal::from(5000), "c"),
        ];
        let result = aggregate(&input, items);
        assert_eq!(result.items.len(), 3);
        assert_eq!(result.total, Decimal::new(1734567, 2));
        assert_eq!(
            result.total_narrative,
            "总计 = 12,345.67 + 5,000.00 = 17,345.67元"
        );
    }

    #[test]
    fn nothing_claimed_totals_zero() {
        let input = CaseInput::empty(&ComputationStandards::guangxi_2025());
        let result = aggregate(&input, vec![CompensationItem::zero(ItemKind::Traffic, "x")]);
        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.total_narrative, "总计 = 0.00 = 0.00元");
    }

    #[test]
    fn item_overflowing_the_total_is_zeroed() {
        let input = CaseInput::empty(&ComputationStandards::guangxi_2025());
        let items = vec![
            CompensationItem::new(ItemKind::MedicalExpense, Decimal::MAX, "a"),
            CompensationItem::new(ItemKind::MentalDamage, Decimal::MAX, "b"),
        ];
        let result = aggregate(&input, items);
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total, Decimal::MAX);
        assert_eq!(result.items[1].amount, Decimal::ZERO);
        assert_eq!(result.items[1].narrative, "精神损害抚慰金金额超出可计算范围，未计入总计");
        let sum: Decimal = result.items.iter().map(|item| item.amount).sum();
        assert_eq!(sum, result.total);
    }
}
