use crate::compensation::format::{money, round_cents};
use crate::compensation::{ComputationResult, ItemKind};
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Key under which the grand total appears in the label maps.
pub const TOTAL_LABEL: &str = "总计";

#[derive(Debug, Clone, serde::Serialize)]
pub struct ItemView {
    pub kind: ItemKind,
    pub name: &'static str,
    /// Rounded to cents for display.
    pub amount: Decimal,
    pub amount_display: String,
    pub narrative: String,
}

/// Transport form of a result: label maps for form clients plus the ordered items.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CalculationView {
    pub success: bool,
    pub results: AmountsByLabel,
    pub details: NarrativesByLabel,
    pub items: Vec<ItemView>,
    pub total: Decimal,
    pub total_display: String,
    pub total_narrative: String,
    pub victim_name: String,
    pub victim_age: u32,
}

impl CalculationView {
    pub fn from_result(result: &ComputationResult) -> Self {
        let items: Vec<ItemView> = result
            .items
            .iter()
            .map(|item| ItemView {
                kind: item.kind,
                name: item.name,
                amount: round_cents(item.amount),
                amount_display: money(item.amount),
                narrative: item.narrative.clone(),
            })
            .collect();
        let total = round_cents(result.total);

        Self {
            success: true,
            results: AmountsByLabel {
                entries: items.iter().map(|item| (item.name, item.amount)).collect(),
                total,
            },
            details: NarrativesByLabel {
                entries: items
                    .iter()
                    .map(|item| (item.name, item.narrative.clone()))
                    .collect(),
                total: result.total_narrative.clone(),
            },
            items,
            total,
            total_display: money(result.total),
            total_narrative: result.total_narrative.clone(),
            victim_name: result.victim_name.clone(),
            victim_age: result.victim_age,
        }
    }
}

/// `{label: amount}` in canonical order, ending with the total.
#[derive(Debug, Clone)]
pub struct AmountsByLabel {
    entries: Vec<(&'static str, Decimal)>,
    total: Decimal,
}

impl Serialize for AmountsByLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;
        for (label, amount) in &self.entries {
            map.serialize_entry(label, amount)?;
        }
        map.serialize_entry(TOTAL_LABEL, &self.total)?;
        map.end()
    }
}

/// `{label: narrative}` in canonical order, ending with the total's derivation.
#[derive(Debug, Clone)]
pub struct NarrativesByLabel {
    entries: Vec<(&'static str, String)>,
    total: String,
}

impl Serialize for NarrativesByLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;
        for (label, narrative) in &self.entries {
            map.serialize_entry(label, narrative)?;
        }
        map.serialize_entry(TOTAL_LABEL, &self.total)?;
        map.end()
    }
}
