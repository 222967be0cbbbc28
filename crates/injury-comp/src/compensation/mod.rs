//! Statutory compensation engine.
//!
//! `compute` is the single entry point: it takes a normalized [`CaseInput`] and the
//! schedule's [`ComputationStandards`] and returns every compensation item in canonical
//! order together with the total. The engine never fails; malformed free text degrades
//! to a zero amount (or the no-disability coefficient) and says so in the narrative.

mod aggregate;
pub mod calculators;
pub mod disability;
pub mod domain;
pub mod format;
pub mod normalizer;
pub mod parser;
pub mod standards;
pub mod years;

pub use aggregate::aggregate;
pub use disability::{resolve_disability, DisabilityOutcome, DisabilityResolution};
pub use domain::{
    CaseInput, CaseSubmission, CompensationItem, ComputationResult, ItemKind, NursingMode,
    WorkIncome,
};
pub use standards::ComputationStandards;

use tracing::debug;

/// Runs every calculator for one case and aggregates the results.
pub fn compute(input: &CaseInput, standards: &ComputationStandards) -> ComputationResult {
    let disability = resolve_disability(&input.disability_level_spec, standards);
    debug!(
        coefficient = %disability.final_coefficient,
        primary_level = ?disability.primary_level,
        outcome = ?disability.outcome,
        "resolved disability coefficient"
    );

    let mut items = Vec::with_capacity(ItemKind::ordered().len());
    for kind in ItemKind::ordered() {
        let item = calculators::calculate(kind, input, &disability, standards);
        debug!(item = kind.label(), amount = %item.amount, "computed compensation item");
        items.push(item);
    }

    aggregate(input, items)
}
