//! Multi-disability coefficient resolution.
//!
//! The most severe injury (lowest level number) sets the base coefficient. Every other
//! injury, including repeats of the most severe level, adds `coefficient × rate` to an
//! additional index whose sum is capped before it is added to the base. Level 1 is
//! already full disability and short-circuits to 1.0.

use super::format::{fixed2, percent};
use super::parser::{parse_disability_levels, SpecParse};
use super::standards::ComputationStandards;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabilityOutcome {
    /// Blank input or the "none" token.
    NoDisability,
    /// Input present but not parseable; treated as no disability.
    FormatError,
    /// Input held only separators.
    NoValidLevels,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisabilityResolution {
    pub final_coefficient: Decimal,
    pub primary_level: Option<u8>,
    pub additional_index: Decimal,
    pub outcome: DisabilityOutcome,
    pub narrative: String,
}

impl DisabilityResolution {
    fn without_levels(outcome: DisabilityOutcome, narrative: impl Into<String>) -> Self {
        Self {
            final_coefficient: Decimal::ONE,
            primary_level: None,
            additional_index: Decimal::ZERO,
            outcome,
            narrative: narrative.into(),
        }
    }

    /// Whether at least one level was parsed. The coefficient alone cannot answer
    /// this because "no disability" also resolves to 1.0.
    pub fn has_disability(&self) -> bool {
        self.primary_level.is_some()
    }
}

struct Contribution {
    level: u8,
    count: u32,
    coefficient: Decimal,
    per_occurrence: Decimal,
    total: Decimal,
}

pub fn resolve_disability(spec: &str, standards: &ComputationStandards) -> DisabilityResolution {
    let levels = match parse_disability_levels(spec) {
        SpecParse::Empty => {
            return DisabilityResolution::without_levels(
                DisabilityOutcome::NoDisability,
                "无伤残，系数为1.0",
            )
        }
        SpecParse::Malformed(reason) => {
            warn!(spec, %reason, "disability levels unreadable, treating as no disability");
            return DisabilityResolution::without_levels(
                DisabilityOutcome::FormatError,
                format!("伤残等级格式错误（{reason}），按无伤残处理"),
            );
        }
        SpecParse::Parsed(levels) if levels.is_empty() => {
            return DisabilityResolution::without_levels(
                DisabilityOutcome::NoValidLevels,
                "无有效伤残等级，系数为1.0",
            )
        }
        SpecParse::Parsed(levels) => levels,
    };

    let mut counts: BTreeMap<u8, u32> = BTreeMap::new();
    for level in levels {
        *counts.entry(level).or_default() += 1;
    }

    let display_levels = counts
        .iter()
        .map(|(level, count)| {
            if *count == 1 {
                format!("{level}级")
            } else {
                format!("{level}级×{count}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let mut narrative = format!("伤残等级：{display_levels}\n");

    // counts is non-empty here, the first key is the lowest level
    let primary_level = counts.keys().next().copied().unwrap_or(1);
    let primary_coefficient = coefficient(standards, primary_level);

    if primary_level == 1 {
        narrative.push_str("最高伤残等级：1级，系数：1.00（100%）\n");
        narrative.push_str("1级伤残系数为100%，无需附加指数\n");
        narrative.push_str("最终伤残系数 = 1.00（100%）");
        return DisabilityResolution {
            final_coefficient: Decimal::ONE,
            primary_level: Some(1),
            additional_index: Decimal::ZERO,
            outcome: DisabilityOutcome::Resolved,
            narrative,
        };
    }

    narrative.push_str(&format!(
        "最高伤残等级：{primary_level}级，系数：{}\n",
        fixed2(primary_coefficient)
    ));

    let contributions: Vec<Contribution> = counts
        .iter()
        .filter_map(|(&level, &count)| {
            let extra = if level == primary_level { count - 1 } else { count };
            if extra == 0 {
                return None;
            }
            let level_coefficient = coefficient(standards, level);
            let per_occurrence = level_coefficient * standards.additional_index_rate;
            Some(Contribution {
                level,
                count: extra,
                coefficient: level_coefficient,
                per_occurrence,
                total: per_occurrence * Decimal::from(extra),
            })
        })
        .collect();

    let mut additional_index = Decimal::ZERO;
    if contributions.is_empty() {
        narrative.push_str("无附加伤残等级\n");
    } else {
        let described = contributions
            .iter()
            .map(|c| {
                if c.count == 1 {
                    format!(
                        "{}级（赔偿系数{}，附加{}）",
                        c.level,
                        fixed2(c.coefficient),
                        percent(c.per_occurrence)
                    )
                } else {
                    format!(
                        "{}级×{}（赔偿系数{}，每处附加{}，合计{}）",
                        c.level,
                        c.count,
                        fixed2(c.coefficient),
                        percent(c.per_occurrence),
                        percent(c.total)
                    )
                }
            })
            .collect::<Vec<_>>()
            .join("、");
        narrative.push_str("附加伤残等级：");
        narrative.push_str(&described);

        let uncapped: Decimal = contributions.iter().map(|c| c.total).sum();
        additional_index = uncapped.min(standards.additional_index_cap);
        if uncapped > standards.additional_index_cap {
            narrative.push_str(&format!(
                "\n附加指数合计：{}，超过{}上限，按{}计算\n",
                percent(uncapped),
                percent(standards.additional_index_cap),
                percent(standards.additional_index_cap)
            ));
        } else {
            narrative.push_str(&format!("\n附加指数合计：{}\n", percent(additional_index)));
        }
    }

    let final_coefficient = (primary_coefficient + additional_index).min(Decimal::ONE);
    narrative.push_str(&format!(
        "最终伤残系数 = {} + {} = {}",
        fixed2(primary_coefficient),
        fixed2(additional_index),
        fixed2(final_coefficient)
    ));
    if final_coefficient >= Decimal::ONE {
        narrative.push_str("（已达到100%上限）");
    }

    DisabilityResolution {
        final_coefficient,
        primary_level: Some(primary_level),
        additional_index,
        outcome: DisabilityOutcome::Resolved,
        narrative,
    }
}

fn coefficient(standards: &ComputationStandards, level: u8) -> Decimal {
    standards.coefficient(level).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(spec: &str) -> DisabilityResolution {
        resolve_disability(spec, &ComputationStandards::guangxi_2025())
    }

    #[test]
    fn none_and_blank_resolve_to_full_multiplier_without_level() {
        for spec in ["无", ""] {
            let resolution = resolve(spec);
            assert_eq!(resolution.final_coefficient, Decimal::ONE);
            assert_eq!(resolution.primary_level, None);
            assert_eq!(resolution.additional_index, Decimal::ZERO);
            assert_eq!(resolution.outcome, DisabilityOutcome::NoDisability);
            assert!(!resolution.has_disability());
        }
    }

    #[test]
    fn level_one_short_circuits() {
        let resolution = resolve("1级,5级,5级");
        assert_eq!(resolution.final_coefficient, Decimal::ONE);
        assert_eq!(resolution.primary_level, Some(1));
        assert_eq!(resolution.additional_index, Decimal::ZERO);
        assert!(resolution.narrative.contains("无需附加指数"));
    }

    #[test]
    fn repeated_primary_level_adds_its_own_share() {
        let resolution = resolve("5级,5级");
        assert_eq!(resolution.primary_level, Some(5));
        assert_eq!(resolution.additional_index, Decimal::new(6, 2));
        assert_eq!(resolution.final_coefficient, Decimal::new(66, 2));
        assert!(resolution.narrative.contains("5级×2"));
        assert!(resolution.narrative.contains("0.60 + 0.06 = 0.66"));
    }

    #[test]
    fn companion_levels_add_proportional_index() {
        let resolution = resolve("5级,8级");
        assert_eq!(resolution.primary_level, Some(5));
        assert_eq!(resolution.additional_index, Decimal::new(3, 2));
        assert_eq!(resolution.final_coefficient, Decimal::new(63, 2));
        assert!(resolution.narrative.contains("8级（赔偿系数0.30，附加3.00%）"));
    }

    #[test]
    fn summed_index_is_capped_not_per_level() {
        let resolution = resolve("2级,3级,4级,5级,6级");
        assert_eq!(resolution.primary_level, Some(2));
        assert_eq!(resolution.additional_index, Decimal::new(10, 2));
        assert_eq!(resolution.final_coefficient, Decimal::ONE);
        assert!(resolution.narrative.contains("超过10.00%上限"));
        assert!(resolution.narrative.contains("已达到100%上限"));
    }

    #[test]
    fn cap_applies_below_full_coefficient() {
        let resolution = resolve("6级,6级,7级,8级");
        // 0.05 + 0.04 + 0.03 = 0.12, capped to 0.10
        assert_eq!(resolution.additional_index, Decimal::new(10, 2));
        assert_eq!(resolution.final_coefficient, Decimal::new(60, 2));
    }

    #[test]
    fn malformed_input_degrades_to_no_disability() {
        let resolution = resolve("5级,12级");
        assert_eq!(resolution.outcome, DisabilityOutcome::FormatError);
        assert_eq!(resolution.final_coefficient, Decimal::ONE);
        assert!(!resolution.has_disability());
        assert!(resolution.narrative.contains("格式错误"));
    }

    #[test]
    fn separators_only_report_no_valid_levels() {
        let resolution = resolve("，；");
        assert_eq!(resolution.outcome, DisabilityOutcome::NoValidLevels);
        assert!(resolution.narrative.contains("无有效伤残等级"));
    }

    #[test]
    fn single_level_has_no_additional_index() {
        let resolution = resolve("10级");
        assert_eq!(resolution.final_coefficient, Decimal::new(1, 1));
        assert!(resolution.narrative.contains("无附加伤残等级"));
    }
}
