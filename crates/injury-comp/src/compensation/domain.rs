use super::normalizer::{count_or, flag, integer_or, non_negative_decimal_or, text_or};
use super::standards::{ComputationStandards, FALLBACK_INDUSTRY};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name shown when the victim's name was left blank.
pub const UNNAMED_VICTIM: &str = "未填写";

/// Raw case record as submitted by a form or API client.
///
/// Every field is an arbitrary JSON value; [`CaseInput::from_submission`] decides
/// what is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseSubmission {
    pub victim_name: Option<Value>,
    pub victim_age: Option<Value>,
    pub medical_expense: Option<Value>,
    pub follow_up_treatment_fee: Option<Value>,
    pub hospital_days: Option<Value>,
    pub meal_subsidy: Option<Value>,
    pub nutrition_fee: Option<Value>,
    pub traffic_fee: Option<Value>,
    pub accommodation_days: Option<Value>,
    pub work_loss_days: Option<Value>,
    pub work_income_type: Option<Value>,
    pub monthly_income: Option<Value>,
    pub avg_daily_income: Option<Value>,
    pub industry_type: Option<Value>,
    pub nursing_days: Option<Value>,
    pub nursing_count: Option<Value>,
    pub nursing_type: Option<Value>,
    pub nursing_income: Option<Value>,
    pub disability_level: Option<Value>,
    pub disability_appliance_fee: Option<Value>,
    pub dependent_info: Option<Value>,
    pub is_death: Option<Value>,
    pub mental_damage: Option<Value>,
}

/// How lost working income is established.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WorkIncome {
    Fixed { monthly_income: Decimal },
    ProvenAverage { avg_daily_income: Decimal },
    IndustryAverage { industry: String },
}

impl WorkIncome {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Fixed { .. } => "固定收入",
            Self::ProvenAverage { .. } => "无固定收入（能证明最近三年平均）",
            Self::IndustryAverage { .. } => "无固定收入（不能证明，参照行业平均）",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NursingMode {
    HasIncome { daily_income: Decimal },
    NoIncomeOrHired,
}

/// Normalized, immutable case facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInput {
    pub victim_name: String,
    pub victim_age: u32,
    pub medical_expense: Decimal,
    pub follow_up_treatment_fee: Decimal,
    pub nutrition_fee: Decimal,
    pub traffic_fee: Decimal,
    pub mental_damage: Decimal,
    pub disability_appliance_fee: Decimal,
    pub hospital_days: u32,
    pub meal_subsidy_per_day: Decimal,
    pub accommodation_days: u32,
    pub work_loss_days: u32,
    pub work_income: WorkIncome,
    pub nursing_days: u32,
    pub nursing_count: u32,
    pub nursing: NursingMode,
    pub disability_level_spec: String,
    pub dependent_spec: String,
    pub is_death: bool,
}

impl CaseInput {
    /// A case with nothing claimed, used as a base for struct updates.
    pub fn empty(standards: &ComputationStandards) -> Self {
        Self {
            victim_name: UNNAMED_VICTIM.to_string(),
            victim_age: 0,
            medical_expense: Decimal::ZERO,
            follow_up_treatment_fee: Decimal::ZERO,
            nutrition_fee: Decimal::ZERO,
            traffic_fee: Decimal::ZERO,
            mental_damage: Decimal::ZERO,
            disability_appliance_fee: Decimal::ZERO,
            hospital_days: 0,
            meal_subsidy_per_day: standards.daily_meal_subsidy,
            accommodation_days: 0,
            work_loss_days: 0,
            work_income: WorkIncome::Fixed {
                monthly_income: Decimal::ZERO,
            },
            nursing_days: 0,
            nursing_count: 1,
            nursing: NursingMode::NoIncomeOrHired,
            disability_level_spec: String::new(),
            dependent_spec: String::new(),
            is_death: false,
        }
    }

    pub fn from_submission(raw: &CaseSubmission, standards: &ComputationStandards) -> Self {
        let zero = Decimal::ZERO;
        let work_income = match income_mode(raw.work_income_type.as_ref()) {
            IncomeMode::Fixed => WorkIncome::Fixed {
                monthly_income: non_negative_decimal_or(raw.monthly_income.as_ref(), zero),
            },
            IncomeMode::ProvenAverage => WorkIncome::ProvenAverage {
                avg_daily_income: non_negative_decimal_or(raw.avg_daily_income.as_ref(), zero),
            },
            IncomeMode::IndustryAverage => WorkIncome::IndustryAverage {
                industry: text_or(raw.industry_type.as_ref(), FALLBACK_INDUSTRY),
            },
        };

        let nursing = if has_income(raw.nursing_type.as_ref()) {
            NursingMode::HasIncome {
                daily_income: non_negative_decimal_or(raw.nursing_income.as_ref(), zero),
            }
        } else {
            NursingMode::NoIncomeOrHired
        };

        let victim_age = integer_or(raw.victim_age.as_ref(), 0).clamp(0, i64::from(u32::MAX));

        Self {
            victim_name: text_or(raw.victim_name.as_ref(), UNNAMED_VICTIM),
            victim_age: u32::try_from(victim_age).unwrap_or(0),
            medical_expense: non_negative_decimal_or(raw.medical_expense.as_ref(), zero),
            follow_up_treatment_fee: non_negative_decimal_or(
                raw.follow_up_treatment_fee.as_ref(),
                zero,
            ),
            nutrition_fee: non_negative_decimal_or(raw.nutrition_fee.as_ref(), zero),
            traffic_fee: non_negative_decimal_or(raw.traffic_fee.as_ref(), zero),
            mental_damage: non_negative_decimal_or(raw.mental_damage.as_ref(), zero),
            disability_appliance_fee: non_negative_decimal_or(
                raw.disability_appliance_fee.as_ref(),
                zero,
            ),
            hospital_days: count_or(raw.hospital_days.as_ref(), 0),
            meal_subsidy_per_day: non_negative_decimal_or(
                raw.meal_subsidy.as_ref(),
                standards.daily_meal_subsidy,
            ),
            accommodation_days: count_or(raw.accommodation_days.as_ref(), 0),
            work_loss_days: count_or(raw.work_loss_days.as_ref(), 0),
            work_income,
            nursing_days: count_or(raw.nursing_days.as_ref(), 0),
            nursing_count: count_or(raw.nursing_count.as_ref(), 1).max(1),
            nursing,
            disability_level_spec: text_or(raw.disability_level.as_ref(), ""),
            dependent_spec: text_or(raw.dependent_info.as_ref(), ""),
            is_death: flag(raw.is_death.as_ref()),
        }
    }
}

enum IncomeMode {
    Fixed,
    ProvenAverage,
    IndustryAverage,
}

fn income_mode(value: Option<&Value>) -> IncomeMode {
    let raw = text_or(value, "");
    match raw.as_str() {
        "无固定收入（能证明最近三年平均）" | "proven_average" => IncomeMode::ProvenAverage,
        "无固定收入（不能证明，参照行业平均）" | "industry_average" => {
            IncomeMode::IndustryAverage
        }
        _ => IncomeMode::Fixed,
    }
}

fn has_income(value: Option<&Value>) -> bool {
    matches!(text_or(value, "").as_str(), "有收入" | "has_income")
}

/// Compensation categories in the schedule's canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    MedicalExpense,
    FollowUpTreatment,
    WorkLoss,
    Nursing,
    Traffic,
    Accommodation,
    HospitalMealSubsidy,
    Nutrition,
    DisabilityCompensation,
    DisabilityAppliance,
    DependentLivingExpense,
    DeathCompensation,
    FuneralExpense,
    MentalDamage,
}

impl ItemKind {
    pub const fn ordered() -> [Self; 14] {
        [
            Self::MedicalExpense,
            Self::FollowUpTreatment,
            Self::WorkLoss,
            Self::Nursing,
            Self::Traffic,
            Self::Accommodation,
            Self::HospitalMealSubsidy,
            Self::Nutrition,
            Self::DisabilityCompensation,
            Self::DisabilityAppliance,
            Self::DependentLivingExpense,
            Self::DeathCompensation,
            Self::FuneralExpense,
            Self::MentalDamage,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MedicalExpense => "医疗费",
            Self::FollowUpTreatment => "后续治疗费",
            Self::WorkLoss => "误工费",
            Self::Nursing => "护理费",
            Self::Traffic => "交通费",
            Self::Accommodation => "住宿费",
            Self::HospitalMealSubsidy => "住院伙食补助费",
            Self::Nutrition => "营养费",
            Self::DisabilityCompensation => "残疾赔偿金",
            Self::DisabilityAppliance => "残疾辅助器具费",
            Self::DependentLivingExpense => "被扶养人生活费",
            Self::DeathCompensation => "死亡赔偿金",
            Self::FuneralExpense => "丧葬费",
            Self::MentalDamage => "精神损害抚慰金",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompensationItem {
    pub kind: ItemKind,
    pub name: &'static str,
    pub amount: Decimal,
    pub narrative: String,
}

impl CompensationItem {
    pub fn new(kind: ItemKind, amount: Decimal, narrative: impl Into<String>) -> Self {
        Self {
            kind,
            name: kind.label(),
            amount,
            narrative: narrative.into(),
        }
    }

    pub fn zero(kind: ItemKind, narrative: impl Into<String>) -> Self {
        Self::new(kind, Decimal::ZERO, narrative)
    }

    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// Sole output of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputationResult {
    pub items: Vec<CompensationItem>,
    pub total: Decimal,
    pub total_narrative: String,
    pub victim_name: String,
    pub victim_age: u32,
}

impl ComputationResult {
    pub fn item(&self, kind: ItemKind) -> Option<&CompensationItem> {
        self.items.iter().find(|item| item.kind == kind)
    }

    pub fn amount(&self, kind: ItemKind) -> Decimal {
        self.item(kind).map(|item| item.amount).unwrap_or(Decimal::ZERO)
    }

    pub fn positive_items(&self) -> impl Iterator<Item = &CompensationItem> {
        self.items.iter().filter(|item| item.is_positive())
    }

    pub fn victim_named(&self) -> bool {
        self.victim_name != UNNAMED_VICTIM
    }
}
