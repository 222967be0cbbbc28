use rust_decimal::Decimal;
use serde::Serialize;

/// Key of the industry row used when a requested industry is not in the table.
pub const FALLBACK_INDUSTRY: &str = "其他行业";

/// Annual average salary for one industry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustrySalary {
    pub industry: String,
    pub annual_salary: Decimal,
}

/// Rate table published by the governing schedule.
///
/// Constructed once at startup and shared read-only; tests build alternate tables
/// with struct update syntax.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputationStandards {
    pub schedule: String,
    /// Base annual income (urban per-capita disposable income).
    pub disposable_income: Decimal,
    /// Base annual consumption (urban per-capita consumption expenditure).
    pub consumption: Decimal,
    pub daily_meal_subsidy: Decimal,
    /// Hired-carer rate used when the nursing person has no income.
    pub daily_nursing_fee: Decimal,
    pub funeral_expense: Decimal,
    pub traffic_fee_city: Decimal,
    pub daily_accommodation_fee: Decimal,
    /// Coefficients for levels 1 through 10, index 0 is level 1.
    pub disability_coefficients: [Decimal; 10],
    /// Share of a level's coefficient added per extra injury.
    pub additional_index_rate: Decimal,
    /// Ceiling applied to the summed additional index.
    pub additional_index_cap: Decimal,
    pub industry_salaries: Vec<IndustrySalary>,
    pub citations: Vec<String>,
}

impl Default for ComputationStandards {
    fn default() -> Self {
        Self::guangxi_2025()
    }
}

impl ComputationStandards {
    /// 2025 Guangxi schedule (桂高法会〔2025〕13号, industry salaries per 桂公通〔2025〕60号).
    pub fn guangxi_2025() -> Self {
        let industry_salaries = [
            ("农、林、牧、渔业", 88472),
            ("采矿业", 84319),
            ("制造业", 81668),
            ("电力、热力、燃气及水生产和供应业", 146394),
            ("建筑业", 81819),
            ("批发和零售业", 91322),
            ("交通运输、仓储和邮政业", 116278),
            ("住宿和餐饮业", 49065),
            ("信息传输、软件和信息技术服务业", 140726),
            ("金融业", 166109),
            ("房地产业", 78846),
            ("租赁和商务服务业", 74050),
            ("科学研究和技术服务业", 113638),
            ("水利、环境和公共设施管理业", 64797),
            ("居民服务、修理和其他服务业", 56848),
            ("教育", 96386),
            ("卫生和社会工作", 120902),
            ("文化、体育和娱乐业", 93209),
            ("公共管理、社会保障和社会组织", 93976),
            (FALLBACK_INDUSTRY, 60000),
        ]
        .into_iter()
        .map(|(industry, salary)| IndustrySalary {
            industry: industry.to_string(),
            annual_salary: Decimal::from(salary),
        })
        .collect();

        Self {
            schedule: "广西2025年人身损害赔偿标准".to_string(),
            disposable_income: Decimal::from(43044),
            consumption: Decimal::from(26084),
            daily_meal_subsidy: Decimal::from(100),
            daily_nursing_fee: Decimal::new(1579, 1),
            funeral_expense: Decimal::from(49434),
            traffic_fee_city: Decimal::from(30),
            daily_accommodation_fee: Decimal::from(330),
            disability_coefficients: [
                Decimal::ONE,
                Decimal::new(9, 1),
                Decimal::new(8, 1),
                Decimal::new(7, 1),
                Decimal::new(6, 1),
                Decimal::new(5, 1),
                Decimal::new(4, 1),
                Decimal::new(3, 1),
                Decimal::new(2, 1),
                Decimal::new(1, 1),
            ],
            additional_index_rate: Decimal::new(10, 2),
            additional_index_cap: Decimal::new(10, 2),
            industry_salaries,
            citations: vec![
                "《广西壮族自治区道路交通事故损害赔偿项目及计算标准》（桂高法会〔2025〕13号）"
                    .to_string(),
                "《广西壮族自治区公安厅关于道路交通事故处理有关问题的通知》（桂公通〔2025〕60号）"
                    .to_string(),
            ],
        }
    }

    /// Coefficient for a disability level; `None` outside 1..=10.
    pub fn coefficient(&self, level: u8) -> Option<Decimal> {
        if (1..=10).contains(&level) {
            Some(self.disability_coefficients[usize::from(level - 1)])
        } else {
            None
        }
    }

    /// Resolves an industry key to its table row, falling back to the
    /// "other industries" row for unknown keys.
    pub fn industry_salary(&self, industry: &str) -> (&str, Decimal) {
        let wanted = industry.trim();
        if let Some(row) = self
            .industry_salaries
            .iter()
            .find(|row| row.industry == wanted)
        {
            return (row.industry.as_str(), row.annual_salary);
        }

        match self
            .industry_salaries
            .iter()
            .find(|row| row.industry == FALLBACK_INDUSTRY)
        {
            Some(row) => (row.industry.as_str(), row.annual_salary),
            None => (FALLBACK_INDUSTRY, Decimal::ZERO),
        }
    }

    pub fn industries(&self) -> impl Iterator<Item = &str> {
        self.industry_salaries.iter().map(|row| row.industry.as_str())
    }
}
