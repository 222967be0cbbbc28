use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use injury_comp::compensation::format::{fixed2, money};
use injury_comp::error::AppError;
use injury_comp::report::{self, CalculationView, ReportError, ReportFormat, ReportMetadata};
use injury_comp::{compute, CaseInput, CaseSubmission, ComputationResult, ComputationStandards};
use std::fmt::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Itemized breakdown with every derivation
    #[default]
    Text,
    Json,
    Markdown,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// JSON file holding the case record
    #[arg(long)]
    pub(crate) input: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Date printed on markdown reports (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) reference_date: Option<NaiveDate>,
    /// Write to this file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct StandardsArgs {
    /// Print the table as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let CalculateArgs {
        input,
        format,
        reference_date,
        output,
    } = args;

    let raw = std::fs::read_to_string(&input)?;
    let submission: CaseSubmission = serde_json::from_str(&raw)?;
    let standards = ComputationStandards::guangxi_2025();
    let case = CaseInput::from_submission(&submission, &standards);
    let result = compute(&case, &standards);
    debug!(input = %input.display(), total = %result.total, "case computed");

    let reference_date = reference_date.unwrap_or_else(|| Local::now().date_naive());
    let body = render_output(&result, &standards, reference_date, format)?;

    match output {
        Some(path) => {
            std::fs::write(&path, body)?;
            println!("结果已保存：{}", path.display());
        }
        None => print!("{body}"),
    }
    Ok(())
}

pub(crate) fn run_standards(args: StandardsArgs) -> Result<(), AppError> {
    let standards = ComputationStandards::guangxi_2025();
    if args.json {
        let body = serde_json::to_string_pretty(&standards).map_err(ReportError::from)?;
        println!("{body}");
    } else {
        print!("{}", render_standards(&standards));
    }
    Ok(())
}

fn render_output(
    result: &ComputationResult,
    standards: &ComputationStandards,
    reference_date: NaiveDate,
    format: OutputFormat,
) -> Result<String, AppError> {
    let metadata = ReportMetadata { reference_date };
    let body = match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => {
            let mut body = serde_json::to_string_pretty(&CalculationView::from_result(result))
                .map_err(ReportError::from)?;
            body.push('\n');
            body
        }
        OutputFormat::Markdown => {
            report::render(result, standards, &metadata, ReportFormat::Markdown)?.body
        }
        OutputFormat::Csv => report::render(result, standards, &metadata, ReportFormat::Csv)?.body,
    };
    Ok(body)
}

pub(crate) fn render_text(result: &ComputationResult) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = write_text(&mut out, result);
    out
}

fn write_text(out: &mut String, result: &ComputationResult) -> std::fmt::Result {
    writeln!(out, "人身损害赔偿计算结果")?;
    writeln!(
        out,
        "受害人：{}  年龄：{}岁",
        result.victim_name, result.victim_age
    )?;
    writeln!(out)?;

    for (idx, item) in result.positive_items().enumerate() {
        writeln!(out, "{}. {}：{}元", idx + 1, item.name, money(item.amount))?;
        for line in item.narrative.lines() {
            writeln!(out, "   {line}")?;
        }
        writeln!(out)?;
    }

    let skipped: Vec<&str> = result
        .items
        .iter()
        .filter(|item| !item.is_positive())
        .map(|item| item.name)
        .collect();
    if !skipped.is_empty() {
        writeln!(out, "未计算项目：{}", skipped.join("、"))?;
        writeln!(out)?;
    }

    writeln!(out, "赔偿总额：{}元", money(result.total))?;
    writeln!(out, "{}", result.total_narrative)
}

fn render_standards(standards: &ComputationStandards) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = write_standards(&mut out, standards);
    out
}

fn write_standards(out: &mut String, standards: &ComputationStandards) -> std::fmt::Result {
    writeln!(out, "{}", standards.schedule)?;
    writeln!(out, "城镇居民人均可支配收入：{}元/年", money(standards.disposable_income))?;
    writeln!(out, "城镇居民人均消费支出：{}元/年", money(standards.consumption))?;
    writeln!(out, "住院伙食补助：{}元/天", money(standards.daily_meal_subsidy))?;
    writeln!(out, "护工标准：{}元/天", money(standards.daily_nursing_fee))?;
    writeln!(out, "住宿费标准：{}元/天", money(standards.daily_accommodation_fee))?;
    writeln!(out, "市内交通费：{}元/天", money(standards.traffic_fee_city))?;
    writeln!(out, "丧葬费：{}元", money(standards.funeral_expense))?;
    writeln!(out)?;

    writeln!(out, "伤残赔偿系数：")?;
    for (idx, coefficient) in standards.disability_coefficients.iter().enumerate() {
        writeln!(out, "  {}级：{}", idx + 1, fixed2(*coefficient))?;
    }
    writeln!(out)?;

    writeln!(out, "行业平均工资：")?;
    for row in &standards.industry_salaries {
        writeln!(out, "  {}：{}元/年", row.industry, money(row.annual_salary))?;
    }
    Ok(())
}
