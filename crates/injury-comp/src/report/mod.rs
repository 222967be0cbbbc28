//! Renderers that turn a [`ComputationResult`] into a document.
//!
//! Renderers never recompute anything: they preserve the canonical item order and copy
//! every narrative verbatim.

mod export;
mod markdown;
pub mod views;

pub use export::write_csv;
pub use markdown::render_markdown;
pub use views::{CalculationView, ItemView};

use crate::compensation::{ComputationResult, ComputationStandards};
use chrono::NaiveDate;
use mime::Mime;
use serde::Deserialize;

const TEXT_MARKDOWN: &str = "text/markdown; charset=utf-8";

/// Display metadata supplied by the caller, never read from a clock here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMetadata {
    pub reference_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    #[default]
    Markdown,
    Csv,
}

impl ReportFormat {
    pub fn mime(self) -> Mime {
        match self {
            Self::Json => mime::APPLICATION_JSON,
            Self::Markdown => TEXT_MARKDOWN
                .parse()
                .unwrap_or(mime::TEXT_PLAIN_UTF_8),
            Self::Csv => mime::TEXT_CSV_UTF_8,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
            Self::Csv => "csv",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "markdown" | "md" => Some(Self::Markdown),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("unable to flush csv buffer: {0}")]
    Flush(#[from] std::io::Error),
    #[error("csv output was not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub format: ReportFormat,
    pub filename: String,
    pub body: String,
}

impl RenderedReport {
    pub fn content_type(&self) -> Mime {
        self.format.mime()
    }
}

/// Attachment name, `<name>计算结果.<ext>`, with `赔偿` standing in for a missing name.
pub fn report_filename(result: &ComputationResult, format: ReportFormat) -> String {
    let stem = if result.victim_named() {
        result.victim_name.as_str()
    } else {
        "赔偿"
    };
    format!("{stem}计算结果.{}", format.extension())
}

pub fn render(
    result: &ComputationResult,
    standards: &ComputationStandards,
    metadata: &ReportMetadata,
    format: ReportFormat,
) -> Result<RenderedReport, ReportError> {
    let body = match format {
        ReportFormat::Json => serde_json::to_string_pretty(&CalculationView::from_result(result))?,
        ReportFormat::Markdown => render_markdown(result, standards, metadata),
        ReportFormat::Csv => write_csv(result)?,
    };

    Ok(RenderedReport {
        format,
        filename: report_filename(result, format),
        body,
    })
}
