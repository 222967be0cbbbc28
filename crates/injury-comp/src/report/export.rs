use super::views::TOTAL_LABEL;
use super::ReportError;
use crate::compensation::format::round_cents;
use crate::compensation::ComputationResult;

/// Writes every item, zero-valued ones included, then a total row.
pub fn write_csv(result: &ComputationResult) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["index", "item", "amount", "narrative"])?;
    for (idx, item) in result.items.iter().enumerate() {
        writer.write_record([
            (idx + 1).to_string(),
            item.name.to_string(),
            round_cents(item.amount).to_string(),
            item.narrative.clone(),
        ])?;
    }
    writer.write_record([
        String::new(),
        TOTAL_LABEL.to_string(),
        round_cents(result.total).to_string(),
        result.total_narrative.clone(),
    ])?;

    let bytes = writer
        .into_inner()
        .map_err(|err| ReportError::Flush(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compensation::{compute, CaseInput, ComputationStandards, ItemKind};
    use rust_decimal::Decimal;

    #[test]
    fn export_contains_all_items_and_total() {
        let standards = ComputationStandards::guangxi_2025();
        let input = CaseInput {
            traffic_fee: Decimal::new(12050, 2),
            ..CaseInput::empty(&standards)
        };
        let result = compute(&input, &standards);
        let body = write_csv(&result).expect("csv renders");

        let mut reader = csv::Reader::from_reader(body.as_bytes());
        let rows: Vec<csv::StringRecord> = reader
            .records()
            .collect::<Result<_, _>>()
            .expect("csv parses back");
        assert_eq!(rows.len(), ItemKind::ordered().len() + 1);
        assert_eq!(&rows[4][1], "交通费");
        assert_eq!(&rows[4][2], "120.50");
        assert_eq!(&rows[0][2], "0.00");
        let total = rows.last().expect("total row");
        assert_eq!(&total[1], "总计");
        assert_eq!(&total[2], "120.50");
    }

    #[test]
    fn multi_line_narratives_are_quoted() {
        let standards = ComputationStandards::guangxi_2025();
        let input = CaseInput {
            accommodation_days: 1,
            ..CaseInput::empty(&standards)
        };
        let body = write_csv(&compute(&input, &standards)).expect("csv renders");
        assert!(body.contains("\"住宿天数：1天\n"));
    }
}
