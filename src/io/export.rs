//! CSV download of a year's records.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! UTF-8, one header row with the dashboard's column labels, and numbers written
//! with a decimal point and no grouping separators.

use std::fs;
use std::path::Path;

use crate::domain::SalesRecord;
use crate::error::DashboardError;

/// MIME type advertised for the CSV download.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Download file name for a year, e.g. `dados_mercado_2025.csv`.
pub fn export_file_name(year: i32) -> String {
    format!("dados_mercado_{year}.csv")
}

/// Serialize records to CSV bytes.
///
/// The header row is always written, so an empty selection exports a header-only file.
pub fn to_csv(records: &[&SalesRecord]) -> Result<Vec<u8>, DashboardError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut buf);

        writer.write_record(SalesRecord::HEADERS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

/// Parse a CSV export back into records.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<SalesRecord>, DashboardError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut out = Vec::new();
    for row in reader.deserialize() {
        let record: SalesRecord = row?;
        out.push(record);
    }
    Ok(out)
}

/// Write records to a CSV file, creating parent directories as needed.
pub fn write_csv(path: &Path, records: &[&SalesRecord]) -> Result<(), DashboardError> {
    let bytes = to_csv(records)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &bytes)?;
    tracing::info!(path = %path.display(), rows = records.len(), "wrote CSV export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    const HEADER: &str = "Mês,Ano,N° de Imóveis Lançados,N° de Unidades Vendidas,VGV (R$ Milhões),Preço m² Joinville,Preço m² Saguaçu";

    #[test]
    fn export_2024_has_header_and_seven_rows() {
        let ds = Dataset::builtin();
        let rows = ds.filter_by_year(2024);
        let bytes = to_csv(&rows).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "Jan,2024,110,90,45.0,6800.0,8200.0");

        let parsed = parse_csv(&bytes).unwrap();
        let expected: Vec<SalesRecord> = rows.into_iter().cloned().collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn export_keeps_decimal_values_exact() {
        let ds = Dataset::builtin();
        let bytes = to_csv(&ds.filter_by_year(2025)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.lines().any(|l| l == "Jul,2025,140,130,80.6,8750.0,10800.0"));
        assert!(!text.contains("10,800"));
    }

    #[test]
    fn empty_selection_exports_header_only() {
        let bytes = to_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim_end(), HEADER);
        assert!(parse_csv(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("downloads").join(export_file_name(2025));

        let ds = Dataset::builtin();
        let rows = ds.filter_by_year(2025);
        write_csv(&path, &rows).unwrap();

        let parsed = parse_csv(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 7);
        assert_eq!(parsed[6].price_per_sqm_b, 10800.0);
    }

    #[test]
    fn file_name_convention() {
        assert_eq!(export_file_name(2024), "dados_mercado_2024.csv");
        assert_eq!(CSV_MIME_TYPE, "text/csv");
    }
}
