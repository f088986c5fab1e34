//! CSV and JSON export of a balance and its optional add-ons.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::balance::{Balance, Value};
use crate::bisko::Households;
use crate::indicators::Indicators;

/// Column header of the CSV export.
const HEADER: [&str; 2] = ["path", "value"];

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    /// Parses `"json"` or `"csv"`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "json" => Some(Format::Json),
            "csv" => Some(Format::Csv),
            _ => None,
        }
    }
}

/// Everything one run writes: the balance, plus indicators and the BISKO
/// household balance when requested.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    #[serde(flatten)]
    pub balance: &'a Balance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators: Option<Indicators>,
    #[serde(rename = "bisko_ph", skip_serializing_if = "Option::is_none")]
    pub bisko: Option<Households>,
}

impl<'a> Report<'a> {
    /// Report of the balance alone.
    pub fn new(balance: &'a Balance) -> Self {
        Report {
            balance,
            indicators: None,
            bisko: None,
        }
    }
}

fn flatten_into(prefix: &str, json: &serde_json::Value, out: &mut Vec<(String, String)>) {
    match json {
        serde_json::Value::Object(map) => {
            for (key, value) in map {
                flatten_into(&format!("{prefix}.{key}"), value, out);
            }
        }
        serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

/// `(path, value)` rows of the report, balance first in declaration order.
///
/// # Errors
///
/// Returns an `io::Error` if an add-on cannot be serialized.
pub fn rows(report: &Report<'_>) -> io::Result<Vec<(String, String)>> {
    let mut out = vec![
        ("ags".to_string(), report.balance.ags.clone()),
        ("year".to_string(), report.balance.year.to_string()),
    ];
    out.extend(report.balance.paths().into_iter().map(|(path, value)| {
        let value = match value {
            Value::Number(v) => v.to_string(),
            Value::Text(t) => t.to_string(),
        };
        (path, value)
    }));
    if let Some(indicators) = &report.indicators {
        flatten_into("indicators", &serde_json::to_value(indicators)?, &mut out);
    }
    if let Some(bisko) = &report.bisko {
        flatten_into("bisko_ph", &serde_json::to_value(bisko)?, &mut out);
    }
    Ok(out)
}

/// Writes the report as `path,value` CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(report: &Report<'_>, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER)?;
    for (path, value) in rows(report)? {
        wtr.write_record([path, value])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the report as pretty-printed JSON to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_json(report: &Report<'_>, mut writer: impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()
}

/// Writes the report in `format` to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write(report: &Report<'_>, format: Format, writer: impl Write) -> io::Result<()> {
    match format {
        Format::Json => write_json(report, writer),
        Format::Csv => write_csv(report, writer),
    }
}

/// Exports the report to a file at the given path.
///
/// The report is rendered in memory first so a failing run never leaves a
/// truncated file behind.
///
/// # Errors
///
/// Returns an `io::Error` if rendering, file creation or writing fails.
pub fn export(report: &Report<'_>, format: Format, path: &Path) -> io::Result<()> {
    let mut buf = Vec::new();
    write(report, format, &mut buf)?;
    let mut file = io::BufWriter::new(File::create(path)?);
    file.write_all(&buf)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::y2030::testing;

    fn render(report: &Report<'_>, format: Format) -> Option<String> {
        let mut buf = Vec::new();
        write(report, format, &mut buf).ok()?;
        String::from_utf8(buf).ok()
    }

    #[test]
    fn formats_parse_by_name() {
        assert_eq!(Format::parse("json"), Some(Format::Json));
        assert_eq!(Format::parse("csv"), Some(Format::Csv));
        assert_eq!(Format::parse("xlsx"), None);
    }

    #[test]
    fn csv_has_one_row_per_path() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let output = render(&Report::new(&b), Format::Csv);
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        assert_eq!(lines.first().copied(), Some("path,value"));
        // header, ags, year and every balance path
        assert_eq!(lines.len(), 3 + b.paths().len());
        assert_eq!(lines.get(1).copied(), Some("ags,DG000000"));
    }

    #[test]
    fn csv_values_are_exact() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let output = render(&Report::new(&b), Format::Csv).unwrap_or_default();
        let mut rdr = csv::ReaderBuilder::new().from_reader(output.as_bytes());
        let row = rdr
            .records()
            .filter_map(Result::ok)
            .find(|r| r.get(0) == Some("i30.i.CO2e_total"));
        let value = row.and_then(|r| r.get(1).and_then(|v| v.parse::<f64>().ok()));
        assert_eq!(value, Some(b.i30.i.co2e_total));
    }

    #[test]
    fn add_ons_are_appended() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");

        let report = Report {
            balance: &b,
            indicators: Some(crate::indicators::calc(&b)),
            bisko: Some(crate::bisko::calc(&b)),
        };
        let json = render(&report, Format::Json)
            .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).ok());
        let json = json.expect("export should produce JSON");
        assert!(json["indicators"]["pv_panels_peryear"].is_number());
        assert!(json["bisko_ph"]["total"]["CO2e_cb"].is_number());
        assert!(json["e30"]["p"]["energy"].is_number());

        let csv = render(&report, Format::Csv).unwrap_or_default();
        assert!(csv.lines().any(|l| l.starts_with("indicators.refs.pv_panel,")));
        assert!(csv.lines().any(|l| l.starts_with("bisko_ph.gas.energy,")));
    }

    #[test]
    fn plain_report_has_no_add_ons() {
        let data = testing::refdata().expect("built-in data should load");
        let b = testing::balance(&data).expect("national balance should succeed");
        let json = render(&Report::new(&b), Format::Json)
            .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).ok());
        let json = json.expect("export should produce JSON");
        assert!(json.get("indicators").is_none());
        assert!(json.get("bisko_ph").is_none());
    }
}
