use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use mindstat_core::{Dataset, Field, Record, Region, parse_year};
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{QueryError, Result};

/// Options for reading a dataset file.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Fail on the first malformed row instead of skipping it.
    pub strict: bool,
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            strict: false,
            delimiter: b',',
        }
    }
}

/// A row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIssue {
    pub line: u64,
    pub message: String,
}

/// Outcome of a load: how many rows were read, kept and skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rows_read: u64,
    pub rows_loaded: u64,
    pub rows_skipped: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_columns: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<RowIssue>,
}

/// Parsed dataset together with its load report.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub report: LoadReport,
}

pub fn load_dataset_path(path: &Path, options: LoadOptions) -> Result<LoadedDataset> {
    let file = std::fs::File::open(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            QueryError::NotFound(path.to_path_buf())
        } else {
            QueryError::Io(err)
        }
    })?;
    let loaded = load_dataset_reader(file, options)?;
    debug!(
        path = %path.display(),
        rows = loaded.report.rows_loaded,
        skipped = loaded.report.rows_skipped,
        "dataset loaded"
    );
    Ok(loaded)
}

pub fn load_dataset_str(text: &str, options: LoadOptions) -> Result<LoadedDataset> {
    load_dataset_reader(text.as_bytes(), options)
}

/// Parse delimited text with a header row into typed records.
///
/// Columns are located by header name, so their order is free. Empty lines
/// are ignored; a line of empty fields is a malformed row. Malformed rows are skipped and reported unless
/// `options.strict` is set.
pub fn load_dataset_reader<R: Read>(reader: R, options: LoadOptions) -> Result<LoadedDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut report = LoadReport {
        unknown_columns: columns.unknown.clone(),
        ..LoadReport::default()
    };
    let mut dataset = Vec::new();

    for (idx, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                if matches!(err.kind(), csv::ErrorKind::Io(_)) {
                    return Err(err.into());
                }
                let line = err.position().map(|pos| pos.line()).unwrap_or(idx as u64 + 2);
                report.rows_read += 1;
                reject_row(&mut report, options, line, err.to_string())?;
                continue;
            }
        };

        report.rows_read += 1;
        let line = row
            .position()
            .map(|pos| pos.line())
            .unwrap_or(idx as u64 + 2);

        match parse_row(&row, &columns, headers.len()) {
            Ok(record) => {
                dataset.push(record);
                report.rows_loaded += 1;
            }
            Err(message) => reject_row(&mut report, options, line, message)?,
        }
    }

    Ok(LoadedDataset { dataset, report })
}

fn reject_row(
    report: &mut LoadReport,
    options: LoadOptions,
    line: u64,
    message: String,
) -> Result<()> {
    if options.strict {
        return Err(QueryError::MalformedRow { line, message });
    }
    warn!(line, error = %message, "skipping malformed row");
    report.rows_skipped += 1;
    report.issues.push(RowIssue { line, message });
    Ok(())
}

struct ColumnIndex {
    positions: HashMap<Field, usize>,
    unknown: Vec<String>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut positions = HashMap::new();
        let mut unknown = Vec::new();
        for (idx, name) in headers.iter().enumerate() {
            match Field::ALL
                .into_iter()
                .find(|field| field.name().eq_ignore_ascii_case(name))
            {
                Some(field) => {
                    positions.entry(field).or_insert(idx);
                }
                None => unknown.push(name.to_string()),
            }
        }

        for field in Field::ALL {
            if !positions.contains_key(&field) {
                return Err(QueryError::MissingColumn(field.name().to_string()));
            }
        }

        Ok(Self { positions, unknown })
    }

    fn get<'r>(&self, row: &'r StringRecord, field: Field) -> &'r str {
        self.positions
            .get(&field)
            .and_then(|idx| row.get(*idx))
            .unwrap_or_default()
    }
}

fn parse_row(
    row: &StringRecord,
    columns: &ColumnIndex,
    expected_len: usize,
) -> std::result::Result<Record, String> {
    if row.len() != expected_len {
        return Err(format!(
            "expected {expected_len} columns, found {}",
            row.len()
        ));
    }

    let country = columns.get(row, Field::Country);
    if country.is_empty() {
        return Err("country is empty".to_string());
    }
    let year = parse_year(columns.get(row, Field::Year)).map_err(|err| err.to_string())?;
    let region = columns
        .get(row, Field::Region)
        .parse::<Region>()
        .map_err(|err| err.to_string())?;
    let number = |field: Field| -> std::result::Result<f64, String> {
        let raw = columns.get(row, field);
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| format!("invalid number {raw:?} for {field}"))
    };

    Ok(Record {
        country: country.to_string(),
        year,
        region,
        depression: number(Field::Depression)?,
        anxiety: number(Field::Anxiety)?,
        bipolar: number(Field::Bipolar)?,
        schizophrenia: number(Field::Schizophrenia)?,
        eating_disorders: number(Field::EatingDisorders)?,
        gdp_per_capita: number(Field::GdpPerCapita)?,
        urbanization: number(Field::Urbanization)?,
        unemployment: number(Field::Unemployment)?,
        treatment_coverage: number(Field::TreatmentCoverage)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "country,year,region,depression,anxiety,bipolar,schizophrenia,eating_disorders,gdp_per_capita,urbanization,unemployment,treatment_coverage";

    #[test]
    fn columns_are_matched_by_name() {
        let text = "region,country,year,depression,anxiety,bipolar,schizophrenia,eating_disorders,gdp_per_capita,urbanization,unemployment,treatment_coverage\nasia,Japão,2012,2.9,2.4,0.7,0.4,0.5,40000,91.2,4.1,55.5\n";
        let loaded = load_dataset_str(text, LoadOptions::default()).expect("load");
        assert_eq!(loaded.dataset.len(), 1);
        assert_eq!(loaded.dataset[0].country, "Japão");
        assert_eq!(loaded.dataset[0].region, Region::Asia);
    }

    #[test]
    fn missing_column_fails_the_whole_file() {
        let text = "country,year,region\nBrasil,2010,americas\n";
        let err = load_dataset_str(text, LoadOptions::default()).expect_err("missing columns");
        assert!(matches!(err, QueryError::MissingColumn(ref name) if name == "depression"));
    }

    #[test]
    fn blank_lines_are_not_rows() {
        let text = format!(
            "{HEADER}\n\nBrasil,2010,americas,3.5,4,1,0.4,0.7,20000,80,6,50\n\n"
        );
        let loaded = load_dataset_str(&text, LoadOptions::default()).expect("load");
        assert_eq!(loaded.report.rows_read, 1);
        assert_eq!(loaded.report.rows_skipped, 0);
    }

    #[test]
    fn non_finite_literals_are_malformed() {
        let text = format!(
            "{HEADER}\nBrasil,2010,americas,NaN,4,1,0.4,0.7,20000,80,6,50\nChile,2010,americas,3.5,inf,1,0.4,0.7,20000,80,6,50\nPeru,2010,americas,3.5,4,1,0.4,0.7,-infinity,80,6,50\n"
        );
        let loaded = load_dataset_str(&text, LoadOptions::default()).expect("load");
        assert!(loaded.dataset.is_empty());
        assert_eq!(loaded.report.rows_skipped, 3);
        assert!(loaded.report.issues[0].message.contains("depression"));
        assert!(loaded.report.issues[1].message.contains("anxiety"));
        assert!(loaded.report.issues[2].message.contains("gdp_per_capita"));
    }

    #[test]
    fn unknown_columns_are_reported() {
        let text = format!("{HEADER},notes\nBrasil,2010,americas,3.5,4,1,0.4,0.7,20000,80,6,50,ok\n");
        let loaded = load_dataset_str(&text, LoadOptions::default()).expect("load");
        assert_eq!(loaded.dataset.len(), 1);
        assert_eq!(loaded.report.unknown_columns, vec!["notes".to_string()]);
    }
}
