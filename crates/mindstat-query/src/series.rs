use std::collections::BTreeMap;

use mindstat_core::{Field, Record};
use serde::Serialize;

use crate::errors::Result;
use crate::filters::RegionFilter;

/// Mean value of a field for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub year: i32,
    pub value: f64,
}

/// Per-year arithmetic mean of `field` over the records of `region`.
///
/// Years with no counted value produce no point. Non-finite values are left
/// out of both the sum and the count. Points are ordered by year.
pub fn time_series_for(
    records: &[Record],
    field: &str,
    region: &str,
) -> Result<Vec<TimeSeriesPoint>> {
    let field = Field::numeric_from_name(field)?;
    let filter: RegionFilter = region.parse()?;

    let mut by_year: BTreeMap<i32, (f64, u64)> = BTreeMap::new();
    for record in records.iter().filter(|record| filter.matches(record)) {
        let value = record.numeric(field)?;
        if !value.is_finite() {
            continue;
        }
        let entry = by_year.entry(record.year).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    Ok(by_year
        .into_iter()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(year, (sum, count))| TimeSeriesPoint {
            year,
            value: sum / count as f64,
        })
        .collect())
}
