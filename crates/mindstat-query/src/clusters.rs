use mindstat_core::{Field, Record};
use serde::Serialize;

use crate::errors::Result;
use crate::filters::YearArg;

const DEFAULT_FEATURES: [Field; 2] = [Field::Depression, Field::Anxiety];

/// One country plotted on two features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterPoint {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// Points for every record of `year`, with `x`/`y` taken from the first two
/// features. Fewer than two features falls back to depression vs anxiety;
/// non-finite values are plotted as 0.
pub fn coordinates_for<S: AsRef<str>>(
    records: &[Record],
    features: &[S],
    year: impl YearArg,
) -> Result<Vec<ClusterPoint>> {
    let [x_field, y_field] = match features {
        [x, y, ..] => [
            Field::numeric_from_name(x.as_ref())?,
            Field::numeric_from_name(y.as_ref())?,
        ],
        _ => DEFAULT_FEATURES,
    };
    let year = year.to_year()?;

    records
        .iter()
        .filter(|record| record.year == year)
        .map(|record| -> Result<ClusterPoint> {
            Ok(ClusterPoint {
                id: record.country.clone(),
                label: record.country.clone(),
                x: finite_or_zero(record.numeric(x_field)?),
                y: finite_or_zero(record.numeric(y_field)?),
            })
        })
        .collect()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
