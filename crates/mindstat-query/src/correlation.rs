//! Fixed disorder correlation table.
//!
//! These are display constants standing in for a computed statistic; no
//! correlation is derived from the data.

use mindstat_core::Field;

use crate::errors::Result;

/// Value for pairs the table does not cover.
pub const DEFAULT_CORRELATION: f64 = 0.3;

/// Symmetric lookup over the five disorder fields.
pub fn known_correlation(a: Field, b: Field) -> Option<f64> {
    use Field::*;

    let value = match (a, b) {
        (Depression, Anxiety) | (Anxiety, Depression) => 0.72,
        (Depression, Bipolar) | (Bipolar, Depression) => 0.58,
        (Depression, Schizophrenia) | (Schizophrenia, Depression) => 0.31,
        (Depression, EatingDisorders) | (EatingDisorders, Depression) => 0.45,
        (Anxiety, Bipolar) | (Bipolar, Anxiety) => 0.51,
        (Anxiety, Schizophrenia) | (Schizophrenia, Anxiety) => 0.28,
        (Anxiety, EatingDisorders) | (EatingDisorders, Anxiety) => 0.48,
        (Bipolar, Schizophrenia) | (Schizophrenia, Bipolar) => 0.42,
        (Bipolar, EatingDisorders) | (EatingDisorders, Bipolar) => 0.33,
        (Schizophrenia, EatingDisorders) | (EatingDisorders, Schizophrenia) => 0.25,
        _ => return None,
    };
    Some(value)
}

/// N×N matrix for the requested names: 1.0 on the diagonal, table values
/// elsewhere, [`DEFAULT_CORRELATION`] for uncovered pairs. Names outside the
/// record schema are rejected.
pub fn correlation_matrix<S: AsRef<str>>(names: &[S]) -> Result<Vec<Vec<f64>>> {
    let fields = names
        .iter()
        .map(|name| Field::from_name(name.as_ref()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let matrix = fields
        .iter()
        .enumerate()
        .map(|(i, a)| {
            fields
                .iter()
                .enumerate()
                .map(|(j, b)| {
                    if i == j {
                        1.0
                    } else {
                        known_correlation(*a, *b).unwrap_or(DEFAULT_CORRELATION)
                    }
                })
                .collect()
        })
        .collect();

    Ok(matrix)
}
