//! Hand-placed outlier rows for anomaly-detection demos.

use mindstat_core::{Record, Region};

/// Number of rows appended after the generated records.
pub const ANOMALY_COUNT: usize = 3;

/// High depression prevalence with low treatment coverage, low prevalence
/// with very low coverage, and high prevalence with high coverage.
pub fn anomaly_records() -> [Record; ANOMALY_COUNT] {
    [
        Record {
            country: "País X".to_string(),
            year: 2019,
            region: Region::Europe,
            depression: 5.8,
            anxiety: 4.2,
            bipolar: 0.9,
            schizophrenia: 0.4,
            eating_disorders: 0.8,
            gdp_per_capita: 25000.0,
            urbanization: 82.5,
            unemployment: 12.3,
            treatment_coverage: 25.0,
        },
        Record {
            country: "País Y".to_string(),
            year: 2019,
            region: Region::Asia,
            depression: 2.1,
            anxiety: 1.9,
            bipolar: 0.6,
            schizophrenia: 0.4,
            eating_disorders: 0.3,
            gdp_per_capita: 8000.0,
            urbanization: 45.2,
            unemployment: 7.8,
            treatment_coverage: 15.0,
        },
        Record {
            country: "País Z".to_string(),
            year: 2019,
            region: Region::Americas,
            depression: 7.2,
            anxiety: 6.8,
            bipolar: 1.5,
            schizophrenia: 0.6,
            eating_disorders: 1.2,
            gdp_per_capita: 55000.0,
            urbanization: 91.3,
            unemployment: 3.2,
            treatment_coverage: 82.0,
        },
    ]
}
