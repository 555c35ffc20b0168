use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::Field;
use crate::region::Region;

/// One (country, year) observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Record {
    pub country: String,
    pub year: i32,
    pub region: Region,
    /// Prevalence, percent of population.
    pub depression: f64,
    pub anxiety: f64,
    pub bipolar: f64,
    pub schizophrenia: f64,
    pub eating_disorders: f64,
    /// Rounded to whole currency units.
    pub gdp_per_capita: f64,
    /// Percent, capped at 100 by the generator.
    pub urbanization: f64,
    pub unemployment: f64,
    /// Percent, capped at 100 by the generator.
    pub treatment_coverage: f64,
}

/// Ordered sequence of records.
pub type Dataset = Vec<Record>;

impl Record {
    /// Numeric value of a column; `country` and `region` are rejected.
    pub fn numeric(&self, field: Field) -> Result<f64> {
        let value = match field {
            Field::Country | Field::Region => {
                return Err(Error::NonNumericField(field.name().to_string()));
            }
            Field::Year => f64::from(self.year),
            Field::Depression => self.depression,
            Field::Anxiety => self.anxiety,
            Field::Bipolar => self.bipolar,
            Field::Schizophrenia => self.schizophrenia,
            Field::EatingDisorders => self.eating_disorders,
            Field::GdpPerCapita => self.gdp_per_capita,
            Field::Urbanization => self.urbanization,
            Field::Unemployment => self.unemployment,
            Field::TreatmentCoverage => self.treatment_coverage,
        };
        Ok(value)
    }

    /// Text form of a column as written to the dataset file.
    pub fn text(&self, field: Field) -> String {
        match field {
            Field::Country => self.country.clone(),
            Field::Year => self.year.to_string(),
            Field::Region => self.region.as_str().to_string(),
            other => self
                .numeric(other)
                .map(|value| value.to_string())
                .unwrap_or_default(),
        }
    }

    /// All columns in header order.
    pub fn to_row(&self) -> Vec<String> {
        Field::ALL.iter().map(|field| self.text(*field)).collect()
    }
}

/// Parse a year given as text.
pub fn parse_year(value: &str) -> Result<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::InvalidYear(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record {
            country: "Brasil".to_string(),
            year: 2015,
            region: Region::Americas,
            depression: 3.45,
            anxiety: 4.1,
            bipolar: 1.0,
            schizophrenia: 0.4,
            eating_disorders: 0.75,
            gdp_per_capita: 25000.0,
            urbanization: 85.3,
            unemployment: 6.2,
            treatment_coverage: 55.0,
        }
    }

    #[test]
    fn row_follows_header_order() {
        let row = sample().to_row();
        assert_eq!(
            row,
            vec![
                "Brasil", "2015", "americas", "3.45", "4.1", "1", "0.4", "0.75", "25000", "85.3",
                "6.2", "55"
            ]
        );
    }

    #[test]
    fn rejects_non_numeric_columns() {
        let record = sample();
        assert_eq!(
            record.numeric(Field::Country),
            Err(Error::NonNumericField("country".to_string()))
        );
        assert_eq!(record.numeric(Field::Year), Ok(2015.0));
    }

    #[test]
    fn year_parsing_fails_loudly() {
        assert_eq!(parse_year(" 2019 "), Ok(2019));
        assert_eq!(
            parse_year("twenty"),
            Err(Error::InvalidYear("twenty".to_string()))
        );
    }
}
