use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Column of the record schema, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Country,
    Year,
    Region,
    Depression,
    Anxiety,
    Bipolar,
    Schizophrenia,
    EatingDisorders,
    GdpPerCapita,
    Urbanization,
    Unemployment,
    TreatmentCoverage,
}

impl Field {
    /// All columns in serialized header order.
    pub const ALL: [Field; 12] = [
        Field::Country,
        Field::Year,
        Field::Region,
        Field::Depression,
        Field::Anxiety,
        Field::Bipolar,
        Field::Schizophrenia,
        Field::EatingDisorders,
        Field::GdpPerCapita,
        Field::Urbanization,
        Field::Unemployment,
        Field::TreatmentCoverage,
    ];

    /// Disorder prevalence columns.
    pub const DISORDERS: [Field; 5] = [
        Field::Depression,
        Field::Anxiety,
        Field::Bipolar,
        Field::Schizophrenia,
        Field::EatingDisorders,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Country => "country",
            Field::Year => "year",
            Field::Region => "region",
            Field::Depression => "depression",
            Field::Anxiety => "anxiety",
            Field::Bipolar => "bipolar",
            Field::Schizophrenia => "schizophrenia",
            Field::EatingDisorders => "eating_disorders",
            Field::GdpPerCapita => "gdp_per_capita",
            Field::Urbanization => "urbanization",
            Field::Unemployment => "unemployment",
            Field::TreatmentCoverage => "treatment_coverage",
        }
    }

    /// Resolve a column by name. `eating` is accepted for `eating_disorders`.
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized = name.trim().to_lowercase();
        if normalized == "eating" {
            return Ok(Field::EatingDisorders);
        }
        Field::ALL
            .into_iter()
            .find(|field| field.name() == normalized)
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Field::Country | Field::Region)
    }

    pub fn is_disorder(self) -> bool {
        Field::DISORDERS.contains(&self)
    }

    /// Resolve a column that must hold numbers.
    pub fn numeric_from_name(name: &str) -> Result<Self> {
        let field = Field::from_name(name)?;
        if field.is_numeric() {
            Ok(field)
        } else {
            Err(Error::NonNumericField(field.name().to_string()))
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Field::from_name(value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Header row of the dataset file.
pub fn header() -> Vec<&'static str> {
    Field::ALL.iter().map(|field| field.name()).collect()
}
