use std::collections::HashSet;

use mindstat_core::Region;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationIssue, ValidationReport};

/// Inclusive-exclusive range a base rate is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Uniform draw in `[min, max)`; a degenerate range yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

/// Base-rate ranges for every indicator of one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    pub depression: ValueRange,
    pub anxiety: ValueRange,
    pub bipolar: ValueRange,
    pub schizophrenia: ValueRange,
    pub eating_disorders: ValueRange,
    pub gdp_per_capita: ValueRange,
    pub urbanization: ValueRange,
    pub unemployment: ValueRange,
    pub treatment_coverage: ValueRange,
}

impl RegionProfile {
    fn ranges(&self) -> [(&'static str, &ValueRange); 9] {
        [
            ("depression", &self.depression),
            ("anxiety", &self.anxiety),
            ("bipolar", &self.bipolar),
            ("schizophrenia", &self.schizophrenia),
            ("eating_disorders", &self.eating_disorders),
            ("gdp_per_capita", &self.gdp_per_capita),
            ("urbanization", &self.urbanization),
            ("unemployment", &self.unemployment),
            ("treatment_coverage", &self.treatment_coverage),
        ]
    }

    pub fn americas() -> Self {
        Self {
            depression: ValueRange::new(3.0, 4.0),
            anxiety: ValueRange::new(3.5, 4.5),
            bipolar: ValueRange::new(0.8, 1.2),
            schizophrenia: ValueRange::new(0.3, 0.5),
            eating_disorders: ValueRange::new(0.5, 1.0),
            gdp_per_capita: ValueRange::new(15000.0, 60000.0),
            urbanization: ValueRange::new(70.0, 90.0),
            unemployment: ValueRange::new(4.0, 10.0),
            treatment_coverage: ValueRange::new(40.0, 70.0),
        }
    }

    pub fn europe() -> Self {
        Self {
            depression: ValueRange::new(3.5, 4.5),
            anxiety: ValueRange::new(3.0, 4.0),
            bipolar: ValueRange::new(0.7, 1.1),
            schizophrenia: ValueRange::new(0.3, 0.5),
            eating_disorders: ValueRange::new(0.6, 1.1),
            gdp_per_capita: ValueRange::new(25000.0, 70000.0),
            urbanization: ValueRange::new(75.0, 95.0),
            unemployment: ValueRange::new(3.0, 12.0),
            treatment_coverage: ValueRange::new(50.0, 80.0),
        }
    }

    pub fn asia() -> Self {
        Self {
            depression: ValueRange::new(2.5, 3.5),
            anxiety: ValueRange::new(2.0, 3.0),
            bipolar: ValueRange::new(0.5, 0.9),
            schizophrenia: ValueRange::new(0.3, 0.5),
            eating_disorders: ValueRange::new(0.3, 0.7),
            gdp_per_capita: ValueRange::new(5000.0, 50000.0),
            urbanization: ValueRange::new(50.0, 95.0),
            unemployment: ValueRange::new(2.0, 8.0),
            treatment_coverage: ValueRange::new(30.0, 70.0),
        }
    }

    pub fn oceania() -> Self {
        Self {
            depression: ValueRange::new(3.2, 4.2),
            anxiety: ValueRange::new(3.3, 4.3),
            bipolar: ValueRange::new(0.7, 1.1),
            schizophrenia: ValueRange::new(0.3, 0.5),
            eating_disorders: ValueRange::new(0.5, 1.0),
            gdp_per_capita: ValueRange::new(30000.0, 60000.0),
            urbanization: ValueRange::new(80.0, 95.0),
            unemployment: ValueRange::new(3.0, 7.0),
            treatment_coverage: ValueRange::new(60.0, 85.0),
        }
    }

    pub fn africa() -> Self {
        Self {
            depression: ValueRange::new(2.0, 3.0),
            anxiety: ValueRange::new(1.8, 2.8),
            bipolar: ValueRange::new(0.4, 0.8),
            schizophrenia: ValueRange::new(0.3, 0.5),
            eating_disorders: ValueRange::new(0.2, 0.6),
            gdp_per_capita: ValueRange::new(1000.0, 15000.0),
            urbanization: ValueRange::new(30.0, 70.0),
            unemployment: ValueRange::new(5.0, 20.0),
            treatment_coverage: ValueRange::new(10.0, 40.0),
        }
    }
}

/// Region table; every region always has a profile.
///
/// When deserialized, regions and ranges left out fall back to the built-in
/// table, so a config only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RegionProfilesOverride")]
pub struct RegionProfiles {
    pub americas: RegionProfile,
    pub europe: RegionProfile,
    pub asia: RegionProfile,
    pub oceania: RegionProfile,
    pub africa: RegionProfile,
}

impl Default for RegionProfiles {
    fn default() -> Self {
        Self {
            americas: RegionProfile::americas(),
            europe: RegionProfile::europe(),
            asia: RegionProfile::asia(),
            oceania: RegionProfile::oceania(),
            africa: RegionProfile::africa(),
        }
    }
}

impl RegionProfiles {
    pub fn for_region(&self, region: Region) -> &RegionProfile {
        match region {
            Region::Americas => &self.americas,
            Region::Europe => &self.europe,
            Region::Asia => &self.asia,
            Region::Oceania => &self.oceania,
            Region::Africa => &self.africa,
        }
    }
}

/// Partial region table as read from a config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionProfilesOverride {
    pub americas: Option<RegionProfileOverride>,
    pub europe: Option<RegionProfileOverride>,
    pub asia: Option<RegionProfileOverride>,
    pub oceania: Option<RegionProfileOverride>,
    pub africa: Option<RegionProfileOverride>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionProfileOverride {
    pub depression: Option<ValueRange>,
    pub anxiety: Option<ValueRange>,
    pub bipolar: Option<ValueRange>,
    pub schizophrenia: Option<ValueRange>,
    pub eating_disorders: Option<ValueRange>,
    pub gdp_per_capita: Option<ValueRange>,
    pub urbanization: Option<ValueRange>,
    pub unemployment: Option<ValueRange>,
    pub treatment_coverage: Option<ValueRange>,
}

impl RegionProfileOverride {
    pub fn apply(self, base: RegionProfile) -> RegionProfile {
        RegionProfile {
            depression: self.depression.unwrap_or(base.depression),
            anxiety: self.anxiety.unwrap_or(base.anxiety),
            bipolar: self.bipolar.unwrap_or(base.bipolar),
            schizophrenia: self.schizophrenia.unwrap_or(base.schizophrenia),
            eating_disorders: self.eating_disorders.unwrap_or(base.eating_disorders),
            gdp_per_capita: self.gdp_per_capita.unwrap_or(base.gdp_per_capita),
            urbanization: self.urbanization.unwrap_or(base.urbanization),
            unemployment: self.unemployment.unwrap_or(base.unemployment),
            treatment_coverage: self.treatment_coverage.unwrap_or(base.treatment_coverage),
        }
    }
}

impl From<RegionProfilesOverride> for RegionProfiles {
    fn from(value: RegionProfilesOverride) -> Self {
        let merge = |region: Option<RegionProfileOverride>, base: RegionProfile| {
            region.unwrap_or_default().apply(base)
        };
        Self {
            americas: merge(value.americas, RegionProfile::americas()),
            europe: merge(value.europe, RegionProfile::europe()),
            asia: merge(value.asia, RegionProfile::asia()),
            oceania: merge(value.oceania, RegionProfile::oceania()),
            africa: merge(value.africa, RegionProfile::africa()),
        }
    }
}

/// Per-year increments applied on top of the base rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub depression: f64,
    pub anxiety: f64,
    pub bipolar: f64,
    pub schizophrenia: f64,
    pub eating_disorders: f64,
    /// Yearly GDP growth as a fraction of the base value.
    pub gdp_growth_rate: f64,
    pub urbanization: f64,
    pub unemployment: f64,
    pub treatment_coverage: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            depression: 0.1,
            anxiety: 0.12,
            bipolar: 0.02,
            schizophrenia: 0.01,
            eating_disorders: 0.03,
            gdp_growth_rate: 0.02,
            urbanization: 0.5,
            unemployment: -0.1,
            treatment_coverage: 1.5,
        }
    }
}

/// A country and the region whose profile it is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySpec {
    pub name: String,
    pub region: Region,
}

impl CountrySpec {
    pub fn new(name: impl Into<String>, region: Region) -> Self {
        Self {
            name: name.into(),
            region,
        }
    }
}

/// Longest inclusive year range a config may request.
pub const MAX_YEAR_SPAN: usize = 1000;

/// Full generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub start_year: i32,
    pub end_year: i32,
    pub countries: Vec<CountrySpec>,
    /// Half-width of the uniform noise added to every trend value.
    pub noise: f64,
    pub regions: RegionProfiles,
    pub trends: TrendConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_year: 2010,
            end_year: 2020,
            countries: default_countries(),
            noise: 0.2,
            regions: RegionProfiles::default(),
            trends: TrendConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Number of years in the inclusive range; zero when inverted.
    pub fn year_count(&self) -> usize {
        if self.end_year < self.start_year {
            0
        } else {
            (i64::from(self.end_year) - i64::from(self.start_year) + 1) as usize
        }
    }

    /// Records produced before anomalies are appended.
    pub fn expected_base_records(&self) -> usize {
        self.countries.len() * self.year_count()
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        if self.start_year > self.end_year {
            report.push(
                ValidationIssue::error(
                    "inverted_year_range",
                    "/start_year",
                    format!(
                        "start_year {} is after end_year {}",
                        self.start_year, self.end_year
                    ),
                )
                .with_hint("swap start_year and end_year"),
            );
        } else if self.year_count() > MAX_YEAR_SPAN {
            report.push(ValidationIssue::error(
                "year_range_too_large",
                "/end_year",
                format!(
                    "{}..={} spans {} years, at most {MAX_YEAR_SPAN} are allowed",
                    self.start_year,
                    self.end_year,
                    self.year_count()
                ),
            ));
        }

        if self.countries.is_empty() {
            report.push(ValidationIssue::error(
                "no_countries",
                "/countries",
                "at least one country is required",
            ));
        }

        let mut seen = HashSet::new();
        for (idx, country) in self.countries.iter().enumerate() {
            let path = format!("/countries/{idx}/name");
            if country.name.trim().is_empty() {
                report.push(ValidationIssue::error(
                    "empty_country_name",
                    path.clone(),
                    "country name is empty",
                ));
            } else if country.name.trim() != country.name {
                report.push(
                    ValidationIssue::error(
                        "country_name_whitespace",
                        path.clone(),
                        format!("country name {:?} has surrounding whitespace", country.name),
                    )
                    .with_hint("readers trim fields, so the name would not load back unchanged"),
                );
            }
            if !seen.insert(country.name.as_str()) {
                report.push(ValidationIssue::error(
                    "duplicate_country",
                    path,
                    format!("country {:?} is listed more than once", country.name),
                ));
            }
        }

        if !self.noise.is_finite() || self.noise < 0.0 {
            report.push(ValidationIssue::error(
                "invalid_noise",
                "/noise",
                format!("noise must be a finite non-negative number, got {}", self.noise),
            ));
        }

        for region in Region::ALL {
            let profile = self.regions.for_region(region);
            for (name, range) in profile.ranges() {
                let path = format!("/regions/{region}/{name}");
                if !range.min.is_finite() || !range.max.is_finite() {
                    report.push(ValidationIssue::error(
                        "non_finite_range",
                        path,
                        "range bounds must be finite",
                    ));
                } else if range.min > range.max {
                    report.push(
                        ValidationIssue::error(
                            "inverted_range",
                            path,
                            format!("min {} is greater than max {}", range.min, range.max),
                        )
                        .with_hint("min must be <= max"),
                    );
                } else if range.min == range.max {
                    report.push(ValidationIssue::warning(
                        "degenerate_range",
                        path,
                        format!("every country starts at {}", range.min),
                    ));
                }
            }
        }

        let trends = [
            ("depression", self.trends.depression),
            ("anxiety", self.trends.anxiety),
            ("bipolar", self.trends.bipolar),
            ("schizophrenia", self.trends.schizophrenia),
            ("eating_disorders", self.trends.eating_disorders),
            ("gdp_growth_rate", self.trends.gdp_growth_rate),
            ("urbanization", self.trends.urbanization),
            ("unemployment", self.trends.unemployment),
            ("treatment_coverage", self.trends.treatment_coverage),
        ];
        for (name, value) in trends {
            if !value.is_finite() {
                report.push(ValidationIssue::error(
                    "non_finite_trend",
                    format!("/trends/{name}"),
                    "trend must be finite",
                ));
            }
        }

        report
    }
}

/// The twenty demo countries across five regions.
pub fn default_countries() -> Vec<CountrySpec> {
    [
        ("Brasil", Region::Americas),
        ("Estados Unidos", Region::Americas),
        ("Canadá", Region::Americas),
        ("México", Region::Americas),
        ("Argentina", Region::Americas),
        ("Reino Unido", Region::Europe),
        ("França", Region::Europe),
        ("Alemanha", Region::Europe),
        ("Itália", Region::Europe),
        ("Espanha", Region::Europe),
        ("China", Region::Asia),
        ("Japão", Region::Asia),
        ("Índia", Region::Asia),
        ("Coreia do Sul", Region::Asia),
        ("Austrália", Region::Oceania),
        ("Nova Zelândia", Region::Oceania),
        ("África do Sul", Region::Africa),
        ("Nigéria", Region::Africa),
        ("Egito", Region::Africa),
        ("Quênia", Region::Africa),
    ]
    .into_iter()
    .map(|(name, region)| CountrySpec::new(name, region))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GeneratorConfig::default();
        let report = config.validate();
        assert!(report.is_ok(), "{report:?}");
        assert!(report.warnings.is_empty());
        assert_eq!(config.countries.len(), 20);
        assert_eq!(config.year_count(), 11);
        assert_eq!(config.expected_base_records(), 220);
    }

    #[test]
    fn flags_inverted_ranges_and_years() {
        let mut config = GeneratorConfig::default();
        config.start_year = 2021;
        config.regions.africa.gdp_per_capita = ValueRange::new(15000.0, 1000.0);
        let report = config.validate();
        assert!(!report.is_ok());
        assert!(report.has_code("inverted_year_range"));
        assert!(report.has_code("inverted_range"));
        assert!(
            report
                .errors
                .iter()
                .any(|issue| issue.path == "/regions/africa/gdp_per_capita")
        );
        assert_eq!(config.year_count(), 0);
    }

    #[test]
    fn flags_duplicate_and_empty_countries() {
        let mut config = GeneratorConfig::default();
        config.countries = vec![
            CountrySpec::new("Testland", Region::Europe),
            CountrySpec::new("Testland", Region::Asia),
            CountrySpec::new(" ", Region::Asia),
        ];
        let report = config.validate();
        assert!(report.has_code("duplicate_country"));
        assert!(report.has_code("empty_country_name"));
    }

    #[test]
    fn rejects_padded_country_names() {
        let mut config = GeneratorConfig::default();
        config.countries = vec![CountrySpec::new(" Testland ", Region::Europe)];
        let report = config.validate();
        assert!(!report.is_ok());
        assert!(
            report
                .errors
                .iter()
                .any(|issue| issue.code == "country_name_whitespace"
                    && issue.path == "/countries/0/name")
        );
    }

    #[test]
    fn bounds_the_year_span() {
        let mut config = GeneratorConfig::default();
        config.start_year = i32::MIN;
        config.end_year = i32::MAX;
        assert!(config.validate().has_code("year_range_too_large"));

        config.start_year = 1000;
        config.end_year = 1999;
        assert_eq!(config.year_count(), MAX_YEAR_SPAN);
        assert!(!config.validate().has_code("year_range_too_large"));

        config.end_year = 2000;
        assert!(config.validate().has_code("year_range_too_large"));
    }

    #[test]
    fn degenerate_range_is_a_warning() {
        let mut config = GeneratorConfig::default();
        config.regions.asia.bipolar = ValueRange::new(0.7, 0.7);
        let report = config.validate();
        assert!(report.is_ok());
        assert!(
            report
                .warnings
                .iter()
                .any(|issue| issue.code == "degenerate_range"
                    && issue.path == "/regions/asia/bipolar")
        );
    }

    #[test]
    fn degenerate_range_returns_min() {
        let mut rng = rand::rng();
        assert_eq!(ValueRange::new(2.5, 2.5).sample(&mut rng), 2.5);
    }
}
