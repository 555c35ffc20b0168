use mindstat_core::{Dataset, Record};
use rand::Rng;

use crate::anomalies::{ANOMALY_COUNT, anomaly_records};
use crate::config::{CountrySpec, GeneratorConfig, RegionProfile};

const PERCENT_CAP: f64 = 100.0;

/// Generate the full dataset: every country for every year, then the
/// anomaly rows.
///
/// Draws come from `rng` in a fixed order (nine base rates per country, then
/// nine noise values per year), so a seeded source yields identical output.
/// The config is expected to be validated; an inverted year range simply
/// produces no base records.
pub fn generate<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Dataset {
    let mut dataset = Vec::with_capacity(config.expected_base_records() + ANOMALY_COUNT);

    for country in &config.countries {
        let base = BaseRates::draw(config.regions.for_region(country.region), rng);
        for year in config.start_year..=config.end_year {
            dataset.push(trend_record(config, country, &base, year, rng));
        }
    }

    dataset.extend(anomaly_records());
    dataset
}

/// Per-country starting values, drawn once.
#[derive(Debug, Clone, Copy)]
struct BaseRates {
    depression: f64,
    anxiety: f64,
    bipolar: f64,
    schizophrenia: f64,
    eating_disorders: f64,
    gdp_per_capita: f64,
    urbanization: f64,
    unemployment: f64,
    treatment_coverage: f64,
}

impl BaseRates {
    fn draw<R: Rng + ?Sized>(profile: &RegionProfile, rng: &mut R) -> Self {
        Self {
            depression: profile.depression.sample(rng),
            anxiety: profile.anxiety.sample(rng),
            bipolar: profile.bipolar.sample(rng),
            schizophrenia: profile.schizophrenia.sample(rng),
            eating_disorders: profile.eating_disorders.sample(rng),
            gdp_per_capita: profile.gdp_per_capita.sample(rng),
            urbanization: profile.urbanization.sample(rng),
            unemployment: profile.unemployment.sample(rng),
            treatment_coverage: profile.treatment_coverage.sample(rng),
        }
    }
}

fn trend_record<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    country: &CountrySpec,
    base: &BaseRates,
    year: i32,
    rng: &mut R,
) -> Record {
    let trends = &config.trends;
    let elapsed = f64::from(year - config.start_year);
    let mut trend = |start: f64, yearly_increase: f64| {
        start + yearly_increase * elapsed + noise(config.noise, rng)
    };

    let depression = trend(base.depression, trends.depression);
    let anxiety = trend(base.anxiety, trends.anxiety);
    let bipolar = trend(base.bipolar, trends.bipolar);
    let schizophrenia = trend(base.schizophrenia, trends.schizophrenia);
    let eating_disorders = trend(base.eating_disorders, trends.eating_disorders);
    let gdp_per_capita = trend(
        base.gdp_per_capita,
        base.gdp_per_capita * trends.gdp_growth_rate,
    );
    let urbanization = trend(base.urbanization, trends.urbanization).min(PERCENT_CAP);
    let unemployment = trend(base.unemployment, trends.unemployment);
    let treatment_coverage =
        trend(base.treatment_coverage, trends.treatment_coverage).min(PERCENT_CAP);

    Record {
        country: country.name.clone(),
        year,
        region: country.region,
        depression: round_to(depression, 2),
        anxiety: round_to(anxiety, 2),
        bipolar: round_to(bipolar, 2),
        schizophrenia: round_to(schizophrenia, 2),
        eating_disorders: round_to(eating_disorders, 2),
        gdp_per_capita: gdp_per_capita.round(),
        urbanization: round_to(urbanization, 1),
        unemployment: round_to(unemployment, 1),
        treatment_coverage: round_to(treatment_coverage, 1),
    }
}

fn noise<R: Rng + ?Sized>(amplitude: f64, rng: &mut R) -> f64 {
    if amplitude > 0.0 {
        rng.random_range(-amplitude..amplitude)
    } else {
        0.0
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use mindstat_core::Region;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::config::{CountrySpec, ValueRange};

    fn fixed_config() -> GeneratorConfig {
        let mut config = GeneratorConfig {
            start_year: 2000,
            end_year: 2004,
            countries: vec![CountrySpec::new("Flatland", Region::Oceania)],
            noise: 0.0,
            ..GeneratorConfig::default()
        };
        let profile = &mut config.regions.oceania;
        profile.depression = ValueRange::new(3.0, 3.0);
        profile.gdp_per_capita = ValueRange::new(10000.0, 10000.0);
        profile.urbanization = ValueRange::new(99.0, 99.0);
        profile.unemployment = ValueRange::new(0.2, 0.2);
        profile.treatment_coverage = ValueRange::new(95.0, 95.0);
        config
    }

    #[test]
    fn applies_linear_trends_without_noise() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let data = generate(&fixed_config(), &mut rng);
        let last = &data[4];
        assert_eq!(last.year, 2004);
        assert_eq!(last.depression, 3.4);
        assert_eq!(last.gdp_per_capita, 10800.0);
        assert_eq!(last.unemployment, -0.2);
    }

    #[test]
    fn caps_percentages_at_one_hundred() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let data = generate(&fixed_config(), &mut rng);
        assert_eq!(data[0].urbanization, 99.0);
        assert_eq!(data[4].urbanization, 100.0);
        assert_eq!(data[4].treatment_coverage, 100.0);
    }

    #[test]
    fn rounds_to_field_precision() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(82.46, 1), 82.5);
        assert_eq!(round_to(-0.049, 1), -0.0);
    }
}
