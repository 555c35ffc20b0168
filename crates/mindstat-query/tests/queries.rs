use mindstat_core::{Error, Record, Region};
use mindstat_generate::{CountrySpec, GeneratorConfig, generate};
use mindstat_query::{
    QueryError, coordinates_for, correlation_matrix, filter_by_region, filter_by_year,
    time_series_for,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn record(country: &str, year: i32, region: Region, depression: f64) -> Record {
    Record {
        country: country.to_string(),
        year,
        region,
        depression,
        anxiety: depression + 0.5,
        bipolar: 1.0,
        schizophrenia: 0.4,
        eating_disorders: 0.6,
        gdp_per_capita: 30000.0,
        urbanization: 80.0,
        unemployment: 5.0,
        treatment_coverage: 60.0,
    }
}

fn fixture() -> Vec<Record> {
    vec![
        record("Brasil", 2011, Region::Americas, 3.0),
        record("México", 2011, Region::Americas, 4.0),
        record("Brasil", 2010, Region::Americas, 2.0),
        record("França", 2010, Region::Europe, 5.0),
        record("França", 9, Region::Europe, 1.0),
    ]
}

fn testland() -> Vec<Record> {
    let config = GeneratorConfig {
        start_year: 2018,
        end_year: 2019,
        countries: vec![CountrySpec::new("Testland", Region::Europe)],
        ..GeneratorConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    generate(&config, &mut rng)
}

#[test]
fn global_region_returns_input_unchanged() {
    let data = fixture();
    assert_eq!(filter_by_region(&data, "global").expect("filter"), data);
    assert_eq!(filter_by_region(&data, "GLOBAL").expect("filter"), data);
}

#[test]
fn region_filter_is_case_insensitive() {
    let data = fixture();
    let europe = filter_by_region(&data, "Europe").expect("filter");
    assert_eq!(europe.len(), 2);
    assert!(europe.iter().all(|record| record.region == Region::Europe));
    assert!(filter_by_region(&data, "oceania").expect("filter").is_empty());
}

#[test]
fn unknown_region_is_an_error() {
    let err = filter_by_region(&fixture(), "atlantis").expect_err("unknown region");
    assert!(matches!(err, QueryError::Core(Error::UnknownRegion(_))));
}

#[test]
fn year_filter_accepts_numbers_and_text() {
    let data = testland();
    assert_eq!(data.len(), 5);

    let by_number = filter_by_year(&data, 2019).expect("filter");
    let by_text = filter_by_year(&data, "2019").expect("filter");
    assert_eq!(by_number, by_text);
    assert_eq!(by_number.len(), 4);
    assert_eq!(
        by_number
            .iter()
            .filter(|record| record.country == "Testland")
            .count(),
        1
    );

    let err = filter_by_year(&data, "next year").expect_err("invalid year");
    assert!(matches!(err, QueryError::Core(Error::InvalidYear(_))));
}

#[test]
fn time_series_averages_per_year_in_numeric_order() {
    let points = time_series_for(&fixture(), "depression", "americas").expect("series");
    let years: Vec<i32> = points.iter().map(|point| point.year).collect();
    assert_eq!(years, vec![2010, 2011]);
    assert_eq!(points[0].value, 2.0);
    assert_eq!(points[1].value, 3.5);

    // a string sort would put 9 after 2010
    let europe = time_series_for(&fixture(), "depression", "europe").expect("series");
    let years: Vec<i32> = europe.iter().map(|point| point.year).collect();
    assert_eq!(years, vec![9, 2010]);
}

#[test]
fn time_series_skips_years_without_data() {
    let points = time_series_for(&fixture(), "anxiety", "europe").expect("series");
    assert!(points.iter().all(|point| point.year != 2011));
    assert!(time_series_for(&fixture(), "anxiety", "africa").expect("series").is_empty());
}

#[test]
fn time_series_ignores_non_finite_values() {
    let mut data = fixture();
    data[0].depression = f64::NAN;
    let points = time_series_for(&data, "depression", "global").expect("series");
    let y2011 = points.iter().find(|point| point.year == 2011).expect("2011");
    assert_eq!(y2011.value, 4.0);
}

#[test]
fn time_series_rejects_unknown_and_text_fields() {
    let err = time_series_for(&fixture(), "happiness", "global").expect_err("unknown field");
    assert!(matches!(err, QueryError::Core(Error::FieldNotFound(_))));

    let err = time_series_for(&fixture(), "country", "global").expect_err("text field");
    assert!(matches!(err, QueryError::Core(Error::NonNumericField(_))));
}

#[test]
fn coordinates_use_requested_features() {
    let points =
        coordinates_for(&fixture(), &["gdp_per_capita", "urbanization"], 2011).expect("points");
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].id, "Brasil");
    assert_eq!(points[0].label, "Brasil");
    assert_eq!(points[0].x, 30000.0);
    assert_eq!(points[0].y, 80.0);
}

#[test]
fn coordinates_default_to_depression_and_anxiety() {
    let points = coordinates_for(&fixture(), &["gdp_per_capita"], "2010").expect("points");
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].x, 2.0);
    assert_eq!(points[0].y, 2.5);
}

#[test]
fn coordinates_plot_non_finite_values_at_zero() {
    let mut data = fixture();
    data[3].anxiety = f64::INFINITY;
    let points = coordinates_for(&data, &["depression", "anxiety"], 2010).expect("points");
    let franca = points.iter().find(|point| point.id == "França").expect("França");
    assert_eq!(franca.y, 0.0);
}

#[test]
fn coordinates_reject_unknown_features() {
    let err = coordinates_for(&fixture(), &["depression", "mood"], 2010).expect_err("unknown");
    assert!(matches!(err, QueryError::Core(Error::FieldNotFound(ref name)) if name == "mood"));
}

#[test]
fn correlation_matrix_uses_static_table() {
    let matrix = correlation_matrix(&["depression", "anxiety", "bipolar"]).expect("matrix");
    assert_eq!(matrix.len(), 3);
    for (i, row) in matrix.iter().enumerate() {
        assert_eq!(row.len(), 3);
        assert_eq!(row[i], 1.0);
    }
    assert_eq!(matrix[0][1], 0.72);
    assert_eq!(matrix[1][0], 0.72);
    assert_eq!(matrix[1][2], 0.51);
    assert_eq!(matrix[2][0], 0.58);
}

#[test]
fn correlation_matrix_defaults_uncovered_pairs() {
    let matrix = correlation_matrix(&["depression", "unemployment"]).expect("matrix");
    assert_eq!(matrix[0][1], 0.3);
    assert_eq!(matrix[1][0], 0.3);

    let err = correlation_matrix(&["depression", "loneliness"]).expect_err("unknown field");
    assert!(matches!(err, QueryError::Core(Error::FieldNotFound(_))));
}

#[test]
fn query_results_serialize_to_flat_json() {
    let data = fixture();
    let series = time_series_for(&data, "depression", "americas").expect("series");
    assert_eq!(
        serde_json::to_value(&series).expect("json"),
        serde_json::json!([
            { "year": 2010, "value": 2.0 },
            { "year": 2011, "value": 3.5 },
        ])
    );

    let points = coordinates_for(&data, &["bipolar", "depression"], 2010).expect("points");
    assert_eq!(
        serde_json::to_value(&points).expect("json"),
        serde_json::json!([
            { "id": "Brasil", "label": "Brasil", "x": 1.0, "y": 2.0 },
            { "id": "França", "label": "França", "x": 1.0, "y": 5.0 },
        ])
    );
}
