mod common;

use census_core::{load_records, run_census, Coordinate, GridConfig, SpatialGrid, View};

fn small_report() -> census_core::CensusReport {
    let records = load_records(&common::fixture_path("agents_small.json")).expect("fixture loads");
    run_census(&GridConfig::default(), records).expect("census runs")
}

#[test]
fn fixture_population_is_placed() {
    let report = small_report();
    assert_eq!(report.summary.records, 9);
    assert_eq!(report.summary.occupied_zones, 7);
    assert_eq!(report.charts.len(), 3);
}

#[test]
fn density_chart_covers_every_zone() {
    let report = small_report();
    let chart = &report.charts[0];
    assert_eq!(chart.title, View::agreeableness_by_density().title);
    assert_eq!(chart.x_values.len(), 64_800);
    assert_eq!(chart.y_values.len(), 64_800);

    let zone_index = 123 * 360 + 280;
    let grid = SpatialGrid::default();
    let position = Coordinate::new(100.0, 33.0).unwrap();
    assert_eq!(grid.cell_index_for(&position), zone_index);
    assert_eq!(chart.y_values[zone_index], 0.75);
    assert!(chart.x_values[zone_index] > 0.0);

    let occupied = chart.x_values.iter().filter(|density| **density > 0.0).count();
    assert_eq!(occupied, 7);
}

#[test]
fn age_charts_average_per_bucket() {
    let report = small_report();
    let agreeableness = &report.charts[1];
    let income = &report.charts[2];
    assert_eq!(income.title, "Older people have more money");
    assert_eq!(income.x_values.len(), 100);
    assert_eq!(agreeableness.y_values.len(), 100);

    assert_eq!(income.y_values[20], 50.0);
    assert_eq!(income.y_values[45], 50.0);
    assert_eq!(income.y_values[99], 10.0);
    assert_eq!(income.y_values[0], 0.0);
    assert_eq!(income.y_values[37], 0.0);

    assert_eq!(agreeableness.y_values[20], 0.75);
    assert!((agreeableness.y_values[45] - 0.3).abs() < 1e-12);
    assert_eq!(agreeableness.y_values[0], 1.0);
}

#[test]
fn charts_serialize_for_the_renderer() {
    let report = small_report();
    let json = serde_json::to_value(&report.charts).expect("charts serialize");
    let first = &json[0];
    assert_eq!(first["x_label"], "population density");
    assert_eq!(first["y_label"], "agreeableness");
    assert_eq!(first["x_values"].as_array().map(Vec::len), Some(64_800));
}
