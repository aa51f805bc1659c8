mod common;

use census_core::{load_grid_config_from_env, run_census, GridConfigSource, SyntheticPopulation};

#[test]
fn env_override_selects_fixture_config() {
    common::ensure_test_config();
    let (config, source) = load_grid_config_from_env();
    assert_eq!(
        source,
        GridConfigSource::File(common::fixture_path("test_census_config.json"))
    );
    assert_eq!(config.cell_width_degrees, 2.0);
    assert_eq!(config.lon_bins().unwrap() * config.lat_bins().unwrap(), 16_200);
    assert_eq!(config.earth_radius_km, 6371.0);
}

#[test]
fn fixture_views_render_on_coarse_grid() {
    common::ensure_test_config();
    let (config, _) = load_grid_config_from_env();
    let records = SyntheticPopulation::new(11, 2_000).records();
    let report = run_census(&config, records).expect("census runs");

    assert_eq!(report.charts.len(), 2);
    let crowding = &report.charts[1];
    assert_eq!(crowding.title, "Crowding");
    assert_eq!(crowding.x_values.len(), 16_200);
    let placed: f64 = crowding.y_values.iter().sum();
    assert_eq!(placed, 2_000.0);
}
