use std::path::PathBuf;
use std::sync::Once;

static INIT: Once = Once::new();

#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[allow(dead_code)]
pub fn ensure_test_config() {
    INIT.call_once(|| {
        let config_path = fixture_path("test_census_config.json");

        debug_assert!(
            config_path.exists(),
            "missing test census config at {}",
            config_path.display()
        );

        std::env::set_var("CENSUS_CONFIG_PATH", &config_path);
    });
}
