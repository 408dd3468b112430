// Shared proptest configuration.
//
// PROPTEST_CASES overrides the case count (default 64).

pub fn proptest_prelude_config() -> proptest::prelude::ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(64)
        .max(1);

    proptest::prelude::ProptestConfig {
        failure_persistence: None,
        cases,
        ..proptest::prelude::ProptestConfig::default()
    }
}
