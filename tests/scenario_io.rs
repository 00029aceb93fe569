use std::fs;

use gridcity::{Engine, GameLevel, ScenarioLoader};

#[test]
fn shipped_scenario_loads_and_runs() {
    let loader = ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"));
    let scenario = loader.load("scenarios/riverside.yaml").unwrap();
    assert_eq!(scenario.name, "riverside");

    let city = scenario.build_city(None).unwrap();
    assert_eq!(city.map.width(), 64);
    assert_eq!(city.map.height(), 48);
    assert_eq!(city.budget.total_funds, 20_000);
    assert!(city.map.get(10, 10).unwrap().is_zone_center());

    let mut engine = Engine::new(city);
    for _ in 0..3 {
        engine.simulate_period().unwrap();
    }
    assert_eq!(engine.period(), 3);
}

#[test]
fn omitted_fields_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("bare.yaml"),
        "name: bare\nseed: 77\n",
    )
    .unwrap();

    let loader = ScenarioLoader::new(dir.path());
    let scenario = loader.load("bare.yaml").unwrap();
    assert_eq!(scenario.width, 120);
    assert_eq!(scenario.height, 100);
    assert!(matches!(scenario.level, GameLevel::Easy));
    assert_eq!(scenario.periods(None), 50);

    let city = scenario.build_city(Some(5)).unwrap();
    assert!(city.auto_bulldoze);
    assert_eq!(city.budget.city_tax, 7);
}

#[test]
fn missing_or_malformed_scenarios_error_with_context() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ScenarioLoader::new(dir.path());

    let err = loader.load("absent.yaml").unwrap_err();
    assert!(err.to_string().contains("absent.yaml"));

    fs::write(dir.path().join("broken.yaml"), "name: [unclosed\n").unwrap();
    assert!(loader.load("broken.yaml").is_err());
}

#[test]
fn out_of_bounds_scenario_zone_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("edge.yaml"),
        "name: edge\nseed: 1\nwidth: 10\nheight: 10\nzones:\n  - kind: industrial\n    x: 0\n    y: 0\n",
    )
    .unwrap();

    let loader = ScenarioLoader::new(dir.path());
    let scenario = loader.load("edge.yaml").unwrap();
    // The 3x3 stamp would spill over the map edge.
    assert!(scenario.build_city(None).is_err());
}
