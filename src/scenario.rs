use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::budget::Budget;
use crate::city::City;
use crate::valves::GameLevel;

fn default_width() -> i32 {
    120
}

fn default_height() -> i32 {
    100
}

fn default_level() -> GameLevel {
    GameLevel::Easy
}

fn default_funds() -> i64 {
    20_000
}

fn default_tax() -> u32 {
    7
}

fn default_auto_bulldoze() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_level")]
    pub level: GameLevel,
    #[serde(default = "default_funds")]
    pub funds: i64,
    #[serde(default = "default_tax")]
    pub tax: u32,
    #[serde(default = "default_auto_bulldoze")]
    pub auto_bulldoze: bool,
    #[serde(default)]
    pub periods: Option<u64>,
    #[serde(default)]
    pub zones: Vec<ScenarioZone>,
}

/// A pre-placed empty zone. The kind strings match the tool names.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioZone {
    pub kind: ZoneKind,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Residential,
    Commercial,
    Industrial,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn build_city(&self, seed_override: Option<u64>) -> Result<City> {
        let seed = seed_override.unwrap_or(self.seed);
        let mut city = City::new(self.width, self.height, self.level, seed);
        city.budget = Budget::new(self.funds, self.tax);
        city.auto_bulldoze = self.auto_bulldoze;
        for zone in &self.zones {
            let centre = match zone.kind {
                ZoneKind::Residential => crate::tiles::FREEZ,
                ZoneKind::Commercial => crate::tiles::COMCLR,
                ZoneKind::Industrial => crate::tiles::INDCLR,
            };
            crate::zones::put_zone(&mut city.map, zone.x, zone.y, centre, true).with_context(
                || format!("Scenario zone at ({}, {}) is out of bounds", zone.x, zone.y),
            )?;
        }
        Ok(city)
    }

    pub fn periods(&self, override_periods: Option<u64>) -> u64 {
        override_periods.or(self.periods).unwrap_or(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_omitted_fields() {
        let yaml = "name: tiny\nseed: 9\nzones:\n  - kind: residential\n    x: 4\n    y: 4\n";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.width, 120);
        assert_eq!(scenario.tax, 7);
        assert!(scenario.auto_bulldoze);
        assert_eq!(scenario.periods(None), 50);
        assert_eq!(scenario.periods(Some(3)), 3);

        let city = scenario.build_city(None).unwrap();
        assert_eq!(city.budget.total_funds, 20_000);
        assert!(city.map.get(4, 4).unwrap().is_zone_center());
    }
}
