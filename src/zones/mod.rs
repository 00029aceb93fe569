//! Zone lifecycle engine: the full-grid scan and the helpers every zone
//! class shares.
//!
//! Handlers run in raster order, one full scan per simulation period.
//! A handler mutates only its own 3x3 block, but it reads neighbours that
//! may or may not have been visited this period - that interleaving is
//! part of the growth pattern and must not be reordered.

mod commercial;
mod industrial;
mod residential;

pub use commercial::register as register_commercial;
pub use industrial::register as register_industrial;
pub use residential::register as register_residential;
pub use residential::zone_population as residential_population;

use crate::city::City;
use crate::map::{MapError, TileMap};
use crate::tiles::{BNCNBIT, PWRBIT, ZONEBIT};

pub type ZoneHandler = fn(&mut City, i32, i32) -> Result<(), MapError>;
pub type ZoneMatcher = fn(value: u16, flags: u16) -> bool;

/// Ordered (matcher, handler) registry driving the per-period scan.
#[derive(Default)]
pub struct MapScanner {
    actions: Vec<(ZoneMatcher, ZoneHandler)>,
}

impl MapScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(&mut self, matcher: ZoneMatcher, handler: ZoneHandler) {
        self.actions.push((matcher, handler));
    }

    /// One full raster-order pass. The first matching action wins for a
    /// given cell.
    pub fn scan(&self, city: &mut City) -> Result<(), MapError> {
        for y in 0..city.map.height() {
            for x in 0..city.map.width() {
                let tile = city.map.get(x, y)?;
                let (value, flags) = (tile.value(), tile.flags());
                for (matcher, handler) in &self.actions {
                    if matcher(value, flags) {
                        handler(city, x, y)?;
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Stamp a powered or unpowered 3x3 zone: values centre-4 .. centre+4,
/// burnable and conductive throughout, zone-centre flag (and power) only
/// in the middle.
pub fn put_zone(
    map: &mut TileMap,
    x: i32,
    y: i32,
    centre_value: u16,
    powered: bool,
) -> Result<(), MapError> {
    let mut value = centre_value - 4;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let flags = if dx == 0 && dy == 0 {
                BNCNBIT | ZONEBIT | if powered { PWRBIT } else { 0 }
            } else {
                BNCNBIT
            };
            map.set(x + dx, y + dy, value, flags)?;
            value += 1;
        }
    }
    Ok(())
}

/// Land-value tier 0..=3 for the block at (x, y): land value net of
/// pollution, banded at 30 / 80 / 150.
pub fn land_pollution_tier(city: &City, x: i32, y: i32) -> u16 {
    let land_value = i32::from(city.block_maps.land_value.world_get(x, y))
        - i32::from(city.block_maps.pollution_density.world_get(x, y));
    if land_value < 30 {
        0
    } else if land_value < 80 {
        1
    } else if land_value < 150 {
        2
    } else {
        3
    }
}

/// Nudge the growth-rate accumulator for the block containing (x, y).
/// Single-house transitions pass +/-1, density-tier transitions +/-8.
pub fn adjust_rate_of_growth(city: &mut City, x: i32, y: i32, amount: i16) {
    let current = city.block_maps.rate_of_growth.world_get(x, y);
    let next = (current + amount * 4).clamp(-200, 200);
    city.block_maps.rate_of_growth.world_set(x, y, next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{self, Tile};
    use crate::valves::GameLevel;

    #[test]
    fn put_zone_centre_carries_zone_and_power_flags() {
        let mut map = TileMap::new(8, 8, Tile::default());
        put_zone(&mut map, 4, 4, tiles::FREEZ, true).unwrap();
        let centre = map.get(4, 4).unwrap();
        assert!(centre.is_zone_center());
        assert!(centre.is_powered());
        assert_eq!(centre.value(), tiles::FREEZ);
        let corner = map.get(3, 3).unwrap();
        assert!(!corner.is_zone_center());
        assert_eq!(corner.value(), tiles::FREEZ - 4);
    }

    #[test]
    fn growth_rate_adjustment_scales_and_clamps() {
        let mut city = City::new(16, 16, GameLevel::Easy, 1);
        adjust_rate_of_growth(&mut city, 4, 4, 8);
        assert_eq!(city.block_maps.rate_of_growth.world_get(4, 4), 32);
        for _ in 0..20 {
            adjust_rate_of_growth(&mut city, 4, 4, 8);
        }
        assert_eq!(city.block_maps.rate_of_growth.world_get(4, 4), 200);
    }

    #[test]
    fn land_pollution_tier_bands() {
        let mut city = City::new(16, 16, GameLevel::Easy, 1);
        city.block_maps.land_value.world_set(2, 2, 160);
        assert_eq!(land_pollution_tier(&city, 2, 2), 3);
        city.block_maps.pollution_density.world_set(2, 2, 100);
        assert_eq!(land_pollution_tier(&city, 2, 2), 1);
        city.block_maps.pollution_density.world_set(2, 2, 200);
        assert_eq!(land_pollution_tier(&city, 2, 2), 0);
    }

    #[test]
    fn scanner_dispatches_first_matching_action() {
        fn match_freez(value: u16, flags: u16) -> bool {
            value == tiles::FREEZ && flags & tiles::ZONEBIT != 0
        }
        fn count(city: &mut City, x: i32, _y: i32) -> Result<(), MapError> {
            city.census.res_zone_pop += 1;
            assert_eq!(x, 4);
            Ok(())
        }
        let mut city = City::new(16, 16, GameLevel::Easy, 1);
        put_zone(&mut city.map, 4, 4, tiles::FREEZ, false).unwrap();
        let mut scanner = MapScanner::new();
        scanner.add_action(match_freez, count);
        scanner.scan(&mut city).unwrap();
        assert_eq!(city.census.res_zone_pop, 1);
    }
}
