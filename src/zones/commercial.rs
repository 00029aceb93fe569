//! Commercial zone lifecycle. Same machine as residential with its own
//! thresholds: five density tiers above the empty state, and shops only
//! thrive when their customers can drive in from industry.

use crate::city::City;
use crate::map::MapError;
use crate::tiles::{self, BLBNCNBIT, COMCLR, CZB, ZONEBIT};
use crate::traffic::{self, TrafficResult};
use crate::zones::{self, MapScanner};

pub fn register(scanner: &mut MapScanner) {
    scanner.add_action(matches_commercial_centre, commercial_found);
}

fn matches_commercial_centre(value: u16, flags: u16) -> bool {
    flags & ZONEBIT != 0 && tiles::is_commercial_zone(value)
}

/// Density tier 0 (empty) to 5 of the zone whose centre value is given.
pub fn zone_population(value: u16) -> i32 {
    if value == COMCLR {
        return 0;
    }
    (i32::from(value) - i32::from(CZB)) / 9 % 5 + 1
}

fn place_commercial(
    city: &mut City,
    x: i32,
    y: i32,
    tier: i32,
    lp_tier: u16,
    powered: bool,
) -> Result<(), MapError> {
    let centre = (lp_tier * 5 + tier as u16) * 9 + CZB;
    zones::put_zone(&mut city.map, x, y, centre, powered)
}

fn do_migration_in(
    city: &mut City,
    x: i32,
    y: i32,
    population: i32,
    lp_tier: u16,
    powered: bool,
) -> Result<(), MapError> {
    if population < 5 {
        place_commercial(city, x, y, population, lp_tier, powered)?;
        zones::adjust_rate_of_growth(city, x, y, 8);
    }
    Ok(())
}

fn do_migration_out(
    city: &mut City,
    x: i32,
    y: i32,
    population: i32,
    lp_tier: u16,
    powered: bool,
) -> Result<(), MapError> {
    if population > 1 {
        place_commercial(city, x, y, population - 2, lp_tier, powered)?;
        zones::adjust_rate_of_growth(city, x, y, -8);
        return Ok(());
    }
    if population == 1 {
        city.map.set(x, y, COMCLR, BLBNCNBIT | ZONEBIT)?;
        zones::adjust_rate_of_growth(city, x, y, -8);
    }
    Ok(())
}

fn eval_commercial(city: &City, x: i32, y: i32, traffic: TrafficResult) -> i32 {
    if traffic == TrafficResult::NoRoadFound {
        return -3000;
    }
    let mut land_value = i32::from(city.block_maps.land_value.world_get(x, y))
        - i32::from(city.block_maps.pollution_density.world_get(x, y));
    if land_value < 0 {
        land_value = 0;
    } else {
        land_value = (land_value * 32).min(6000);
    }
    land_value - 3000
}

fn commercial_found(city: &mut City, x: i32, y: i32) -> Result<(), MapError> {
    city.census.com_zone_pop += 1;
    let tile = city.map.get(x, y)?;
    let value = tile.value();
    let population = zone_population(value);
    city.census.com_pop += population;
    let powered = tile.is_powered();

    let mut traffic_ok = TrafficResult::RouteFound;
    if population > i32::from(city.rng.get_random(5)) {
        // Shops need goods trucked in from industry.
        traffic_ok = traffic::make_traffic(
            &city.map,
            &mut city.block_maps,
            x,
            y,
            tiles::is_industrial,
        )?;

        if traffic_ok == TrafficResult::NoRoadFound {
            let lp_tier = zones::land_pollution_tier(city, x, y);
            do_migration_out(city, x, y, population, lp_tier, powered)?;
            return Ok(());
        }
    }

    if value == COMCLR || city.rng.get_chance(7) {
        let location_score = eval_commercial(city, x, y, traffic_ok);
        let mut zone_score = city.valves.com_valve + location_score;
        if !powered {
            zone_score = -500;
        }

        if traffic_ok.is_connected()
            && zone_score > -350
            && zone_score - 26380 > i32::from(city.rng.get_random16_signed())
        {
            let lp_tier = zones::land_pollution_tier(city, x, y);
            do_migration_in(city, x, y, population, lp_tier, powered)?;
            return Ok(());
        }

        if zone_score < 350 && zone_score + 26380 < i32::from(city.rng.get_random16_signed()) {
            let lp_tier = zones::land_pollution_tier(city, x, y);
            do_migration_out(city, x, y, population, lp_tier, powered)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valves::GameLevel;

    #[test]
    fn population_tiers_cycle_through_land_bands() {
        assert_eq!(zone_population(COMCLR), 0);
        assert_eq!(zone_population(CZB), 1);
        assert_eq!(zone_population(CZB + 9), 2);
        assert_eq!(zone_population(CZB + 4 * 9), 5);
        // Tier repeats in the next land-value band.
        assert_eq!(zone_population(CZB + 5 * 9), 1);
        // Values below the first built centre stay in range too.
        assert_eq!(zone_population(CZB - 6), 1);
    }

    #[test]
    fn migration_cycle_returns_to_empty_centre() {
        let mut city = City::new(16, 16, GameLevel::Easy, 3);
        zones::put_zone(&mut city.map, 8, 8, COMCLR, true).unwrap();

        for tier in 0..5 {
            do_migration_in(&mut city, 8, 8, tier, 2, true).unwrap();
        }
        assert_eq!(zone_population(city.map.get_value(8, 8).unwrap()), 5);

        for tier in (1..=5).rev() {
            do_migration_out(&mut city, 8, 8, tier, 2, true).unwrap();
        }
        assert_eq!(city.map.get_value(8, 8).unwrap(), COMCLR);
        assert!(city.map.get(8, 8).unwrap().is_zone_center());
    }
}
