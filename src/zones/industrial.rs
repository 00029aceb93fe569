//! Industrial zone lifecycle. Four density tiers, two land bands (industry
//! shrugs at land value but needs a workforce within driving range).

use crate::city::City;
use crate::map::MapError;
use crate::tiles::{self, BLBNCNBIT, INDCLR, IZB, ZONEBIT};
use crate::traffic::{self, TrafficResult};
use crate::zones::{self, MapScanner};

pub fn register(scanner: &mut MapScanner) {
    scanner.add_action(matches_industrial_centre, industrial_found);
}

fn matches_industrial_centre(value: u16, flags: u16) -> bool {
    flags & ZONEBIT != 0 && tiles::is_industrial_zone(value)
}

/// Density tier 0 (empty) to 4 of the zone whose centre value is given.
pub fn zone_population(value: u16) -> i32 {
    if value == INDCLR {
        return 0;
    }
    (i32::from(value) - i32::from(IZB)) / 9 % 4 + 1
}

fn place_industrial(
    city: &mut City,
    x: i32,
    y: i32,
    tier: i32,
    lp_tier: u16,
    powered: bool,
) -> Result<(), MapError> {
    // Industry only distinguishes low and high land bands.
    let band = lp_tier / 2;
    let centre = (band * 4 + tier as u16) * 9 + IZB;
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
    if population < 4 {
        place_industrial(city, x, y, population, lp_tier, powered)?;
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
        place_industrial(city, x, y, population - 2, lp_tier, powered)?;
        zones::adjust_rate_of_growth(city, x, y, -8);
        return Ok(());
    }
    if population == 1 {
        city.map.set(x, y, INDCLR, BLBNCNBIT | ZONEBIT)?;
        zones::adjust_rate_of_growth(city, x, y, -8);
    }
    Ok(())
}

/// Industry does not price land; a routed zone scores neutral.
fn eval_industrial(traffic: TrafficResult) -> i32 {
    if traffic == TrafficResult::NoRoadFound {
        return -1000;
    }
    0
}

fn industrial_found(city: &mut City, x: i32, y: i32) -> Result<(), MapError> {
    city.census.ind_zone_pop += 1;
    let tile = city.map.get(x, y)?;
    let value = tile.value();
    let population = zone_population(value);
    city.census.ind_pop += population;
    let powered = tile.is_powered();

    let mut traffic_ok = TrafficResult::RouteFound;
    if population > i32::from(city.rng.get_random(4)) {
        // Factories need workers living within driving range.
        traffic_ok = traffic::make_traffic(
            &city.map,
            &mut city.block_maps,
            x,
            y,
            tiles::is_residential_zone,
        )?;

        if traffic_ok == TrafficResult::NoRoadFound {
            let lp_tier = zones::land_pollution_tier(city, x, y);
            do_migration_out(city, x, y, population, lp_tier, powered)?;
            return Ok(());
        }
    }

    if value == INDCLR || city.rng.get_chance(7) {
        let location_score = eval_industrial(traffic_ok);
        let mut zone_score = city.valves.ind_valve + location_score;
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
