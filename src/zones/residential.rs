//! Residential zone lifecycle.
//!
//! Built zones hold populations of 16, 24, 32 or 40 depending on density
//! tier; the empty "free zone" state holds 0..=8 individual houses counted
//! from the ring around the centre. Centre tiles are laid out in
//! increasing order of land value, cycling through each density tier.

use crate::city::City;
use crate::map::MapError;
use crate::tiles::{
    self, BLBNCNBIT, FREEZ, HHTHR, HOSPITAL, HOUSE, LASTROAD, LHTHR, PWRBIT, RESBASE, RZB,
    ZONEBIT,
};
use crate::traffic::{self, TrafficResult};
use crate::zones::{self, MapScanner};

/// Ring scan order used when demolishing a single house: column-major
/// position index -> raster offset into the 3x3 block.
const FREE_ZONE_ORDER: [u16; 9] = [0, 3, 6, 1, 4, 7, 2, 5, 8];

pub fn register(scanner: &mut MapScanner) {
    scanner.add_action(matches_residential_centre, residential_found);
    scanner.add_action(matches_hospital, hospital_found);
}

fn matches_residential_centre(value: u16, flags: u16) -> bool {
    flags & ZONEBIT != 0 && tiles::is_residential_zone(value)
}

fn matches_hospital(value: u16, flags: u16) -> bool {
    flags & ZONEBIT != 0 && value == HOSPITAL
}

/// Population of the zone centred at (x, y). Free zones report their
/// house count; built zones derive it from the centre tile's density tier.
pub fn zone_population(city: &City, x: i32, y: i32, value: u16) -> Result<i32, MapError> {
    if value == FREEZ {
        return free_zone_population(city, x, y);
    }
    // Signed arithmetic: centre values below RZB are legal per the tile
    // invariants even though the lifecycle never writes them.
    let tier = (i32::from(value) - i32::from(RZB)) / 9 % 4;
    Ok(tier * 8 + 16)
}

fn free_zone_population(city: &City, x: i32, y: i32) -> Result<i32, MapError> {
    let mut count = 0;
    for xx in x - 1..=x + 1 {
        for yy in y - 1..=y + 1 {
            if xx == x && yy == y {
                continue;
            }
            let value = city.map.get_value(xx, yy)?;
            if (LHTHR..=HHTHR).contains(&value) {
                count += 1;
            }
        }
    }
    Ok(count)
}

fn place_residential(
    city: &mut City,
    x: i32,
    y: i32,
    tier: i32,
    lp_tier: u16,
    powered: bool,
) -> Result<(), MapError> {
    let centre = (lp_tier * 4 + tier as u16) * 9 + RZB;
    zones::put_zone(&mut city.map, x, y, centre, powered)
}

/// Score a lot for a new house: 1 plus one point per orthogonal neighbour
/// that is developed but still road-reachable. -1 marks an unusable lot.
fn eval_lot(city: &City, x: i32, y: i32) -> Result<i32, MapError> {
    if !city.map.in_bounds(x, y) {
        return Ok(-1);
    }
    let value = city.map.get_value(x, y)?;
    if !(RESBASE..=RESBASE + 8).contains(&value) {
        return Ok(-1);
    }
    let mut score = 1;
    for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
        if !city.map.in_bounds(x + dx, y + dy) {
            continue;
        }
        let neighbour = city.map.get_value(x + dx, y + dy)?;
        if neighbour != tiles::DIRT && neighbour <= LASTROAD {
            score += 1;
        }
    }
    Ok(score)
}

fn build_house(city: &mut City, x: i32, y: i32, lp_tier: u16) -> Result<(), MapError> {
    let mut best = 0;
    let mut best_score = 0;

    // Index 0 is the centre and is never scored; best == 0 means no
    // suitable lot.
    let x_delta = [0, -1, 0, 1, -1, 1, -1, 0, 1];
    let y_delta = [0, -1, -1, -1, 0, 0, 1, 1, 1];

    for i in 1..9 {
        let score = eval_lot(city, x + x_delta[i], y + y_delta[i])?;
        if score > best_score {
            best_score = score;
            best = i;
        } else if score == best_score && score > 0 && city.rng.get_chance(7) {
            // Re-pick on ties so growth does not always favour the same
            // corner.
            best = i;
        }
    }

    if best > 0 {
        let house = HOUSE + city.rng.get_random(2) + lp_tier * 3;
        city.map
            .set(x + x_delta[best], y + y_delta[best], house, BLBNCNBIT)?;
    }
    Ok(())
}

fn do_migration_in(
    city: &mut City,
    x: i32,
    y: i32,
    population: i32,
    lp_tier: u16,
    powered: bool,
) -> Result<(), MapError> {
    // Nobody moves into a smog bank.
    if city.block_maps.pollution_density.world_get(x, y) > 128 {
        return Ok(());
    }

    let value = city.map.get_value(x, y)?;
    if value == FREEZ {
        if population < 8 {
            build_house(city, x, y, lp_tier)?;
            zones::adjust_rate_of_growth(city, x, y, 1);
            return Ok(());
        }
        if city.block_maps.population_density.world_get(x, y) > 64 {
            // Local demand supports higher density: consolidate the
            // houses into a built zone at the lowest tier.
            place_residential(city, x, y, 0, lp_tier, powered)?;
            zones::adjust_rate_of_growth(city, x, y, 8);
            return Ok(());
        }
    }

    if population < 40 {
        place_residential(city, x, y, population / 8 - 1, lp_tier, powered)?;
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
    if population == 0 {
        return Ok(());
    }

    if population > 16 {
        // Step down one density tier.
        place_residential(city, x, y, (population - 24) / 8, lp_tier, powered)?;
        zones::adjust_rate_of_growth(city, x, y, -8);
        return Ok(());
    }

    if population == 16 {
        // Lowest built tier: dissolve back into eight individual houses.
        // Power is a property of the zone, not the density tier.
        let power = if powered { PWRBIT } else { 0 };
        city.map.set(x, y, FREEZ, BLBNCNBIT | ZONEBIT | power)?;
        for yy in y - 1..=y + 1 {
            for xx in x - 1..=x + 1 {
                if xx == x && yy == y {
                    continue;
                }
                let house = LHTHR + lp_tier + city.rng.get_random(2);
                city.map.set(xx, yy, house, BLBNCNBIT)?;
            }
        }
        zones::adjust_rate_of_growth(city, x, y, -8);
        return Ok(());
    }

    // Down to individual houses: remove the first one found, scanning the
    // block in the fixed column-major order.
    zones::adjust_rate_of_growth(city, x, y, -1);
    let mut i = 0;
    for xx in x - 1..=x + 1 {
        for yy in y - 1..=y + 1 {
            let value = city.map.get_value(xx, yy)?;
            if (LHTHR..=HHTHR).contains(&value) {
                city.map
                    .set(xx, yy, FREE_ZONE_ORDER[i] + RESBASE, BLBNCNBIT)?;
                return Ok(());
            }
            i += 1;
        }
    }
    Ok(())
}

/// Location desirability: land value net of pollution, scaled onto
/// -3000..=3000. Untraveled zones are strongly undesirable.
fn eval_residential(city: &City, x: i32, y: i32, traffic: TrafficResult) -> i32 {
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

fn residential_found(city: &mut City, x: i32, y: i32) -> Result<(), MapError> {
    city.census.res_zone_pop += 1;
    let tile = city.map.get(x, y)?;
    let value = tile.value();
    let population = zone_population(city, x, y, value)?;
    city.census.res_pop += population;
    let powered = tile.is_powered();

    let mut traffic_ok = TrafficResult::RouteFound;
    if population > i32::from(city.rng.get_random(35)) {
        // Residents try driving to commercial districts.
        traffic_ok = traffic::make_traffic(
            &city.map,
            &mut city.block_maps,
            x,
            y,
            tiles::is_commercial,
        )?;

        if traffic_ok == TrafficResult::NoRoadFound {
            // Growing but disconnected: people leave immediately.
            let lp_tier = zones::land_pollution_tier(city, x, y);
            do_migration_out(city, x, y, population, lp_tier, powered)?;
            return Ok(());
        }
    }

    // Only occasionally reassess an established zone; always assess an
    // empty one.
    if value == FREEZ || city.rng.get_chance(7) {
        let location_score = eval_residential(city, x, y, traffic_ok);
        let mut zone_score = city.valves.res_valve + location_score;
        if !powered {
            zone_score = -500;
        }

        if traffic_ok.is_connected()
            && zone_score > -350
            && zone_score - 26380 > i32::from(city.rng.get_random16_signed())
        {
            if population == 0 && city.rng.get_random16() & 3 == 0 {
                make_hospital(city, x, y, powered)?;
                return Ok(());
            }
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

/// An empty zone with pent-up demand occasionally becomes the hospital the
/// city has been asking for.
fn make_hospital(city: &mut City, x: i32, y: i32, powered: bool) -> Result<(), MapError> {
    if city.census.need_hospital > 0 {
        zones::put_zone(&mut city.map, x, y, HOSPITAL, powered)?;
        city.census.need_hospital = 0;
    }
    Ok(())
}

fn hospital_found(city: &mut City, x: i32, y: i32) -> Result<(), MapError> {
    city.census.hospital_pop += 1;
    // One hospital too many: occasionally hand the block back to housing.
    if city.census.need_hospital == -1 && city.rng.get_random(20) == 0 {
        zones::put_zone(&mut city.map, x, y, FREEZ, false)?;
    }
    Ok(())
}
