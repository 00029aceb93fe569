use gridcity::rng::ScriptedRng;
use gridcity::tiles::{self, FREEZ, HHTHR, LHTHR};
use gridcity::zones::put_zone;
use gridcity::{City, Engine, GameLevel};

fn count_houses(city: &City, cx: i32, cy: i32) -> i32 {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let value = city.map.get_value(cx + dx, cy + dy).unwrap();
            if (LHTHR..=HHTHR).contains(&value) {
                count += 1;
            }
        }
    }
    count
}

/// Scripted draws walking a four-house free zone through one growth step:
/// the demand gate passes and exactly one house lands on the best lot,
/// which sits next to the road.
#[test]
fn free_zone_gains_a_house_when_demand_says_grow() {
    let mut city = City::with_randomizer(
        16,
        16,
        GameLevel::Easy,
        Box::new(ScriptedRng::new(vec![0x0000, 0x8000, 0x0001])),
    );
    put_zone(&mut city.map, 8, 8, FREEZ, true).unwrap();
    for (hx, hy) in [(7, 7), (8, 7), (9, 7), (9, 8)] {
        city.map.set(hx, hy, tiles::HOUSE, tiles::BLBNCNBIT).unwrap();
    }
    // A road on the perimeter with a shop next to it: the commute the
    // residents attempt succeeds.
    city.map.set(6, 8, tiles::ROADS, tiles::BLBNBIT).unwrap();
    city.map.set(6, 7, tiles::COMCLR, tiles::BNCNBIT).unwrap();
    // High land value makes the location score positive.
    city.block_maps.land_value.world_set(8, 8, 160);

    let mut engine = Engine::new(city);
    let first = engine.simulate_period().unwrap();
    assert_eq!(first.res_pop, 4);
    assert_eq!(count_houses(&engine.city, 8, 8), 5);
    // The road-adjacent lot wins the scoring.
    let placed = engine.city.map.get_value(7, 8).unwrap();
    assert!((LHTHR..=HHTHR).contains(&placed), "placed {placed}");
    // One house means a +1 nudge, scaled by the block-map accumulator.
    assert_eq!(engine.city.block_maps.rate_of_growth.world_get(8, 8), 4);

    // The next census sees the new resident.
    let second = engine.simulate_period().unwrap();
    assert_eq!(second.res_pop, 5);
    assert_eq!(count_houses(&engine.city, 8, 8), 5);
}

#[test]
fn unpowered_zones_never_grow() {
    let mut city = City::with_randomizer(
        16,
        16,
        GameLevel::Easy,
        Box::new(ScriptedRng::new(vec![0x0000, 0x8000, 0x0001, 0x0001])),
    );
    put_zone(&mut city.map, 8, 8, FREEZ, false).unwrap();
    city.map.set(6, 8, tiles::ROADS, tiles::BLBNBIT).unwrap();
    city.block_maps.land_value.world_set(8, 8, 160);

    let mut engine = Engine::new(city);
    engine.simulate_period().unwrap();
    assert_eq!(count_houses(&engine.city, 8, 8), 0);
}

#[test]
fn identical_seeds_give_identical_runs() {
    let run = |seed: u64| {
        let mut city = City::new(32, 32, GameLevel::Medium, seed);
        for (i, kind) in [FREEZ, tiles::COMCLR, tiles::INDCLR].iter().enumerate() {
            put_zone(&mut city.map, 6 + 6 * i as i32, 8, *kind, true).unwrap();
        }
        for x in 3..24 {
            city.map.set(x, 10, tiles::ROADS, tiles::BLBNBIT).unwrap();
        }
        let mut engine = Engine::new(city);
        let mut trace = Vec::new();
        for _ in 0..20 {
            let s = engine.simulate_period().unwrap();
            trace.push((s.total_pop, s.res_valve, s.com_valve, s.ind_valve));
        }
        let mut grid = Vec::new();
        for y in 0..engine.city.map.height() {
            for x in 0..engine.city.map.width() {
                grid.push(engine.city.map.get(x, y).unwrap().raw());
            }
        }
        (trace, grid)
    };

    assert_eq!(run(1234), run(1234));
    // A different seed should not replay the same draw sequence forever.
    let (trace_a, _) = run(1234);
    let (trace_b, _) = run(4321);
    assert_eq!(trace_a.len(), trace_b.len());
}
