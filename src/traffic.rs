//! Traffic oracle: can a zone reach a destination class over the road and
//! rail network?
//!
//! The search is a depth-limited breadth-first walk over driveable tiles,
//! so the found/not-found answer is exact within the radius and stable
//! across runs. Attempted trips leave traffic density behind on the block
//! maps whether or not they succeed; disconnected zones still wear out the
//! roads near them.

use pathfinding::directed::bfs::{bfs, bfs_reach};

use crate::block_maps::BlockMaps;
use crate::map::{MapError, TileMap};
use crate::tiles::is_driveable;

/// Maximum drive distance, in tiles, from the zone's perimeter road.
pub const MAX_TRAFFIC_DISTANCE: u32 = 30;

/// Density added to each block along an attempted route.
const TRAFFIC_DENSITY_STEP: i16 = 50;
const TRAFFIC_DENSITY_MAX: i16 = 240;

/// Perimeter of the 3x3 zone block, clockwise from the north-west.
const PERIM_X: [i32; 12] = [-1, 0, 1, 2, 2, 2, 1, 0, -1, -2, -2, -2];
const PERIM_Y: [i32; 12] = [-2, -2, -2, -1, 0, 1, 2, 2, 2, 1, 0, -1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficResult {
    /// A drive reached the destination class.
    RouteFound,
    /// Roads exist at the zone edge but no route reaches the target.
    NoRouteFound,
    /// The zone touches no road or rail at all.
    NoRoadFound,
}

impl TrafficResult {
    /// Whether the zone counts as connected for growth decisions.
    pub fn is_connected(self) -> bool {
        matches!(self, TrafficResult::RouteFound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct DriveNode {
    x: i32,
    y: i32,
    dist: u32,
}

/// Attempt a trip from the zone centred at (x, y) to any tile matching
/// `dest`. Increments traffic density along the attempted route.
pub fn make_traffic(
    map: &TileMap,
    block_maps: &mut BlockMaps,
    x: i32,
    y: i32,
    dest: fn(u16) -> bool,
) -> Result<TrafficResult, MapError> {
    let Some((road_x, road_y)) = find_perimeter_road(map, x, y)? else {
        return Ok(TrafficResult::NoRoadFound);
    };

    let start = DriveNode {
        x: road_x,
        y: road_y,
        dist: 0,
    };
    let successors = |node: &DriveNode| drive_successors(map, *node);
    let reached = |node: &DriveNode| destination_adjacent(map, node.x, node.y, dest);

    if let Some(path) = bfs(&start, successors, reached) {
        for node in &path {
            add_traffic(map, block_maps, node.x, node.y);
        }
        return Ok(TrafficResult::RouteFound);
    }

    // No route: the failed attempt still loads the nearby network.
    for node in bfs_reach(start, successors).take(MAX_TRAFFIC_DISTANCE as usize) {
        add_traffic(map, block_maps, node.x, node.y);
    }
    Ok(TrafficResult::NoRouteFound)
}

/// First driveable tile on the 12-cell ring around the zone, probed in a
/// fixed order so the search origin is reproducible.
pub fn find_perimeter_road(
    map: &TileMap,
    x: i32,
    y: i32,
) -> Result<Option<(i32, i32)>, MapError> {
    for i in 0..PERIM_X.len() {
        let px = x + PERIM_X[i];
        let py = y + PERIM_Y[i];
        if map.in_bounds(px, py) && is_driveable(map.get_value(px, py)?) {
            return Ok(Some((px, py)));
        }
    }
    Ok(None)
}

fn drive_successors(map: &TileMap, node: DriveNode) -> Vec<DriveNode> {
    if node.dist >= MAX_TRAFFIC_DISTANCE {
        return Vec::new();
    }
    let mut next = Vec::with_capacity(4);
    for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
        let nx = node.x + dx;
        let ny = node.y + dy;
        if !map.in_bounds(nx, ny) {
            continue;
        }
        let value = match map.get_value(nx, ny) {
            Ok(value) => value,
            Err(_) => continue,
        };
        if is_driveable(value) {
            next.push(DriveNode {
                x: nx,
                y: ny,
                dist: node.dist + 1,
            });
        }
    }
    next
}

fn destination_adjacent(map: &TileMap, x: i32, y: i32, dest: fn(u16) -> bool) -> bool {
    for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
        let nx = x + dx;
        let ny = y + dy;
        if !map.in_bounds(nx, ny) {
            continue;
        }
        if let Ok(value) = map.get_value(nx, ny) {
            if dest(value) {
                return true;
            }
        }
    }
    false
}

fn add_traffic(map: &TileMap, block_maps: &mut BlockMaps, x: i32, y: i32) {
    let Ok(value) = map.get_value(x, y) else {
        return;
    };
    if !is_driveable(value) {
        return;
    }
    let current = block_maps.traffic_density.world_get(x, y);
    let next = (current + TRAFFIC_DENSITY_STEP).min(TRAFFIC_DENSITY_MAX);
    block_maps.traffic_density.world_set(x, y, next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{self, Tile};

    fn map_with(w: i32, h: i32) -> TileMap {
        TileMap::new(w, h, Tile::default())
    }

    #[test]
    fn roadless_map_reports_no_road() {
        let map = map_with(12, 12);
        let mut block_maps = BlockMaps::new(12, 12);
        for x in 2..10 {
            for y in 2..10 {
                let result =
                    make_traffic(&map, &mut block_maps, x, y, tiles::is_commercial).unwrap();
                assert_eq!(result, TrafficResult::NoRoadFound);
            }
        }
    }

    #[test]
    fn straight_road_to_destination_is_found() {
        let mut map = map_with(16, 16);
        let mut block_maps = BlockMaps::new(16, 16);
        // Road running east from the zone perimeter to a commercial tile.
        for x in 4..12 {
            map.set(x, 6, tiles::ROADS, tiles::BLBNBIT).unwrap();
        }
        map.set(12, 6, tiles::COMCLR, tiles::BNCNBIT).unwrap();

        let result = make_traffic(&map, &mut block_maps, 5, 8, tiles::is_commercial).unwrap();
        assert_eq!(result, TrafficResult::RouteFound);
        // The trip left density on the route.
        assert!(block_maps.traffic_density.world_get(6, 6) > 0);
    }

    #[test]
    fn fully_roaded_grid_connects_every_interior_cell() {
        let mut map = map_with(12, 12);
        let mut block_maps = BlockMaps::new(12, 12);
        for y in 0..12 {
            for x in 0..12 {
                map.set(x, y, tiles::ROADS, tiles::BLBNBIT).unwrap();
            }
        }
        map.set(6, 6, tiles::COMCLR, tiles::BNCNBIT).unwrap();

        // Interior here means the whole perimeter ring is on the map.
        for y in 2..10 {
            for x in 2..10 {
                let result =
                    make_traffic(&map, &mut block_maps, x, y, tiles::is_commercial).unwrap();
                assert_eq!(result, TrafficResult::RouteFound, "origin ({x}, {y})");
            }
        }
    }

    #[test]
    fn road_without_destination_reports_no_route_and_partial_traffic() {
        let mut map = map_with(16, 16);
        let mut block_maps = BlockMaps::new(16, 16);
        for x in 4..9 {
            map.set(x, 6, tiles::ROADS, tiles::BLBNBIT).unwrap();
        }
        let result = make_traffic(&map, &mut block_maps, 5, 8, tiles::is_commercial).unwrap();
        assert_eq!(result, TrafficResult::NoRouteFound);
        assert!(block_maps.traffic_density.world_get(5, 6) > 0);
    }

    #[test]
    fn destination_beyond_radius_is_not_reached() {
        let mut map = map_with(60, 8);
        let mut block_maps = BlockMaps::new(60, 8);
        for x in 4..56 {
            map.set(x, 4, tiles::ROADS, tiles::BLBNBIT).unwrap();
        }
        map.set(56, 4, tiles::COMCLR, tiles::BNCNBIT).unwrap();
        // Zone at x=5: the commercial tile sits ~50 tiles down the road.
        let result = make_traffic(&map, &mut block_maps, 5, 6, tiles::is_commercial).unwrap();
        assert_eq!(result, TrafficResult::NoRouteFound);
    }

    #[test]
    fn rail_counts_as_driveable_infrastructure() {
        let mut map = map_with(16, 16);
        let mut block_maps = BlockMaps::new(16, 16);
        for x in 4..12 {
            map.set(x, 6, tiles::LHRAIL, tiles::BLBNBIT).unwrap();
        }
        map.set(12, 6, tiles::INDCLR, tiles::BNCNBIT).unwrap();
        let result = make_traffic(&map, &mut block_maps, 5, 8, tiles::is_industrial).unwrap();
        assert_eq!(result, TrafficResult::RouteFound);
    }
}
