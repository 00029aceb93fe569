//! Construction tools: validated, costed, atomic grid mutations.
//!
//! A tool gesture accumulates writes in a [`WorldEffects`] buffer instead
//! of touching the shared map, so the whole gesture can be thrown away if
//! the funding check fails. Commit is all-or-nothing; a half-built bridge
//! never reaches the grid.

mod buildings;
mod bulldozer;
mod rail;
mod road;
mod wire;

pub use buildings::{ZoneTool, ZoneType};
pub use bulldozer::BulldozerTool;
pub use rail::RailTool;
pub use road::RoadTool;
pub use wire::WireTool;

use std::collections::BTreeMap;

use tracing::debug;

use crate::budget::Budget;
use crate::map::{MapError, TileMap};
use crate::tiles::{self, Tile, DIRT};

/// Outcome of applying a tool at a cell, or of committing a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolResult {
    Ok,
    Failed,
    NeedsBulldoze,
    NoMoney,
}

/// Write-ahead buffer over the tile map. Reads fall through to the map;
/// writes stay here until [`WorldEffects::apply_to`] commits them. The
/// ordered key keeps the commit order deterministic.
#[derive(Debug, Default)]
pub struct WorldEffects {
    writes: BTreeMap<(i32, i32), Tile>,
}

impl WorldEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_value(&self, map: &TileMap, x: i32, y: i32) -> Result<u16, MapError> {
        match self.writes.get(&(x, y)) {
            Some(tile) => Ok(tile.value()),
            None => map.get_value(x, y),
        }
    }

    pub fn get_tile(&self, map: &TileMap, x: i32, y: i32) -> Result<Tile, MapError> {
        match self.writes.get(&(x, y)) {
            Some(tile) => Ok(*tile),
            None => map.get(x, y),
        }
    }

    /// Buffer a write. Bounds and tile invariants are validated now, at
    /// gesture time, so commit cannot fail halfway through.
    pub fn set_tile(
        &mut self,
        map: &TileMap,
        x: i32,
        y: i32,
        value: u16,
        flags: u16,
    ) -> Result<(), MapError> {
        if !map.in_bounds(x, y) {
            return Err(MapError::InvalidCoordinate {
                x,
                y,
                width: map.width(),
                height: map.height(),
            });
        }
        self.writes.insert((x, y), Tile::new(value, flags)?);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }

    /// Commit every buffered write to the map.
    pub fn apply_to(&mut self, map: &mut TileMap) -> Result<(), MapError> {
        for (&(x, y), &tile) in &self.writes {
            map.set_tile(x, y, tile)?;
        }
        self.writes.clear();
        Ok(())
    }
}

/// State shared by every tool: the write buffer, the cost accrued over
/// the gesture so far, and the auto-bulldoze setting.
#[derive(Debug)]
pub struct ToolBase {
    pub effects: WorldEffects,
    cost: i64,
    auto_bulldoze: bool,
}

impl ToolBase {
    pub fn new(auto_bulldoze: bool) -> Self {
        Self {
            effects: WorldEffects::new(),
            cost: 0,
            auto_bulldoze,
        }
    }

    pub fn cost(&self) -> i64 {
        self.cost
    }

    pub fn add_cost(&mut self, cost: i64) {
        self.cost += cost;
    }

    /// Clear obstructing scenery (trees, rubble) at the target if the
    /// player allows it. Adds the clearance cost.
    pub fn do_auto_bulldoze(&mut self, map: &TileMap, x: i32, y: i32) -> Result<(), MapError> {
        if !self.auto_bulldoze {
            return Ok(());
        }
        let tile = self.effects.get_tile(map, x, y)?;
        if tile.is_bulldozable() && tiles::can_auto_bulldoze(tile.value()) {
            self.effects.set_tile(map, x, y, DIRT, 0)?;
            self.add_cost(1);
        }
        Ok(())
    }

    /// Funding gate, run once per gesture after all cell writes. Either
    /// every buffered write lands and the budget is debited, or nothing
    /// happens at all.
    pub fn modify_if_enough_funding(
        &mut self,
        map: &mut TileMap,
        budget: &mut Budget,
    ) -> Result<ToolResult, MapError> {
        if !budget.can_afford(self.cost) {
            debug!(cost = self.cost, funds = budget.total_funds, "tool gesture rejected");
            self.effects.clear();
            self.cost = 0;
            return Ok(ToolResult::NoMoney);
        }
        self.effects.apply_to(map)?;
        budget.spend(self.cost);
        self.cost = 0;
        Ok(ToolResult::Ok)
    }
}

// Connection tables: the canonical road/rail/wire tile for each N/E/S/W
// adjacency bitmask (north = 1, east = 2, south = 4, west = 8).
const ROAD_TABLE: [u16; 16] = [66, 67, 66, 68, 67, 69, 73, 71, 66, 70, 67, 74, 68, 72, 75, 76];
const RAIL_TABLE: [u16; 16] = [
    226, 227, 226, 228, 227, 229, 233, 231, 226, 230, 227, 234, 228, 232, 235, 236,
];
const WIRE_TABLE: [u16; 16] = [
    210, 211, 210, 212, 211, 213, 217, 215, 210, 214, 211, 218, 212, 216, 219, 220,
];

fn is_fixable_road(value: u16) -> bool {
    (tiles::ROADS..=tiles::INTERSECTION).contains(&value)
}

fn is_fixable_rail(value: u16) -> bool {
    (tiles::LHRAIL..=tiles::LVRAIL + 8).contains(&value)
}

fn is_fixable_wire(value: u16) -> bool {
    (tiles::LHPOWER..=tiles::LVPOWER + 8).contains(&value)
}

/// Renormalize the connectable tile at (x, y), if any, against its four
/// neighbours. Part of the cheap local consistency pass after a write.
fn fix_single(effects: &mut WorldEffects, map: &TileMap, x: i32, y: i32) -> Result<(), MapError> {
    let tile = effects.get_tile(map, x, y)?;
    let value = tiles::normalize_road(tile.value());

    let mut adjacency = 0usize;
    let neighbours = [(0, -1, 1usize), (1, 0, 2), (0, 1, 4), (-1, 0, 8)];

    if is_fixable_road(value) {
        for (dx, dy, bit) in neighbours {
            if !map.in_bounds(x + dx, y + dy) {
                continue;
            }
            let n = tiles::normalize_road(effects.get_value(map, x + dx, y + dy)?);
            if tiles::is_road(n) || n == tiles::HRAILROAD || n == tiles::VRAILROAD {
                adjacency |= bit;
            }
        }
        effects.set_tile(map, x, y, ROAD_TABLE[adjacency], tile.flags())?;
        return Ok(());
    }

    if is_fixable_rail(value) {
        for (dx, dy, bit) in neighbours {
            if !map.in_bounds(x + dx, y + dy) {
                continue;
            }
            let n = tiles::normalize_road(effects.get_value(map, x + dx, y + dy)?);
            if tiles::is_rail(n) || n == tiles::RAILHPOWERV || n == tiles::RAILVPOWERH {
                adjacency |= bit;
            }
        }
        effects.set_tile(map, x, y, RAIL_TABLE[adjacency], tile.flags())?;
        return Ok(());
    }

    if is_fixable_wire(value) {
        for (dx, dy, bit) in neighbours {
            if !map.in_bounds(x + dx, y + dy) {
                continue;
            }
            let n = effects.get_tile(map, x + dx, y + dy)?;
            if n.is_conductive() {
                adjacency |= bit;
            }
        }
        effects.set_tile(map, x, y, WIRE_TABLE[adjacency], tile.flags())?;
    }
    Ok(())
}

/// Re-run the local connection repair at a freshly written cell and its
/// four neighbours so adjacent zones and networks stay joined up.
pub(crate) fn check_zone_connections(
    effects: &mut WorldEffects,
    map: &TileMap,
    x: i32,
    y: i32,
) -> Result<(), MapError> {
    fix_single(effects, map, x, y)?;
    for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
        if map.in_bounds(x + dx, y + dy) {
            fix_single(effects, map, x + dx, y + dy)?;
        }
    }
    Ok(())
}
