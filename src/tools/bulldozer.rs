//! Bulldozer. Clears a bulldozable cell for 1; a zone centre collapses the
//! whole 3x3 block to rubble in one gesture.

use crate::budget::Budget;
use crate::map::{MapError, TileMap};
use crate::tiles::{BULLBIT, DIRT, RUBBLE};

use super::{check_zone_connections, ToolBase, ToolResult};

pub struct BulldozerTool {
    pub base: ToolBase,
}

impl BulldozerTool {
    pub const COST: i64 = 1;

    pub fn new() -> Self {
        Self {
            base: ToolBase::new(false),
        }
    }

    pub fn apply(&mut self, map: &TileMap, x: i32, y: i32) -> Result<ToolResult, MapError> {
        if !map.in_bounds(x, y) {
            return Ok(ToolResult::Failed);
        }
        let tile = self.base.effects.get_tile(map, x, y)?;

        if tile.is_zone_center() {
            // Demolition leaves rubble over the footprint, not clean dirt.
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if map.in_bounds(x + dx, y + dy) {
                        self.base
                            .effects
                            .set_tile(map, x + dx, y + dy, RUBBLE, BULLBIT)?;
                    }
                }
            }
            self.base.add_cost(Self::COST);
            return Ok(ToolResult::Ok);
        }

        if !tile.is_bulldozable() {
            return Ok(ToolResult::Failed);
        }

        self.base.effects.set_tile(map, x, y, DIRT, 0)?;
        self.base.add_cost(Self::COST);
        check_zone_connections(&mut self.base.effects, map, x, y)?;
        Ok(ToolResult::Ok)
    }

    pub fn commit(&mut self, map: &mut TileMap, budget: &mut Budget) -> Result<ToolResult, MapError> {
        self.base.modify_if_enough_funding(map, budget)
    }
}

impl Default for BulldozerTool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{self, Tile, BLBNBIT, ROADS};
    use crate::zones;

    fn dirt_map() -> TileMap {
        TileMap::new(10, 10, Tile::default())
    }

    #[test]
    fn clears_a_road_for_one() {
        let mut map = dirt_map();
        map.set(3, 3, ROADS, BLBNBIT).unwrap();
        let mut tool = BulldozerTool::new();
        assert_eq!(tool.apply(&map, 3, 3).unwrap(), ToolResult::Ok);
        assert_eq!(tool.base.cost(), 1);
        assert_eq!(tool.base.effects.get_value(&map, 3, 3).unwrap(), DIRT);
    }

    #[test]
    fn refuses_terrain_without_the_flag() {
        let mut map = dirt_map();
        map.set(3, 3, tiles::RIVER, 0).unwrap();
        let mut tool = BulldozerTool::new();
        assert_eq!(tool.apply(&map, 3, 3).unwrap(), ToolResult::Failed);
        assert!(tool.base.effects.is_empty());
    }

    #[test]
    fn zone_centre_collapses_to_rubble() {
        let mut map = dirt_map();
        zones::put_zone(&mut map, 5, 5, tiles::FREEZ, false).unwrap();
        let mut tool = BulldozerTool::new();
        assert_eq!(tool.apply(&map, 5, 5).unwrap(), ToolResult::Ok);
        assert_eq!(tool.base.cost(), 1);
        for dy in -1..=1 {
            for dx in -1..=1 {
                assert_eq!(
                    tool.base.effects.get_value(&map, 5 + dx, 5 + dy).unwrap(),
                    RUBBLE
                );
            }
        }
    }
}
