//! Rail layer. Dirt costs 20, spanning water costs 100 and needs a rail
//! connection on an adjacent bank, and existing wire or road tiles become
//! the matching crossing.

use crate::budget::Budget;
use crate::map::{MapError, TileMap};
use crate::tiles::{
    self, BLBNBIT, BLBNCNBIT, BULLBIT, CHANNEL, DIRT, HRAIL, HRAILROAD, LHPOWER, LHRAIL, LVPOWER,
    RAILHPOWERV, RAILVPOWERH, REDGE, RIVER, ROADS, ROADS2, VRAIL, VRAILROAD,
};

use super::{check_zone_connections, ToolBase, ToolResult};

pub struct RailTool {
    pub base: ToolBase,
}

impl RailTool {
    pub const COST: i64 = 20;
    pub const BRIDGE_COST: i64 = 100;

    pub fn new(auto_bulldoze: bool) -> Self {
        Self {
            base: ToolBase::new(auto_bulldoze),
        }
    }

    /// Lay one rail cell into the gesture buffer.
    pub fn apply(&mut self, map: &TileMap, x: i32, y: i32) -> Result<ToolResult, MapError> {
        if !map.in_bounds(x, y) {
            return Ok(ToolResult::Failed);
        }
        self.base.do_auto_bulldoze(map, x, y)?;
        let tile = tiles::normalize_road(self.base.effects.get_value(map, x, y)?);
        let mut cost = Self::COST;

        match tile {
            DIRT => {
                self.base.effects.set_tile(map, x, y, LHRAIL, BLBNBIT)?;
            }

            RIVER | REDGE | CHANNEL => {
                cost = Self::BRIDGE_COST;

                // A water crossing must continue a rail line on one of the
                // banks. Probe east, west, south, north in that order.
                let mut placed = false;

                if x < map.width() - 1 {
                    let n = tiles::normalize_road(self.base.effects.get_value(map, x + 1, y)?);
                    if n == RAILHPOWERV || n == HRAIL || (LHRAIL..=HRAILROAD).contains(&n) {
                        self.base.effects.set_tile(map, x, y, HRAIL, BULLBIT)?;
                        placed = true;
                    }
                }

                if !placed && x > 0 {
                    let n = tiles::normalize_road(self.base.effects.get_value(map, x - 1, y)?);
                    if n == RAILHPOWERV || n == HRAIL || (n > VRAIL && n < VRAILROAD) {
                        self.base.effects.set_tile(map, x, y, HRAIL, BULLBIT)?;
                        placed = true;
                    }
                }

                if !placed && y < map.height() - 1 {
                    let n = tiles::normalize_road(self.base.effects.get_value(map, x, y + 1)?);
                    if n == RAILVPOWERH || n == VRAILROAD || (n > HRAIL && n < HRAILROAD) {
                        self.base.effects.set_tile(map, x, y, VRAIL, BULLBIT)?;
                        placed = true;
                    }
                }

                if !placed && y > 0 {
                    let n = tiles::normalize_road(self.base.effects.get_value(map, x, y - 1)?);
                    if n == RAILVPOWERH || n == VRAILROAD || (n > HRAIL && n < HRAILROAD) {
                        self.base.effects.set_tile(map, x, y, VRAIL, BULLBIT)?;
                        placed = true;
                    }
                }

                if !placed {
                    return Ok(ToolResult::Failed);
                }
            }

            LHPOWER => {
                self.base
                    .effects
                    .set_tile(map, x, y, RAILVPOWERH, BLBNCNBIT)?;
            }

            LVPOWER => {
                self.base
                    .effects
                    .set_tile(map, x, y, RAILHPOWERV, BLBNCNBIT)?;
            }

            ROADS => {
                self.base.effects.set_tile(map, x, y, VRAILROAD, BLBNBIT)?;
            }

            ROADS2 => {
                self.base.effects.set_tile(map, x, y, HRAILROAD, BLBNBIT)?;
            }

            _ => return Ok(ToolResult::Failed),
        }

        self.base.add_cost(cost);
        check_zone_connections(&mut self.base.effects, map, x, y)?;
        Ok(ToolResult::Ok)
    }

    pub fn commit(&mut self, map: &mut TileMap, budget: &mut Budget) -> Result<ToolResult, MapError> {
        self.base.modify_if_enough_funding(map, budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::Tile;

    fn dirt_map() -> TileMap {
        TileMap::new(10, 10, Tile::default())
    }

    #[test]
    fn rail_on_dirt_costs_twenty() {
        let map = dirt_map();
        let mut tool = RailTool::new(true);
        assert_eq!(tool.apply(&map, 2, 2).unwrap(), ToolResult::Ok);
        assert_eq!(tool.base.cost(), 20);
        let tile = tool.base.effects.get_tile(&map, 2, 2).unwrap();
        assert!(tiles::is_rail(tile.value()));
        assert!(tile.is_bulldozable());
        assert!(tile.is_burnable());
    }

    #[test]
    fn water_rail_needs_an_adjacent_line() {
        let mut map = dirt_map();
        map.set(5, 5, RIVER, 0).unwrap();
        let mut tool = RailTool::new(true);
        assert_eq!(tool.apply(&map, 5, 5).unwrap(), ToolResult::Failed);
        assert_eq!(tool.base.cost(), 0);

        // With rail on the east bank the crossing goes through at 100.
        map.set(6, 5, LHRAIL, BLBNBIT).unwrap();
        let mut tool = RailTool::new(true);
        assert_eq!(tool.apply(&map, 5, 5).unwrap(), ToolResult::Ok);
        assert_eq!(tool.base.cost(), 100);
        assert_eq!(tool.base.effects.get_value(&map, 5, 5).unwrap(), HRAIL);
    }

    #[test]
    fn rail_over_wire_becomes_a_powered_crossing() {
        let mut map = dirt_map();
        map.set(4, 4, LHPOWER, BLBNCNBIT).unwrap();
        let mut tool = RailTool::new(true);
        assert_eq!(tool.apply(&map, 4, 4).unwrap(), ToolResult::Ok);
        let tile = tool.base.effects.get_tile(&map, 4, 4).unwrap();
        assert_eq!(tile.value(), RAILVPOWERH);
        assert!(tile.is_conductive());
    }

    #[test]
    fn rail_rejects_structures() {
        let mut map = dirt_map();
        map.set(3, 3, tiles::FREEZ, tiles::BNCNBIT | tiles::ZONEBIT).unwrap();
        let mut tool = RailTool::new(true);
        assert_eq!(tool.apply(&map, 3, 3).unwrap(), ToolResult::Failed);
        assert!(tool.base.effects.is_empty());
    }
}
