//! Road layer. Dirt costs 10, a bridge segment 50. Wire underneath turns
//! into a powered crossing, rail underneath into a grade crossing.

use crate::budget::Budget;
use crate::map::{MapError, TileMap};
use crate::tiles::{
    self, BLBNBIT, BLBNCNBIT, BULLBIT, CHANNEL, DIRT, HBRIDGE, HRAILROAD, HROADPOWER, LHPOWER,
    LHRAIL, LVPOWER, LVRAIL, REDGE, RIVER, ROADS, VBRIDGE, VRAILROAD, VROADPOWER,
};

use super::{check_zone_connections, ToolBase, ToolResult};

pub struct RoadTool {
    pub base: ToolBase,
}

impl RoadTool {
    pub const COST: i64 = 10;
    pub const BRIDGE_COST: i64 = 50;

    pub fn new(auto_bulldoze: bool) -> Self {
        Self {
            base: ToolBase::new(auto_bulldoze),
        }
    }

    pub fn apply(&mut self, map: &TileMap, x: i32, y: i32) -> Result<ToolResult, MapError> {
        if !map.in_bounds(x, y) {
            return Ok(ToolResult::Failed);
        }
        self.base.do_auto_bulldoze(map, x, y)?;
        let tile = tiles::normalize_road(self.base.effects.get_value(map, x, y)?);
        let mut cost = Self::COST;

        match tile {
            DIRT => {
                self.base.effects.set_tile(map, x, y, ROADS, BLBNBIT)?;
            }

            RIVER | REDGE | CHANNEL => {
                cost = Self::BRIDGE_COST;

                // Bridges continue a road on an adjacent bank; probe east,
                // west, south, north in that order.
                let mut placed = false;

                if x < map.width() - 1 {
                    let n = tiles::normalize_road(self.base.effects.get_value(map, x + 1, y)?);
                    if n == VRAILROAD || n == HBRIDGE || (ROADS..=HROADPOWER).contains(&n) {
                        self.base.effects.set_tile(map, x, y, HBRIDGE, BULLBIT)?;
                        placed = true;
                    }
                }

                if !placed && x > 0 {
                    let n = tiles::normalize_road(self.base.effects.get_value(map, x - 1, y)?);
                    if n == VRAILROAD || n == HBRIDGE || (n > VBRIDGE && n < VROADPOWER) {
                        self.base.effects.set_tile(map, x, y, HBRIDGE, BULLBIT)?;
                        placed = true;
                    }
                }

                if !placed && y < map.height() - 1 {
                    let n = tiles::normalize_road(self.base.effects.get_value(map, x, y + 1)?);
                    if n == HRAILROAD || n == VROADPOWER || (n > ROADS && n < HROADPOWER) {
                        self.base.effects.set_tile(map, x, y, VBRIDGE, BULLBIT)?;
                        placed = true;
                    }
                }

                if !placed && y > 0 {
                    let n = tiles::normalize_road(self.base.effects.get_value(map, x, y - 1)?);
                    if n == HRAILROAD || n == VROADPOWER || (n > ROADS && n < HROADPOWER) {
                        self.base.effects.set_tile(map, x, y, VBRIDGE, BULLBIT)?;
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
                    .set_tile(map, x, y, VROADPOWER, BLBNCNBIT)?;
            }

            LVPOWER => {
                self.base
                    .effects
                    .set_tile(map, x, y, HROADPOWER, BLBNCNBIT)?;
            }

            LHRAIL => {
                self.base.effects.set_tile(map, x, y, HRAILROAD, BLBNBIT)?;
            }

            LVRAIL => {
                self.base.effects.set_tile(map, x, y, VRAILROAD, BLBNBIT)?;
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
    fn road_on_dirt_costs_ten() {
        let map = dirt_map();
        let mut tool = RoadTool::new(true);
        assert_eq!(tool.apply(&map, 1, 1).unwrap(), ToolResult::Ok);
        assert_eq!(tool.base.cost(), 10);
        assert!(tiles::is_road(tool.base.effects.get_value(&map, 1, 1).unwrap()));
    }

    #[test]
    fn two_cell_drag_joins_and_costs_per_cell() {
        let map = dirt_map();
        let mut tool = RoadTool::new(true);
        assert_eq!(tool.apply(&map, 2, 2).unwrap(), ToolResult::Ok);
        assert_eq!(tool.apply(&map, 3, 2).unwrap(), ToolResult::Ok);
        assert_eq!(tool.base.cost(), 20);
        // Both cells resolve to the east-west road shape.
        assert_eq!(tool.base.effects.get_value(&map, 2, 2).unwrap(), ROADS);
        assert_eq!(tool.base.effects.get_value(&map, 3, 2).unwrap(), ROADS);
    }

    #[test]
    fn bridge_needs_a_bank_connection() {
        let mut map = dirt_map();
        map.set(5, 5, RIVER, 0).unwrap();
        let mut tool = RoadTool::new(true);
        assert_eq!(tool.apply(&map, 5, 5).unwrap(), ToolResult::Failed);

        map.set(5, 6, tiles::ROADS2, BLBNBIT).unwrap();
        let mut tool = RoadTool::new(true);
        assert_eq!(tool.apply(&map, 5, 5).unwrap(), ToolResult::Ok);
        assert_eq!(tool.base.cost(), 50);
        assert_eq!(tool.base.effects.get_value(&map, 5, 5).unwrap(), VBRIDGE);
    }

    #[test]
    fn road_over_rail_becomes_grade_crossing() {
        let mut map = dirt_map();
        map.set(4, 4, LVRAIL, BLBNBIT).unwrap();
        let mut tool = RoadTool::new(true);
        assert_eq!(tool.apply(&map, 4, 4).unwrap(), ToolResult::Ok);
        assert_eq!(tool.base.effects.get_value(&map, 4, 4).unwrap(), VRAILROAD);
    }
}
