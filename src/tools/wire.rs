//! Power line layer. Dirt costs 5, an underwater cable 25. Roads and rail
//! underneath become powered crossings.

use crate::budget::Budget;
use crate::map::{MapError, TileMap};
use crate::tiles::{
    self, BLBNCNBIT, BULLBIT, CHANNEL, CONDBIT, DIRT, HPOWER, HROADPOWER, LHPOWER, LHRAIL,
    LVRAIL, RAILHPOWERV, RAILVPOWERH, REDGE, RIVER, ROADS, ROADS2, VPOWER, VROADPOWER,
};

use super::{check_zone_connections, ToolBase, ToolResult};

pub struct WireTool {
    pub base: ToolBase,
}

impl WireTool {
    pub const COST: i64 = 5;
    pub const UNDERWATER_COST: i64 = 25;

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
                self.base.effects.set_tile(map, x, y, LHPOWER, BLBNCNBIT)?;
            }

            RIVER | REDGE | CHANNEL => {
                cost = Self::UNDERWATER_COST;

                // An underwater cable must reach a conductive tile on a
                // bank, and one whose conductor runs toward the water.
                // Probe east, west, south, north in that order.
                let mut placed = false;

                if x < map.width() - 1 {
                    let n = self.base.effects.get_tile(map, x + 1, y)?;
                    if n.is_conductive() {
                        let nv = tiles::normalize_road(n.value());
                        if nv != HROADPOWER && nv != RAILHPOWERV && nv != HPOWER {
                            self.base
                                .effects
                                .set_tile(map, x, y, VPOWER, CONDBIT | BULLBIT)?;
                            placed = true;
                        }
                    }
                }

                if !placed && x > 0 {
                    let n = self.base.effects.get_tile(map, x - 1, y)?;
                    if n.is_conductive() {
                        let nv = tiles::normalize_road(n.value());
                        if nv != HROADPOWER && nv != RAILHPOWERV && nv != HPOWER {
                            self.base
                                .effects
                                .set_tile(map, x, y, VPOWER, CONDBIT | BULLBIT)?;
                            placed = true;
                        }
                    }
                }

                if !placed && y < map.height() - 1 {
                    let n = self.base.effects.get_tile(map, x, y + 1)?;
                    if n.is_conductive() {
                        let nv = tiles::normalize_road(n.value());
                        if nv != VROADPOWER && nv != RAILVPOWERH && nv != VPOWER {
                            self.base
                                .effects
                                .set_tile(map, x, y, HPOWER, CONDBIT | BULLBIT)?;
                            placed = true;
                        }
                    }
                }

                if !placed && y > 0 {
                    let n = self.base.effects.get_tile(map, x, y - 1)?;
                    if n.is_conductive() {
                        let nv = tiles::normalize_road(n.value());
                        if nv != VROADPOWER && nv != RAILVPOWERH && nv != VPOWER {
                            self.base
                                .effects
                                .set_tile(map, x, y, HPOWER, CONDBIT | BULLBIT)?;
                            placed = true;
                        }
                    }
                }

                if !placed {
                    return Ok(ToolResult::Failed);
                }
            }

            ROADS => {
                self.base
                    .effects
                    .set_tile(map, x, y, HROADPOWER, BLBNCNBIT)?;
            }

            ROADS2 => {
                self.base
                    .effects
                    .set_tile(map, x, y, VROADPOWER, BLBNCNBIT)?;
            }

            LHRAIL => {
                self.base
                    .effects
                    .set_tile(map, x, y, RAILHPOWERV, BLBNCNBIT)?;
            }

            LVRAIL => {
                self.base
                    .effects
                    .set_tile(map, x, y, RAILVPOWERH, BLBNCNBIT)?;
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
