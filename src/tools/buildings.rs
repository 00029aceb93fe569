//! Zone placement: stamps an empty 3x3 residential, commercial or
//! industrial block. The whole footprint is validated before anything is
//! buffered, so a blocked corner rejects the gesture cleanly.

use crate::budget::Budget;
use crate::map::{MapError, TileMap};
use crate::tiles::{
    self, BNCNBIT, CHANNEL, COMCLR, DIRT, FREEZ, INDCLR, REDGE, RIVER, ZONEBIT,
};

use super::{ToolBase, ToolResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneType {
    Residential,
    Commercial,
    Industrial,
}

impl ZoneType {
    fn empty_centre(self) -> u16 {
        match self {
            ZoneType::Residential => FREEZ,
            ZoneType::Commercial => COMCLR,
            ZoneType::Industrial => INDCLR,
        }
    }
}

pub struct ZoneTool {
    pub base: ToolBase,
    zone: ZoneType,
}

impl ZoneTool {
    pub const COST: i64 = 100;

    pub fn new(zone: ZoneType, auto_bulldoze: bool) -> Self {
        Self {
            base: ToolBase::new(auto_bulldoze),
            zone,
        }
    }

    /// Stamp the 3x3 block centred at (x, y) into the gesture buffer.
    pub fn apply(&mut self, map: &TileMap, x: i32, y: i32) -> Result<ToolResult, MapError> {
        if x < 1 || y < 1 || x > map.width() - 2 || y > map.height() - 2 {
            return Ok(ToolResult::Failed);
        }

        // First pass: every cell must be clear or clearable.
        for dy in -1..=1 {
            for dx in -1..=1 {
                let tile = self.base.effects.get_tile(map, x + dx, y + dy)?;
                let value = tile.value();
                if value == DIRT {
                    continue;
                }
                if matches!(value, RIVER | REDGE | CHANNEL) {
                    return Ok(ToolResult::Failed);
                }
                if !tile.is_bulldozable() || !tiles::can_auto_bulldoze(value) {
                    return Ok(ToolResult::Failed);
                }
                if !self.base.auto_bulldoze {
                    return Ok(ToolResult::NeedsBulldoze);
                }
            }
        }

        // Second pass: clear scenery, then stamp the block. New zones come
        // up unpowered; the next period's scan decides their fate.
        for dy in -1..=1 {
            for dx in -1..=1 {
                self.base.do_auto_bulldoze(map, x + dx, y + dy)?;
            }
        }
        let mut value = self.zone.empty_centre() - 4;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let flags = if dx == 0 && dy == 0 {
                    BNCNBIT | ZONEBIT
                } else {
                    BNCNBIT
                };
                self.base.effects.set_tile(map, x + dx, y + dy, value, flags)?;
                value += 1;
            }
        }
        self.base.add_cost(Self::COST);
        Ok(ToolResult::Ok)
    }

    pub fn commit(&mut self, map: &mut TileMap, budget: &mut Budget) -> Result<ToolResult, MapError> {
        self.base.modify_if_enough_funding(map, budget)
    }
}
