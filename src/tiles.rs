//! Packed tile state: a 10-bit terrain/structure value plus six flag bits.
//!
//! The numeric encoding follows the classic city-simulation tile table so
//! that grids remain comparable against the reference vectors. Call sites
//! go through the named accessors and predicates below instead of decoding
//! ranges by hand.

use thiserror::Error;

/// Flag bits occupying the high six bits of a packed tile.
pub const ZONEBIT: u16 = 0x0400; // centre of a zone
pub const ANIMBIT: u16 = 0x0800;
pub const BULLBIT: u16 = 0x1000; // bulldozable
pub const BURNBIT: u16 = 0x2000; // burnable
pub const CONDBIT: u16 = 0x4000; // conducts power
pub const PWRBIT: u16 = 0x8000; // currently powered

pub const BLBNBIT: u16 = BULLBIT | BURNBIT;
pub const BNCNBIT: u16 = BURNBIT | CONDBIT;
pub const BLBNCNBIT: u16 = BULLBIT | BURNBIT | CONDBIT;

pub const ALL_FLAGS: u16 = 0xfc00;
pub const VALUE_MASK: u16 = 0x03ff;

pub const TILE_COUNT: u16 = 1024;

// Terrain and infrastructure values. Only the subset the engine dispatches
// on is named; intermediate variants are reached through the adjacency
// tables in the tool layer.
pub const DIRT: u16 = 0;
pub const RIVER: u16 = 2;
pub const REDGE: u16 = 3;
pub const CHANNEL: u16 = 4;
pub const FIRSTRIVEDGE: u16 = 5;
pub const LASTRIVEDGE: u16 = 20;
pub const TREEBASE: u16 = 21;
pub const WOODS: u16 = 37;
pub const RUBBLE: u16 = 44;
pub const LASTRUBBLE: u16 = 47;
pub const FLOOD: u16 = 48;
pub const RADTILE: u16 = 52;

pub const ROADBASE: u16 = 64;
pub const HBRIDGE: u16 = 64;
pub const VBRIDGE: u16 = 65;
pub const ROADS: u16 = 66;
pub const ROADS2: u16 = 67;
pub const INTERSECTION: u16 = 76;
pub const HROADPOWER: u16 = 77;
pub const VROADPOWER: u16 = 78;
pub const LASTROAD: u16 = 206;

pub const POWERBASE: u16 = 208;
pub const HPOWER: u16 = 208;
pub const VPOWER: u16 = 209;
pub const LHPOWER: u16 = 210;
pub const LVPOWER: u16 = 211;
pub const RAILHPOWERV: u16 = 221;
pub const RAILVPOWERH: u16 = 222;
pub const LASTPOWER: u16 = 222;

pub const RAILBASE: u16 = 224;
pub const HRAIL: u16 = 224;
pub const VRAIL: u16 = 225;
pub const LHRAIL: u16 = 226;
pub const LVRAIL: u16 = 227;
pub const HRAILROAD: u16 = 237;
pub const VRAILROAD: u16 = 238;
pub const LASTRAIL: u16 = 238;

// Residential. FREEZ is the empty ("free") zone centre; the 3x3 block
// spans RESBASE..=RESBASE+8. Individual houses occupy HOUSE..=HHTHR.
pub const RESBASE: u16 = 240;
pub const FREEZ: u16 = 244;
pub const HOUSE: u16 = 249;
pub const LHTHR: u16 = 249;
pub const HHTHR: u16 = 260;
pub const RZB: u16 = 265;

pub const HOSPITALBASE: u16 = 405;
pub const HOSPITAL: u16 = 409;

pub const COMBASE: u16 = 423;
pub const COMCLR: u16 = 427;
pub const CZB: u16 = 436;
pub const LASTCOM: u16 = 611;

pub const INDBASE: u16 = 612;
pub const INDCLR: u16 = 616;
pub const IZB: u16 = 625;
pub const LASTIND: u16 = 692;

/// Zone-centre flags are only legal at or above this value.
pub const ZONE_VALUE_FLOOR: u16 = RESBASE;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TileError {
    #[error("tile value {0} exceeds the {TILE_COUNT}-entry tile table")]
    ValueOutOfRange(u16),
    #[error("flag bits {0:#06x} fall outside the flag mask")]
    InvalidFlags(u16),
    #[error("zone-centre flag on non-zone tile value {0}")]
    ZoneFlagOutsideZoneRange(u16),
}

/// One packed map cell. The raw `u16` keeps the wire-compatible layout;
/// everything else goes through accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    raw: u16,
}

impl Tile {
    pub fn new(value: u16, flags: u16) -> Result<Self, TileError> {
        if value >= TILE_COUNT {
            return Err(TileError::ValueOutOfRange(value));
        }
        if flags & !ALL_FLAGS != 0 {
            return Err(TileError::InvalidFlags(flags));
        }
        if flags & ZONEBIT != 0 && value < ZONE_VALUE_FLOOR {
            return Err(TileError::ZoneFlagOutsideZoneRange(value));
        }
        Ok(Self { raw: value | flags })
    }

    /// A bare terrain tile with no flags set.
    pub fn plain(value: u16) -> Result<Self, TileError> {
        Self::new(value, 0)
    }

    pub fn value(self) -> u16 {
        self.raw & VALUE_MASK
    }

    pub fn flags(self) -> u16 {
        self.raw & ALL_FLAGS
    }

    pub fn raw(self) -> u16 {
        self.raw
    }

    pub fn is_zone_center(self) -> bool {
        self.raw & ZONEBIT != 0
    }

    pub fn is_powered(self) -> bool {
        self.raw & PWRBIT != 0
    }

    pub fn is_conductive(self) -> bool {
        self.raw & CONDBIT != 0
    }

    pub fn is_bulldozable(self) -> bool {
        self.raw & BULLBIT != 0
    }

    pub fn is_burnable(self) -> bool {
        self.raw & BURNBIT != 0
    }

    pub fn is_animated(self) -> bool {
        self.raw & ANIMBIT != 0
    }

    pub(crate) fn set_value(&mut self, value: u16) -> Result<(), TileError> {
        *self = Tile::new(value, self.flags())?;
        Ok(())
    }

    pub(crate) fn set_flags(&mut self, flags: u16) -> Result<(), TileError> {
        *self = Tile::new(self.value(), flags)?;
        Ok(())
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self { raw: DIRT }
    }
}

/// Collapse directional road sub-variants (traffic, lights) onto the
/// canonical 64..79 band so switch dispatch sees one tile per shape.
pub fn normalize_road(value: u16) -> u16 {
    if (ROADBASE..=LASTROAD + 1).contains(&value) {
        (value & 15) + ROADBASE
    } else {
        value
    }
}

/// Road, rail, or combined tiles a vehicle can traverse. Bare power lines
/// do not qualify, grade crossings do.
pub fn is_driveable(value: u16) -> bool {
    (ROADBASE..=LASTROAD).contains(&value)
        || value == RAILHPOWERV
        || value == RAILVPOWERH
        || (RAILBASE..=LASTRAIL).contains(&value)
}

pub fn is_road(value: u16) -> bool {
    (ROADBASE..=LASTROAD).contains(&value)
}

pub fn is_rail(value: u16) -> bool {
    (RAILBASE..=LASTRAIL).contains(&value)
}

pub fn is_house(value: u16) -> bool {
    (LHTHR..=HHTHR).contains(&value)
}

pub fn is_residential_zone(value: u16) -> bool {
    (RESBASE..HOSPITALBASE).contains(&value)
}

pub fn is_commercial_zone(value: u16) -> bool {
    (COMBASE..=LASTCOM).contains(&value)
}

pub fn is_commercial(value: u16) -> bool {
    is_commercial_zone(value)
}

pub fn is_industrial_zone(value: u16) -> bool {
    (INDBASE..=LASTIND).contains(&value)
}

pub fn is_industrial(value: u16) -> bool {
    is_industrial_zone(value)
}

/// Scenery the road/rail/wire tools may clear on their own: trees, shrub,
/// rubble. River edges share the range but never carry BULLBIT.
pub fn can_auto_bulldoze(value: u16) -> bool {
    (FIRSTRIVEDGE..=LASTRUBBLE).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_value_and_flags_independently() {
        let tile = Tile::new(FREEZ, BLBNCNBIT | ZONEBIT).unwrap();
        assert_eq!(tile.value(), FREEZ);
        assert_eq!(tile.flags(), BLBNCNBIT | ZONEBIT);
        assert!(tile.is_zone_center());
        assert!(!tile.is_powered());
    }

    #[test]
    fn rejects_zone_flag_on_terrain() {
        assert_eq!(
            Tile::new(RIVER, ZONEBIT),
            Err(TileError::ZoneFlagOutsideZoneRange(RIVER))
        );
    }

    #[test]
    fn rejects_out_of_table_values() {
        assert_eq!(Tile::new(1024, 0), Err(TileError::ValueOutOfRange(1024)));
    }

    #[test]
    fn road_normalization_collapses_variants() {
        assert_eq!(normalize_road(ROADS + 16), ROADS);
        assert_eq!(normalize_road(ROADS + 64), ROADS);
        assert_eq!(normalize_road(DIRT), DIRT);
        assert_eq!(normalize_road(LHRAIL), LHRAIL);
    }

    #[test]
    fn driveable_excludes_bare_power() {
        assert!(is_driveable(ROADS));
        assert!(is_driveable(LHRAIL));
        assert!(is_driveable(RAILHPOWERV));
        assert!(!is_driveable(LHPOWER));
        assert!(!is_driveable(DIRT));
    }
}
