//! Dense bounds-checked tile grid.
//!
//! Every accessor validates coordinates and fails with
//! [`MapError::InvalidCoordinate`] instead of clamping or wrapping; an
//! out-of-range read is a programming error, not a recoverable condition.

use thiserror::Error;

use crate::tiles::{Tile, TileError, BNCNBIT, ZONEBIT};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("coordinate ({x}, {y}) outside {width}x{height} map")]
    InvalidCoordinate {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    #[error("{w}x{h} block at ({x}, {y}) leaves the map")]
    BlockOutOfBounds { x: i32, y: i32, w: i32, h: i32 },
    #[error(transparent)]
    Tile(#[from] TileError),
}

/// The four orthogonal neighbour directions, in the fixed order the zone
/// and tool logic probes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// Fixed-size rectangular tile store. Owns all tile storage; unwritten
/// cells hold the map's default tile.
pub struct TileMap {
    width: i32,
    height: i32,
    default: Tile,
    data: Vec<Tile>,
}

impl TileMap {
    pub fn new(width: i32, height: i32, default: Tile) -> Self {
        assert!(width > 0 && height > 0, "map dimensions must be positive");
        Self {
            width,
            height,
            default,
            data: vec![default; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn default_tile(&self) -> Tile {
        self.default
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, MapError> {
        if !self.in_bounds(x, y) {
            return Err(MapError::InvalidCoordinate {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((x + y * self.width) as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Tile, MapError> {
        Ok(self.data[self.index(x, y)?])
    }

    pub fn get_value(&self, x: i32, y: i32) -> Result<u16, MapError> {
        Ok(self.get(x, y)?.value())
    }

    pub fn get_flags(&self, x: i32, y: i32) -> Result<u16, MapError> {
        Ok(self.get(x, y)?.flags())
    }

    pub fn set(&mut self, x: i32, y: i32, value: u16, flags: u16) -> Result<(), MapError> {
        let idx = self.index(x, y)?;
        self.data[idx] = Tile::new(value, flags)?;
        Ok(())
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) -> Result<(), MapError> {
        let idx = self.index(x, y)?;
        self.data[idx] = tile;
        Ok(())
    }

    pub fn set_value(&mut self, x: i32, y: i32, value: u16) -> Result<(), MapError> {
        let idx = self.index(x, y)?;
        self.data[idx].set_value(value)?;
        Ok(())
    }

    pub fn set_flags(&mut self, x: i32, y: i32, flags: u16) -> Result<(), MapError> {
        let idx = self.index(x, y)?;
        self.data[idx].set_flags(flags)?;
        Ok(())
    }

    pub fn add_flags(&mut self, x: i32, y: i32, flags: u16) -> Result<(), MapError> {
        let current = self.get_flags(x, y)?;
        self.set_flags(x, y, current | flags)
    }

    pub fn remove_flags(&mut self, x: i32, y: i32, flags: u16) -> Result<(), MapError> {
        let current = self.get_flags(x, y)?;
        self.set_flags(x, y, current & !flags)
    }

    /// Row-major view of a `w`x`h` rectangle.
    pub fn get_block(&self, x: i32, y: i32, w: i32, h: i32) -> Result<Vec<Vec<Tile>>, MapError> {
        if w < 1 || h < 1 || !self.in_bounds(x, y) || !self.in_bounds(x + w - 1, y + h - 1) {
            return Err(MapError::BlockOutOfBounds { x, y, w, h });
        }
        let mut rows = Vec::with_capacity(h as usize);
        for yy in y..y + h {
            let mut row = Vec::with_capacity(w as usize);
            for xx in x..x + w {
                row.push(self.get(xx, yy)?);
            }
            rows.push(row);
        }
        Ok(rows)
    }

    /// Neighbour value in `dir`, or `default` when the neighbour would be
    /// off-grid. Saves the caller a bounds check at every map edge.
    pub fn adjacent_or(&self, x: i32, y: i32, dir: Direction, default: u16) -> u16 {
        let (dx, dy) = dir.offset();
        let (nx, ny) = (x + dx, y + dy);
        if self.in_bounds(nx, ny) {
            // In-bounds read cannot fail.
            self.get_value(nx, ny).unwrap_or(default)
        } else {
            default
        }
    }

    /// Stamp a `size`x`size` zone block whose top-left corner sits at
    /// (cx-1, cy-1). Tile values run sequentially from
    /// `centre_value - 1 - size`; only the true centre carries ZONEBIT.
    pub fn put_zone(
        &mut self,
        cx: i32,
        cy: i32,
        centre_value: u16,
        size: i32,
    ) -> Result<(), MapError> {
        let start_x = cx - 1;
        let start_y = cy - 1;
        if !self.in_bounds(start_x, start_y) || !self.in_bounds(start_x + size - 1, start_y + size - 1)
        {
            return Err(MapError::BlockOutOfBounds {
                x: start_x,
                y: start_y,
                w: size,
                h: size,
            });
        }
        let mut value = centre_value - 1 - size as u16;
        for y in start_y..start_y + size {
            for x in start_x..start_x + size {
                let flags = if x == cx && y == cy {
                    BNCNBIT | ZONEBIT
                } else {
                    BNCNBIT
                };
                self.set(x, y, value, flags)?;
                value += 1;
            }
        }
        Ok(())
    }
}
