//! Coarse overlay layers read alongside the tile grid.
//!
//! Each layer stores one value per `block_size`-square of world tiles and
//! accepts world coordinates directly; off-map reads yield 0 so callers
//! probing near the edge need no bounds dance. The zone engine treats all
//! layers as read-only except the rate-of-growth accumulator; the traffic
//! oracle writes traffic density.

/// One scaled layer.
pub struct BlockMap {
    block_size: i32,
    width: i32,
    height: i32,
    data: Vec<i16>,
}

impl BlockMap {
    pub fn new(map_width: i32, map_height: i32, block_size: i32) -> Self {
        assert!(block_size > 0, "block size must be positive");
        let width = (map_width + block_size - 1) / block_size;
        let height = (map_height + block_size - 1) / block_size;
        Self {
            block_size,
            width,
            height,
            data: vec![0; (width * height) as usize],
        }
    }

    fn block_index(&self, x: i32, y: i32) -> Option<usize> {
        let bx = x / self.block_size;
        let by = y / self.block_size;
        if x < 0 || y < 0 || bx >= self.width || by >= self.height {
            None
        } else {
            Some((bx + by * self.width) as usize)
        }
    }

    /// Value for the block containing world tile (x, y); 0 off-map.
    pub fn world_get(&self, x: i32, y: i32) -> i16 {
        self.block_index(x, y)
            .map(|idx| self.data[idx])
            .unwrap_or(0)
    }

    /// Write the block containing world tile (x, y); off-map writes are
    /// dropped.
    pub fn world_set(&mut self, x: i32, y: i32, value: i16) {
        if let Some(idx) = self.block_index(x, y) {
            self.data[idx] = value;
        }
    }
}

/// The layer bundle the simulation consumes.
pub struct BlockMaps {
    pub pollution_density: BlockMap,
    pub land_value: BlockMap,
    pub population_density: BlockMap,
    pub traffic_density: BlockMap,
    pub rate_of_growth: BlockMap,
}

impl BlockMaps {
    pub fn new(map_width: i32, map_height: i32) -> Self {
        Self {
            pollution_density: BlockMap::new(map_width, map_height, 2),
            land_value: BlockMap::new(map_width, map_height, 2),
            population_density: BlockMap::new(map_width, map_height, 2),
            traffic_density: BlockMap::new(map_width, map_height, 2),
            rate_of_growth: BlockMap::new(map_width, map_height, 8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_coordinates_scale_to_blocks() {
        let mut map = BlockMap::new(16, 16, 2);
        map.world_set(4, 6, 77);
        assert_eq!(map.world_get(4, 6), 77);
        assert_eq!(map.world_get(5, 7), 77); // same 2x2 block
        assert_eq!(map.world_get(6, 6), 0);
    }

    #[test]
    fn off_map_reads_are_zero_and_writes_dropped() {
        let mut map = BlockMap::new(16, 16, 2);
        assert_eq!(map.world_get(-1, 0), 0);
        assert_eq!(map.world_get(0, 99), 0);
        map.world_set(99, 0, 5);
        assert_eq!(map.world_get(15, 0), 0);
    }
}
