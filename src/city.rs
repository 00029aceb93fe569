//! The per-simulation context object.
//!
//! Everything mutable lives here and is passed explicitly to zone
//! handlers, tools, and the valve recomputation - there is no process-wide
//! state. One seedable generator serves the whole simulation so a fixed
//! seed reproduces every growth decision.

use crate::block_maps::BlockMaps;
use crate::budget::Budget;
use crate::census::Census;
use crate::map::TileMap;
use crate::messages::MessageQueue;
use crate::rng::{CityRng, Randomizer};
use crate::tiles::Tile;
use crate::valves::{GameLevel, Valves};

pub struct City {
    pub map: TileMap,
    pub block_maps: BlockMaps,
    pub census: Census,
    pub valves: Valves,
    pub budget: Budget,
    pub messages: MessageQueue,
    pub rng: Box<dyn Randomizer>,
    pub level: GameLevel,
    pub auto_bulldoze: bool,
}

impl City {
    pub fn new(width: i32, height: i32, level: GameLevel, seed: u64) -> Self {
        Self::with_randomizer(width, height, level, Box::new(CityRng::from_seed(seed)))
    }

    /// Build a city around an injected generator; tests use this to force
    /// exact random outcomes.
    pub fn with_randomizer(
        width: i32,
        height: i32,
        level: GameLevel,
        rng: Box<dyn Randomizer>,
    ) -> Self {
        Self {
            map: TileMap::new(width, height, Tile::default()),
            block_maps: BlockMaps::new(width, height),
            census: Census::new(),
            valves: Valves::new(),
            budget: Budget::default(),
            messages: MessageQueue::new(),
            rng,
            level,
            auto_bulldoze: true,
        }
    }
}
