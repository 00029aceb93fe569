pub mod block_maps;
pub mod budget;
pub mod census;
pub mod city;
pub mod engine;
pub mod map;
pub mod messages;
pub mod rng;
pub mod scenario;
pub mod tiles;
pub mod tools;
pub mod traffic;
pub mod valves;
pub mod zones;

pub use city::City;
pub use engine::{Engine, PeriodSummary};
pub use scenario::{Scenario, ScenarioLoader};
pub use tools::ToolResult;
pub use valves::GameLevel;
