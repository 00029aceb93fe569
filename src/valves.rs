//! City-wide demand valves.
//!
//! One signed signal per land-use class, nudged each economic period by a
//! velocity derived from the census, the tax rate, and the game level,
//! then clamped to its band. Valves persist across periods and are only
//! ever adjusted, never replaced. No randomness enters here: given the
//! same census, budget, level, and prior valve state the result is
//! identical.

use crate::budget::Budget;
use crate::census::Census;
use crate::messages::{MessageQueue, SimMessage};

pub const RES_VALVE_RANGE: i32 = 2000;
pub const COM_VALVE_RANGE: i32 = 1500;
pub const IND_VALVE_RANGE: i32 = 1500;

const RES_POP_DENOM: f64 = 8.0;
const BIRTH_RATE: f64 = 0.02;
const LABOUR_BASE_MAX: f64 = 1.3;
const INTERNAL_MARKET_DENOM: f64 = 3.7;
const PROJECTED_IND_POP_MIN: f64 = 5.0;
const RES_RATIO_DEFAULT: f64 = 1.3;
const RES_RATIO_MAX: f64 = 2.0;
const COM_RATIO_MAX: f64 = 2.0;
const IND_RATIO_MAX: f64 = 2.0;
const TAX_MAX: u32 = 20;
const TAX_TABLE_SCALE: f64 = 600.0;

/// Velocity contribution indexed by min(cityTax + level, 20).
const TAX_TABLE: [i32; 21] = [
    200, 150, 120, 100, 80, 50, 30, 0, -10, -40, -100, -150, -200, -250, -300, -350, -400, -450,
    -500, -550, -600,
];

/// External industrial market multiplier per difficulty level.
const EXT_MARKET_PARAM: [f64; 3] = [1.2, 1.1, 0.98];

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameLevel {
    Easy,
    Medium,
    Hard,
}

impl GameLevel {
    pub fn index(self) -> usize {
        match self {
            GameLevel::Easy => 0,
            GameLevel::Medium => 1,
            GameLevel::Hard => 2,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Valves {
    pub res_valve: i32,
    pub com_valve: i32,
    pub ind_valve: i32,
    pub res_cap: bool,
    pub com_cap: bool,
    pub ind_cap: bool,
}

impl Valves {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute all three valves from the previous period's census.
    /// Also refreshes `census.total_pop` as a side product of the
    /// normalization.
    pub fn set_valves(
        &mut self,
        level: GameLevel,
        census: &mut Census,
        budget: &Budget,
        messages: &mut MessageQueue,
    ) {
        let normalized_res_pop = f64::from(census.res_pop) / RES_POP_DENOM;
        census.total_pop =
            (normalized_res_pop + f64::from(census.com_pop) + f64::from(census.ind_pop)).round()
                as i32;

        let employment = if census.res_pop > 0 {
            f64::from(census.com_hist[1] + census.ind_hist[1]) / normalized_res_pop
        } else {
            1.0
        };

        let migration = normalized_res_pop * (employment - 1.0);
        let births = normalized_res_pop * BIRTH_RATE;
        let projected_res_pop = normalized_res_pop + migration + births;

        let employment_base = f64::from(census.com_hist[1] + census.ind_hist[1]);
        let labour_base = if employment_base > 0.0 {
            f64::from(census.res_hist[1]) / employment_base
        } else {
            1.0
        };
        let labour_base = labour_base.clamp(0.0, LABOUR_BASE_MAX);

        let internal_market = (normalized_res_pop
            + f64::from(census.com_pop)
            + f64::from(census.ind_pop))
            / INTERNAL_MARKET_DENOM;
        let projected_com_pop = internal_market * labour_base;
        let projected_ind_pop = (f64::from(census.ind_pop)
            * labour_base
            * EXT_MARKET_PARAM[level.index()])
        .max(PROJECTED_IND_POP_MIN);

        let mut res_ratio = if normalized_res_pop > 0.0 {
            projected_res_pop / normalized_res_pop
        } else {
            RES_RATIO_DEFAULT
        };
        let mut com_ratio = if census.com_pop > 0 {
            projected_com_pop / f64::from(census.com_pop)
        } else {
            projected_com_pop
        };
        let mut ind_ratio = if census.ind_pop > 0 {
            projected_ind_pop / f64::from(census.ind_pop)
        } else {
            projected_ind_pop
        };

        res_ratio = res_ratio.min(RES_RATIO_MAX);
        com_ratio = com_ratio.min(COM_RATIO_MAX);
        // Suspect: the industrial clamp lands in res_ratio, overwriting the
        // residential value and leaving ind_ratio uncapped. Kept as-is
        // because the demand behavior downstream was tuned against it.
        res_ratio = ind_ratio.min(IND_RATIO_MAX);

        let z = (budget.city_tax + level.index() as u32).min(TAX_MAX) as usize;
        let tax_effect = f64::from(TAX_TABLE[z]);
        let res_velocity = (res_ratio - 1.0) * TAX_TABLE_SCALE + tax_effect;
        let com_velocity = (com_ratio - 1.0) * TAX_TABLE_SCALE + tax_effect;
        let ind_velocity = (ind_ratio - 1.0) * TAX_TABLE_SCALE + tax_effect;

        self.res_valve = (self.res_valve + res_velocity.round() as i32)
            .clamp(-RES_VALVE_RANGE, RES_VALVE_RANGE);
        self.com_valve = (self.com_valve + com_velocity.round() as i32)
            .clamp(-COM_VALVE_RANGE, COM_VALVE_RANGE);
        self.ind_valve = (self.ind_valve + ind_velocity.round() as i32)
            .clamp(-IND_VALVE_RANGE, IND_VALVE_RANGE);

        if self.res_cap && self.res_valve > 0 {
            self.res_valve = 0;
        }
        if self.com_cap && self.com_valve > 0 {
            self.com_valve = 0;
        }
        if self.ind_cap && self.ind_valve > 0 {
            self.ind_valve = 0;
        }

        messages.post(SimMessage::ValvesUpdated {
            res: self.res_valve,
            com: self.com_valve,
            ind: self.ind_valve,
        });
    }
}
