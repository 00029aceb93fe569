//! City finances as the simulation core sees them: available funds, the
//! tax rate the valves feed on, and the service allocations surfaced in
//! period summaries. Tools are the only spenders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub total_funds: i64,
    pub city_tax: u32,
    pub road_percent: f64,
    pub fire_percent: f64,
    pub police_percent: f64,
}

impl Budget {
    pub fn new(total_funds: i64, city_tax: u32) -> Self {
        Self {
            total_funds,
            city_tax,
            road_percent: 1.0,
            fire_percent: 1.0,
            police_percent: 1.0,
        }
    }

    pub fn can_afford(&self, cost: i64) -> bool {
        self.total_funds >= cost
    }

    /// Debit `cost`. Callers check affordability first; going negative
    /// here would mean a tool skipped its funding gate.
    pub fn spend(&mut self, cost: i64) {
        debug_assert!(self.can_afford(cost), "spend without funding check");
        self.total_funds -= cost;
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::new(20_000, 7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_debits_funds() {
        let mut budget = Budget::new(100, 7);
        assert!(budget.can_afford(100));
        assert!(!budget.can_afford(101));
        budget.spend(40);
        assert_eq!(budget.total_funds, 60);
    }
}
