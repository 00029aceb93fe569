//! Outbound signals from the engine to its controller.
//!
//! The core never talks to a UI directly; it posts typed messages onto a
//! queue the caller drains once per period.

use std::collections::VecDeque;

use serde::Serialize;

/// Population classes, in ascending order. A city graduates when its
/// total population crosses the next threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CityClass {
    Village,
    Town,
    City,
    Capital,
    Metropolis,
    Megalopolis,
}

impl CityClass {
    pub fn from_population(total_pop: i32) -> Self {
        match total_pop {
            p if p < 2_000 => CityClass::Village,
            p if p < 10_000 => CityClass::Town,
            p if p < 50_000 => CityClass::City,
            p if p < 100_000 => CityClass::Capital,
            p if p < 500_000 => CityClass::Metropolis,
            _ => CityClass::Megalopolis,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SimMessage {
    ValvesUpdated {
        res: i32,
        com: i32,
        ind: i32,
    },
    MilestoneReached(CityClass),
    /// Funds ran dry; the controller should raise the budget dialog.
    BudgetNeeded,
}

#[derive(Debug, Default)]
pub struct MessageQueue {
    queue: VecDeque<SimMessage>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, message: SimMessage) {
        self.queue.push_back(message);
    }

    /// Remove and return everything posted since the last drain, oldest
    /// first.
    pub fn drain(&mut self) -> Vec<SimMessage> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_fifo_and_empties() {
        let mut queue = MessageQueue::new();
        queue.post(SimMessage::BudgetNeeded);
        queue.post(SimMessage::MilestoneReached(CityClass::Town));
        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], SimMessage::BudgetNeeded);
        assert!(queue.is_empty());
    }

    #[test]
    fn city_class_thresholds() {
        assert_eq!(CityClass::from_population(0), CityClass::Village);
        assert_eq!(CityClass::from_population(1_999), CityClass::Village);
        assert_eq!(CityClass::from_population(2_000), CityClass::Town);
        assert_eq!(CityClass::from_population(120_000), CityClass::Metropolis);
        assert_eq!(CityClass::from_population(600_000), CityClass::Megalopolis);
    }
}
