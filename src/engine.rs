//! The period driver.
//!
//! One `simulate_period` call is the atomic unit of time: histories roll,
//! valves adjust, the census resets, and the scanner walks the whole grid
//! once in raster order. Construction tools only run between periods, so
//! a scan always sees a consistent grid.

use serde::Serialize;
use tracing::{debug, info};

use crate::city::City;
use crate::map::MapError;
use crate::messages::{CityClass, SimMessage};
use crate::zones::{self, MapScanner};

#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    pub period: u64,
    pub total_pop: i32,
    pub res_pop: i32,
    pub com_pop: i32,
    pub ind_pop: i32,
    pub res_valve: i32,
    pub com_valve: i32,
    pub ind_valve: i32,
    pub city_class: CityClass,
    pub total_funds: i64,
    pub messages: Vec<SimMessage>,
}

pub struct Engine {
    pub city: City,
    scanner: MapScanner,
    period: u64,
    city_class: CityClass,
}

impl Engine {
    pub fn new(city: City) -> Self {
        let mut scanner = MapScanner::new();
        zones::register_residential(&mut scanner);
        zones::register_commercial(&mut scanner);
        zones::register_industrial(&mut scanner);
        Self {
            city,
            scanner,
            period: 0,
            city_class: CityClass::Village,
        }
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    pub fn city_class(&self) -> CityClass {
        self.city_class
    }

    /// Advance the simulation by one period.
    pub fn simulate_period(&mut self) -> Result<PeriodSummary, MapError> {
        let city = &mut self.city;

        city.census.record_history();
        city.valves
            .set_valves(city.level, &mut city.census, &city.budget, &mut city.messages);

        // One hospital serves 256 residents; the scan reacts to the flag.
        let wanted = city.census.res_pop / 256;
        city.census.need_hospital = match city.census.hospital_pop {
            p if p < wanted => 1,
            p if p > wanted => -1,
            _ => 0,
        };

        city.census.clear_period();
        self.scanner.scan(&mut self.city)?;

        let city = &mut self.city;
        let class = CityClass::from_population(city.census.total_pop);
        if class > self.city_class {
            info!(?class, total_pop = city.census.total_pop, "city graduated");
            city.messages.post(SimMessage::MilestoneReached(class));
            self.city_class = class;
        }
        if city.budget.total_funds <= 0 {
            city.messages.post(SimMessage::BudgetNeeded);
        }

        self.period += 1;
        let summary = PeriodSummary {
            period: self.period,
            total_pop: city.census.total_pop,
            res_pop: city.census.res_pop,
            com_pop: city.census.com_pop,
            ind_pop: city.census.ind_pop,
            res_valve: city.valves.res_valve,
            com_valve: city.valves.com_valve,
            ind_valve: city.valves.ind_valve,
            city_class: self.city_class,
            total_funds: city.budget.total_funds,
            messages: city.messages.drain(),
        };
        debug!(
            period = summary.period,
            total_pop = summary.total_pop,
            res = summary.res_valve,
            com = summary.com_valve,
            ind = summary.ind_valve,
            "period complete"
        );
        Ok(summary)
    }
}
