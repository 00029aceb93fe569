//! Per-period population aggregates.
//!
//! Scan handlers add into the current counters; the engine snapshots them
//! into the ten-entry histories at each period boundary. Index 0 is the
//! latest recorded period, index 1 the one before it - the valve formulas
//! read index 1.

pub const HISTORY_LEN: usize = 10;

#[derive(Debug, Default, Clone)]
pub struct Census {
    pub res_pop: i32,
    pub com_pop: i32,
    pub ind_pop: i32,
    pub res_zone_pop: i32,
    pub com_zone_pop: i32,
    pub ind_zone_pop: i32,
    pub hospital_pop: i32,
    /// 1 = a hospital is wanted, -1 = one too many, 0 = satisfied.
    pub need_hospital: i32,
    pub total_pop: i32,
    pub res_hist: [i32; HISTORY_LEN],
    pub com_hist: [i32; HISTORY_LEN],
    pub ind_hist: [i32; HISTORY_LEN],
}

impl Census {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the counters the scan rebuilds. Histories, the hospital need
    /// flag, and the derived total survive across periods.
    pub fn clear_period(&mut self) {
        self.res_pop = 0;
        self.com_pop = 0;
        self.ind_pop = 0;
        self.res_zone_pop = 0;
        self.com_zone_pop = 0;
        self.ind_zone_pop = 0;
        self.hospital_pop = 0;
    }

    /// Push the period's populations onto the front of each history.
    pub fn record_history(&mut self) {
        shift_in(&mut self.res_hist, self.res_pop);
        shift_in(&mut self.com_hist, self.com_pop);
        shift_in(&mut self.ind_hist, self.ind_pop);
    }
}

fn shift_in(hist: &mut [i32; HISTORY_LEN], value: i32) {
    for i in (1..HISTORY_LEN).rev() {
        hist[i] = hist[i - 1];
    }
    hist[0] = value;
}
