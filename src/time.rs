//! Fixed-timestep clock over the browser's variable-rate draw loop.
//!
//! `draw_web()` fires at ~60fps; `GameTime` accumulates the wall-clock
//! deltas and hands the game whole one-second ticks, so the simulation is
//! deterministic regardless of frame rate. Long absences are not replayed
//! tick by tick here; they go through the offline progress path instead.

pub struct GameTime {
    ms_per_tick: f64,
    /// Milliseconds received but not yet consumed as ticks.
    accumulator: f64,
    pub total_ticks: u64,
    /// Last timestamp fed in; `None` before the first frame.
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (ms) once per frame and get back the
    /// number of whole ticks to run. The frame delta is clamped to two
    /// ticks' worth so a backgrounded tab resumes instead of fast-forwarding.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, self.ms_per_tick * 2.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
