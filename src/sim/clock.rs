//! Monotonic simulated clock for deterministic scheduling.
//!
//! The clock only advances when the engine explicitly moves time forward.
//! This keeps the tick loop deterministic and replayable.

/// Tick-based simulated clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimClock {
    now: u64,
}

impl SimClock {
    /// Create a new clock at tick 0.
    pub fn new() -> Self {
        Self { now: 0 }
    }

    /// Current time in ticks.
    #[inline(always)]
    pub fn now_ticks(&self) -> u64 {
        self.now
    }

    /// Advance by one tick, saturating on overflow.
    #[inline(always)]
    pub fn tick(&mut self) {
        self.now = self.now.saturating_add(1);
    }

    /// Whether the clock has consumed the full runtime bound.
    #[inline(always)]
    pub fn exhausted(&self, bound: u64) -> bool {
        self.now >= bound
    }
}
