use serde::{Deserialize, Serialize};

/// One-second countdown driven by external ticks.
///
/// The clock never reads wall time; whoever owns the session posts a tick
/// once per second. Pausing suspends ticking without losing time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Countdown {
    pub remaining: u32,
    pub running: bool,
}

impl Countdown {
    /// A running countdown starting at `seconds`
    pub fn start(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            running: true,
        }
    }

    /// Advance by one second. Returns true if the remaining time changed.
    pub fn tick(&mut self) -> bool {
        if self.running && self.remaining > 0 {
            self.remaining -= 1;
            true
        } else {
            false
        }
    }

    pub fn toggle_pause(&mut self) {
        self.running = !self.running;
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// True once the remaining time falls below `threshold` seconds
    pub fn is_below(&self, threshold: u32) -> bool {
        self.remaining < threshold
    }

    pub fn label(&self) -> String {
        format_clock(self.remaining)
    }

    /// Snapshot for clients, flagging low time below `low_threshold`
    pub fn view(&self, low_threshold: u32) -> ClockView {
        ClockView {
            remaining: self.remaining,
            label: self.label(),
            running: self.running,
            low: self.is_below(low_threshold),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClockView {
    pub remaining: u32,
    pub label: String,
    pub running: bool,
    pub low: bool,
}

/// Format seconds as `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
