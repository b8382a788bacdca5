//! Stock criterion behaviors.

use super::criterion::{CriterionBehavior, DisplayData};

/// A criterion whose flag is set entirely from outside.
#[derive(Clone, Debug)]
pub struct ManualCriterion {
    description: String,
    hidden: bool,
}

impl ManualCriterion {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            hidden: false,
        }
    }

    /// A criterion that never shows up in listings.
    pub fn hidden(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            hidden: true,
        }
    }
}

impl CriterionBehavior for ManualCriterion {
    fn display_data(&self, satisfied: bool) -> Option<DisplayData> {
        if self.hidden {
            return None;
        }
        Some(DisplayData::new(self.description.clone(), satisfied))
    }
}

/// Satisfied once `duration` ticks have elapsed after the contract went active.
#[derive(Clone, Debug)]
pub struct TimerCriterion {
    duration: u64,
    elapsed: u64,
    running: bool,
}

impl TimerCriterion {
    #[must_use]
    pub fn new(duration: u64) -> Self {
        Self {
            duration,
            elapsed: 0,
            running: false,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.duration.saturating_sub(self.elapsed)
    }
}

impl CriterionBehavior for TimerCriterion {
    fn start_ticking(&mut self) {
        self.running = true;
    }

    fn tick(&mut self, elapsed: u64) -> Option<bool> {
        if !self.running {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(elapsed);
        Some(self.elapsed >= self.duration)
    }

    fn display_data(&self, satisfied: bool) -> Option<DisplayData> {
        let description = if satisfied {
            "Time has run out.".to_string()
        } else {
            format!("{} ticks remaining.", self.remaining())
        };
        Some(DisplayData::new(description, satisfied))
    }
}
