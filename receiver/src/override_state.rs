//! Manual override arbitration
//!
//! The override channel is read against three thresholds. The band between
//! `low_us` and `high_us` is where a failing receiver settles, so a pulse there
//! decides nothing and the previous state holds.

use crate::config::OverrideThresholds;

/// Who commands the vehicle
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum OverrideState {
    /// Autonomy commands the vehicle
    #[default]
    Disabled,
    /// The radio commands the vehicle
    Enabled,
}

/// Reading of a single override pulse
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OverrideSignal {
    /// Switch off, signal lost, or pulse out of band
    Disable,
    /// Switch on
    Enable,
    /// Mid-band pulse
    Indeterminate,
}

impl OverrideThresholds {
    pub fn classify(&self, width_us: u32) -> OverrideSignal {
        if width_us < self.low_us || width_us > self.upper_us {
            OverrideSignal::Disable
        } else if width_us > self.high_us {
            OverrideSignal::Enable
        } else {
            OverrideSignal::Indeterminate
        }
    }
}

impl OverrideState {
    pub fn is_enabled(self) -> bool {
        self == OverrideState::Enabled
    }

    /// State after observing an override pulse of `width_us`
    ///
    /// Returns `None` when the pulse is indeterminate and the current state
    /// must be kept as is.
    pub fn next(self, width_us: u32, thresholds: &OverrideThresholds) -> Option<OverrideState> {
        match thresholds.classify(width_us) {
            OverrideSignal::Disable => Some(OverrideState::Disabled),
            OverrideSignal::Enable => Some(OverrideState::Enabled),
            OverrideSignal::Indeterminate => None,
        }
    }
}
