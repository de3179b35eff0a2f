//! Motor power selection.
//!
//! Two buttons select one of four fixed power levels: a short press on the
//! half-speed button selects 50%, and the dual-function button selects 75%
//! on a short press or 100% when held beyond the hold threshold. While the
//! dual button is held the selection is revised continuously, so the display
//! previews the level that will apply.

use crate::config::HOLD_THRESHOLD_US;

/// Fixed motor power level with its PWM drive value and display label.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum PowerLevel {
    /// Motor off.
    #[default]
    Off,
    /// 50% power.
    Half,
    /// 75% power.
    ThreeQuarter,
    /// 100% power.
    Full,
}

impl PowerLevel {
    /// 8-bit PWM drive value written to the motor output.
    pub const fn drive(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Half => 128,
            Self::ThreeQuarter => 191,
            Self::Full => 255,
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Half => "50%",
            Self::ThreeQuarter => "75%",
            Self::Full => "100%",
        }
    }
}

/// Press-start tracking for the dual-function button. Cleared on release.
#[derive(Clone, Copy, Default, Debug)]
pub struct HoldTracker {
    press_start_us: Option<u64>,
}

impl HoldTracker {
    pub const fn new() -> Self {
        Self {
            press_start_us: None,
        }
    }

    /// Feed the debounced button level once per tick.
    ///
    /// Returns the held duration while the button is down, `None` once it is
    /// released (which also clears the tracked press start).
    pub fn update(
        &mut self,
        is_held: bool,
        now_us: u64,
    ) -> Option<u64> {
        if !is_held {
            self.press_start_us = None;
            return None;
        }

        let start = *self.press_start_us.get_or_insert(now_us);
        Some(now_us.saturating_sub(start))
    }
}

/// Maps button events to the selected [`PowerLevel`].
pub struct PowerSelector {
    level: PowerLevel,
    hold: HoldTracker,
}

impl PowerSelector {
    /// Start with the motor off.
    pub const fn new() -> Self {
        Self {
            level: PowerLevel::Off,
            hold: HoldTracker::new(),
        }
    }

    /// Currently selected level.
    pub const fn level(&self) -> PowerLevel { self.level }

    /// Half-speed button pressed. Returns whether the level changed.
    pub fn select_half(&mut self) -> bool { self.set(PowerLevel::Half) }

    /// Feed the dual-function button level once per tick.
    ///
    /// While held, selects ThreeQuarter until the hold passes the threshold,
    /// then Full. Returns `Some(level_changed)` while the button is held (a
    /// selection event), `None` when it is not.
    pub fn update_dual(
        &mut self,
        is_held: bool,
        now_us: u64,
    ) -> Option<bool> {
        let held_us = self.hold.update(is_held, now_us)?;
        let target = if held_us > HOLD_THRESHOLD_US {
            PowerLevel::Full
        } else {
            PowerLevel::ThreeQuarter
        };
        Some(self.set(target))
    }

    /// Reset to Off (start/reset button clearing a locked result).
    pub fn reset_off(&mut self) -> bool {
        self.hold = HoldTracker::new();
        self.set(PowerLevel::Off)
    }

    fn set(
        &mut self,
        level: PowerLevel,
    ) -> bool {
        let changed = self.level != level;
        self.level = level;
        changed
    }
}

impl Default for PowerSelector {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
