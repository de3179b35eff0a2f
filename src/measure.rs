//! Measurement lifecycle state machine.
//!
//! One instance governs the whole rig. Transitions are driven only by
//! elapsed time against the captured start timestamp and by the start/reset
//! button:
//!
//! - **Idle**: ready to measure. A start event enters WarmingUp.
//! - **WarmingUp**: dead time while the motor settles; no counting.
//! - **Counting**: the pulse counter is enabled for the counting window.
//! - **Locked**: holds the computed result until a start event clears it.
//!
//! A start event during WarmingUp or Counting is ignored - a measurement
//! always runs to completion once started.

use crate::config::{MEASURE_DURATION_US, START_DELAY_US};
use crate::pulse::PulseCounter;
use crate::speed::MeasurementResult;

/// Lifecycle phase of the measurement rig.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum MeasurementState {
    /// Ready to measure; power level may be changed.
    #[default]
    Idle,
    /// Start delay running; the motor is settling.
    WarmingUp,
    /// Counting window open; pulses are accumulating.
    Counting,
    /// Result held on display until reset.
    Locked,
}

/// Outcome of a start/reset button event.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StartAction {
    /// Idle -> WarmingUp; a measurement cycle began.
    Started,
    /// Locked -> Idle; the held result was cleared.
    Unlocked,
    /// Measurement in flight; the event had no effect.
    Ignored,
}

/// Timed transition reported by [`MeasurementStateMachine::poll`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PollEvent {
    /// WarmingUp -> Counting; the counting window opened.
    CountingStarted,
    /// Counting -> Locked with the drained count and computed result.
    Completed { count: u32, result: MeasurementResult },
}

/// Drives [`MeasurementState`] from button events and elapsed time.
pub struct MeasurementStateMachine {
    state: MeasurementState,
    started_at_us: u64,
    result: Option<MeasurementResult>,
}

impl MeasurementStateMachine {
    pub const fn new() -> Self {
        Self {
            state: MeasurementState::Idle,
            started_at_us: 0,
            result: None,
        }
    }

    /// Current lifecycle phase.
    pub const fn state(&self) -> MeasurementState { self.state }

    /// Result of the last completed cycle, until the next one starts.
    pub const fn result(&self) -> Option<MeasurementResult> { self.result }

    /// True while a cycle is in flight (WarmingUp or Counting).
    pub const fn is_measuring(&self) -> bool {
        matches!(self.state, MeasurementState::WarmingUp | MeasurementState::Counting)
    }

    /// True while a result is held on display.
    pub const fn is_locked(&self) -> bool { matches!(self.state, MeasurementState::Locked) }

    /// Handle a debounced start/reset press.
    ///
    /// From Idle this begins a cycle: the counter is cleared and left
    /// disabled - counting starts at the window boundary, not here. From
    /// Locked it only clears the held result; the next press starts a new
    /// cycle. In flight, the press is ignored.
    pub fn on_start_button(
        &mut self,
        pulses: &PulseCounter,
        now_us: u64,
    ) -> StartAction {
        match self.state {
            MeasurementState::Idle => {
                self.state = MeasurementState::WarmingUp;
                self.started_at_us = now_us;
                self.result = None;
                pulses.set_enabled(false);
                pulses.take_and_reset();
                StartAction::Started
            }
            MeasurementState::Locked => {
                self.state = MeasurementState::Idle;
                StartAction::Unlocked
            }
            MeasurementState::WarmingUp | MeasurementState::Counting => StartAction::Ignored,
        }
    }

    /// Clear a held result without a start/reset press (power selection
    /// while Locked). Returns whether the lock was cleared.
    pub fn clear_lock(&mut self) -> bool {
        if self.is_locked() {
            self.state = MeasurementState::Idle;
            true
        } else {
            false
        }
    }

    /// Check elapsed time against the window boundaries; call once per tick.
    pub fn poll(
        &mut self,
        pulses: &PulseCounter,
        now_us: u64,
    ) -> Option<PollEvent> {
        let elapsed = now_us.saturating_sub(self.started_at_us);

        match self.state {
            MeasurementState::WarmingUp if elapsed >= START_DELAY_US => {
                // Discard stray counts from the warm-up phase, then open
                // the window.
                pulses.take_and_reset();
                pulses.set_enabled(true);
                self.state = MeasurementState::Counting;
                Some(PollEvent::CountingStarted)
            }
            MeasurementState::Counting if elapsed >= START_DELAY_US + MEASURE_DURATION_US => {
                pulses.set_enabled(false);
                let count = pulses.take_and_reset();
                let result = MeasurementResult::from_pulse_count(count);
                self.result = Some(result);
                self.state = MeasurementState::Locked;
                Some(PollEvent::Completed { count, result })
            }
            _ => None,
        }
    }
}

impl Default for MeasurementStateMachine {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::DebounceRecord;

    const MS: u64 = 1_000;

    fn started_machine(pulses: &PulseCounter) -> MeasurementStateMachine {
        let mut machine = MeasurementStateMachine::new();
        assert_eq!(machine.on_start_button(pulses, 0), StartAction::Started);
        machine
    }

    #[test]
    fn test_initial_state_idle() {
        let machine = MeasurementStateMachine::new();
        assert_eq!(machine.state(), MeasurementState::Idle);
        assert!(machine.result().is_none());
        assert!(!machine.is_measuring());
        assert!(!machine.is_locked());
    }

    #[test]
    fn test_start_enters_warm_up_without_counting() {
        let pulses = PulseCounter::new();
        let machine = started_machine(&pulses);
        assert_eq!(machine.state(), MeasurementState::WarmingUp);
        assert!(machine.is_measuring());
        assert!(!pulses.is_enabled());
    }

    #[test]
    fn test_warm_up_runs_full_delay() {
        let pulses = PulseCounter::new();
        let mut machine = started_machine(&pulses);
        assert!(machine.poll(&pulses, 1_000 * MS).is_none());
        assert!(machine.poll(&pulses, 2_999 * MS).is_none());
        assert_eq!(machine.state(), MeasurementState::WarmingUp);
    }

    #[test]
    fn test_counting_window_opens_at_delay_boundary() {
        let pulses = PulseCounter::new();
        let mut machine = started_machine(&pulses);
        assert_eq!(machine.poll(&pulses, 3_000 * MS), Some(PollEvent::CountingStarted));
        assert_eq!(machine.state(), MeasurementState::Counting);
        assert!(pulses.is_enabled());
    }

    #[test]
    fn test_window_open_discards_stray_counts() {
        let pulses = PulseCounter::new();
        let mut debounce = DebounceRecord::new();
        let mut machine = started_machine(&pulses);
        // Force a stray count in before the window opens
        pulses.set_enabled(true);
        pulses.on_edge(&mut debounce, 1_000 * MS);
        pulses.set_enabled(false);

        machine.poll(&pulses, 3_000 * MS);
        machine.poll(&pulses, 5_000 * MS);
        let result = machine.result().unwrap();
        assert_eq!(result.frequency, 0.0);
    }

    #[test]
    fn test_full_cycle_with_pulses() {
        let pulses = PulseCounter::new();
        let mut debounce = DebounceRecord::new();
        let mut machine = started_machine(&pulses);

        machine.poll(&pulses, 3_000 * MS);
        // 35 pulses evenly spaced inside the 2s window
        for i in 0..35u64 {
            pulses.on_edge(&mut debounce, (3_000 + 57 * (i + 1)) * MS);
        }

        let event = machine.poll(&pulses, 5_000 * MS);
        match event {
            Some(PollEvent::Completed { count, result }) => {
                assert_eq!(count, 35);
                assert!((result.angular_speed - 0.314_159_27).abs() < 1e-5);
                assert_eq!(result.frequency, 17.5);
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(machine.state(), MeasurementState::Locked);
        assert!(!pulses.is_enabled());
    }

    #[test]
    fn test_zero_pulse_window_locks_zero_result() {
        let pulses = PulseCounter::new();
        let mut machine = started_machine(&pulses);
        machine.poll(&pulses, 3_000 * MS);
        machine.poll(&pulses, 5_000 * MS);
        let result = machine.result().unwrap();
        assert_eq!(result.angular_speed, 0.0);
        assert_eq!(result.frequency, 0.0);
        assert!(machine.is_locked());
    }

    #[test]
    fn test_start_ignored_while_measuring() {
        let pulses = PulseCounter::new();
        let mut machine = started_machine(&pulses);
        assert_eq!(machine.on_start_button(&pulses, 1_000 * MS), StartAction::Ignored);
        assert_eq!(machine.state(), MeasurementState::WarmingUp);

        machine.poll(&pulses, 3_000 * MS);
        assert_eq!(machine.on_start_button(&pulses, 4_000 * MS), StartAction::Ignored);
        assert_eq!(machine.state(), MeasurementState::Counting);
        // The ignored press did not restart the window
        assert!(machine.poll(&pulses, 5_000 * MS).is_some());
    }

    #[test]
    fn test_start_while_locked_only_unlocks() {
        let pulses = PulseCounter::new();
        let mut machine = started_machine(&pulses);
        machine.poll(&pulses, 3_000 * MS);
        machine.poll(&pulses, 5_000 * MS);

        assert_eq!(machine.on_start_button(&pulses, 6_000 * MS), StartAction::Unlocked);
        assert_eq!(machine.state(), MeasurementState::Idle);
        // The next press starts a fresh cycle
        assert_eq!(machine.on_start_button(&pulses, 7_000 * MS), StartAction::Started);
    }

    #[test]
    fn test_result_held_across_unlock_until_next_start() {
        let pulses = PulseCounter::new();
        let mut machine = started_machine(&pulses);
        machine.poll(&pulses, 3_000 * MS);
        machine.poll(&pulses, 5_000 * MS);
        assert!(machine.result().is_some());

        machine.on_start_button(&pulses, 6_000 * MS);
        assert!(machine.result().is_some());
        machine.on_start_button(&pulses, 7_000 * MS);
        assert!(machine.result().is_none());
    }

    #[test]
    fn test_clear_lock_only_acts_when_locked() {
        let pulses = PulseCounter::new();
        let mut machine = MeasurementStateMachine::new();
        assert!(!machine.clear_lock());

        machine.on_start_button(&pulses, 0);
        assert!(!machine.clear_lock());
        machine.poll(&pulses, 3_000 * MS);
        machine.poll(&pulses, 5_000 * MS);
        assert!(machine.clear_lock());
        assert_eq!(machine.state(), MeasurementState::Idle);
    }

    #[test]
    fn test_late_poll_completes_in_two_steps() {
        let pulses = PulseCounter::new();
        let mut machine = started_machine(&pulses);
        // Stalled loop: first poll past both boundaries opens the window,
        // the next one closes it with whatever was counted (nothing).
        assert_eq!(machine.poll(&pulses, 6_000 * MS), Some(PollEvent::CountingStarted));
        assert!(matches!(machine.poll(&pulses, 6_002 * MS), Some(PollEvent::Completed { count: 0, .. })));
    }
}
