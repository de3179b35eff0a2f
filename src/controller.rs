//! Per-tick orchestration of the measurement rig.
//!
//! The control loop polls the three button lines once per tick and hands the
//! raw levels plus the current timestamp to [`Controller::tick`], which runs
//! debounce, power selection, and the measurement lifecycle, and returns the
//! effects for the loop to apply (motor drive writes, transition events for
//! the status sink). The pulse counter is shared with the edge task and only
//! drained here.

use crate::debounce::ButtonState;
use crate::measure::{MeasurementState, MeasurementStateMachine, PollEvent, StartAction};
use crate::power::{PowerLevel, PowerSelector};
use crate::presenter::DisplayFrame;
use crate::pulse::PulseCounter;
use crate::speed::MeasurementResult;

/// Raw button levels sampled at the start of a tick (true = pressed).
#[derive(Clone, Copy, Default, Debug)]
pub struct ButtonInputs {
    /// Start/reset line.
    pub start_pressed: bool,
    /// Half-speed (50%) line.
    pub half_pressed: bool,
    /// Dual-function (75%/100%) line.
    pub dual_pressed: bool,
}

/// Effects of a single tick for the main loop to apply.
#[derive(Default)]
pub struct TickResult {
    /// A measurement cycle began (Idle -> WarmingUp).
    pub started: bool,
    /// The counting window opened (WarmingUp -> Counting).
    pub counting_started: bool,
    /// A cycle completed with the drained count and computed result.
    pub completed: Option<(u32, MeasurementResult)>,
    /// A held result was cleared (start/reset press or power selection).
    pub unlocked: bool,
    /// The power level changed to this value.
    pub power_selected: Option<PowerLevel>,
    /// New motor drive value to write (on level change or reset).
    pub drive: Option<u8>,
}

/// Owns the control-side state: debounce per button, power selection, and
/// the measurement state machine.
pub struct Controller {
    machine: MeasurementStateMachine,
    selector: PowerSelector,
    start_button: ButtonState,
    half_button: ButtonState,
    dual_button: ButtonState,
}

impl Controller {
    pub const fn new() -> Self {
        Self {
            machine: MeasurementStateMachine::new(),
            selector: PowerSelector::new(),
            start_button: ButtonState::new(),
            half_button: ButtonState::new(),
            dual_button: ButtonState::new(),
        }
    }

    /// Current measurement phase.
    pub const fn state(&self) -> MeasurementState { self.machine.state() }

    /// Currently selected power level.
    pub const fn power_level(&self) -> PowerLevel { self.selector.level() }

    /// Run one control tick. Call once per tick with fresh input levels.
    pub fn tick(
        &mut self,
        pulses: &PulseCounter,
        inputs: ButtonInputs,
        now_us: u64,
    ) -> TickResult {
        let mut result = TickResult::default();

        // Start/reset control
        if self.start_button.just_pressed(inputs.start_pressed, now_us) {
            match self.machine.on_start_button(pulses, now_us) {
                StartAction::Started => result.started = true,
                StartAction::Unlocked => {
                    // Reset powers the motor down as well
                    result.unlocked = true;
                    self.selector.reset_off();
                    result.drive = Some(PowerLevel::Off.drive());
                }
                StartAction::Ignored => {}
            }
        }

        // Power selection is frozen while a measurement is in flight
        if !self.machine.is_measuring() {
            let mut selection_event = false;
            let mut level_changed = false;

            if self.half_button.just_pressed(inputs.half_pressed, now_us) {
                level_changed |= self.selector.select_half();
                selection_event = true;
            }

            self.dual_button.just_pressed(inputs.dual_pressed, now_us);
            if let Some(changed) = self.selector.update_dual(self.dual_button.is_held(), now_us) {
                level_changed |= changed;
                selection_event = true;
            }

            // Any selection while Locked clears the held result
            if selection_event && self.machine.clear_lock() {
                result.unlocked = true;
            }

            if level_changed {
                let level = self.selector.level();
                result.power_selected = Some(level);
                result.drive = Some(level.drive());
            }
        }

        // Window transitions by elapsed time
        match self.machine.poll(pulses, now_us) {
            Some(PollEvent::CountingStarted) => result.counting_started = true,
            Some(PollEvent::Completed { count, result: computed }) => result.completed = Some((count, computed)),
            None => {}
        }

        result
    }

    /// Snapshot the current display content.
    ///
    /// The numeric result is shown only while Locked; Idle/WarmingUp/Counting
    /// render the "none" sentinel with a zero frequency.
    pub fn display_frame(&self) -> DisplayFrame {
        let result = if self.machine.is_locked() {
            self.machine.result()
        } else {
            None
        };

        DisplayFrame {
            status: self.machine.state(),
            angular_speed: result.map(|r| r.angular_speed),
            frequency: result.map_or(0.0, |r| r.frequency),
            level: self.selector.level(),
        }
    }
}

impl Default for Controller {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
