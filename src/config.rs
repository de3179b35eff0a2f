//! Rig configuration constants.
//!
//! All durations are microseconds read from a single monotonic clock
//! (`embassy_time::Instant` on target, a simulated counter in tests), so the
//! measurement window boundaries and the pulse debounce compare against the
//! same timebase.

// =============================================================================
// Measurement Window
// =============================================================================

/// Dead time between the start event and the counting window, letting the
/// motor reach steady speed. No pulses are accepted during warm-up.
pub const START_DELAY_US: u64 = 3_000_000;

/// Length of the counting window. Pulses are accepted only inside it.
pub const MEASURE_DURATION_US: u64 = 2_000_000;

/// Hall sensor pulses per full rotation of the sensor shaft.
pub const PULSES_PER_REVOLUTION: u32 = 7;

// =============================================================================
// Input Conditioning
// =============================================================================

/// Minimum spacing between accepted button events (contact bounce filter).
pub const BUTTON_DEBOUNCE_US: u64 = 100_000;

/// Minimum spacing between accepted Hall pulses.
pub const PULSE_DEBOUNCE_US: u64 = 500;

/// Hold duration on the dual-function button that upgrades the selection
/// from 75% to 100%.
pub const HOLD_THRESHOLD_US: u64 = 1_000_000;

// =============================================================================
// Control Loop
// =============================================================================

/// Control loop tick interval in milliseconds. Inputs are polled and window
/// boundaries checked once per tick.
pub const TICK_INTERVAL_MS: u64 = 2;
