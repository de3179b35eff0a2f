//! Display frame dedup and status labels.
//!
//! The state machine stays free of strings; measurement phases and power
//! levels are mapped to display text only here, at the presentation
//! boundary. [`RenderState`] suppresses redraws while the visible content is
//! unchanged, so the panel is not rewritten on every tick.

#[cfg(not(test))]
use micromath::F32Ext;

use crate::measure::MeasurementState;
use crate::power::PowerLevel;

/// Status line text for each measurement phase.
pub const fn status_label(state: MeasurementState) -> &'static str {
    match state {
        MeasurementState::Idle => "READY",
        MeasurementState::WarmingUp => "WARM-UP",
        MeasurementState::Counting => "COUNTING",
        MeasurementState::Locked => "RESULT",
    }
}

/// One frame of display content, produced by the controller every tick.
///
/// `angular_speed` is `None` while no numeric result should be shown
/// (Idle and the whole measurement cycle); a locked zero result is
/// `Some(0.0)` and renders as a number.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DisplayFrame {
    pub status: MeasurementState,
    pub angular_speed: Option<f32>,
    pub frequency: f32,
    pub level: PowerLevel,
}

/// Tracks the last rendered content and reports whether a frame needs
/// drawing.
///
/// The dirty check compares the (status, speed, level) tuple, with the speed
/// rounded to the two decimals the screen shows, so frames that would render
/// identically are dropped. Frequency is not compared separately: it only
/// changes together with the speed.
pub struct RenderState {
    prev_status: Option<MeasurementState>,
    prev_speed_centi: Option<u32>,
    prev_level: Option<PowerLevel>,
}

impl RenderState {
    /// Create a render state that reports the first frame dirty.
    pub const fn new() -> Self {
        Self {
            prev_status: None,
            prev_speed_centi: None,
            prev_level: None,
        }
    }

    /// Check whether `frame` differs from the last rendered content, and
    /// record it as rendered if it does.
    pub fn check_dirty(
        &mut self,
        frame: &DisplayFrame,
    ) -> bool {
        // Round to display precision so the check matches the `{:.2}`
        // formatting of the rendered value.
        let speed_centi = frame.angular_speed.map(|v| (v * 100.0).round() as u32);

        let dirty = self.prev_status != Some(frame.status)
            || self.prev_speed_centi != speed_centi
            || self.prev_level != Some(frame.level);

        if dirty {
            self.prev_status = Some(frame.status);
            self.prev_speed_centi = speed_centi;
            self.prev_level = Some(frame.level);
        }

        dirty
    }
}

impl Default for RenderState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_frame() -> DisplayFrame {
        DisplayFrame {
            status: MeasurementState::Idle,
            angular_speed: None,
            frequency: 0.0,
            level: PowerLevel::Off,
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(MeasurementState::Idle), "READY");
        assert_eq!(status_label(MeasurementState::WarmingUp), "WARM-UP");
        assert_eq!(status_label(MeasurementState::Counting), "COUNTING");
        assert_eq!(status_label(MeasurementState::Locked), "RESULT");
    }

    #[test]
    fn test_first_frame_is_dirty() {
        let mut render = RenderState::new();
        assert!(render.check_dirty(&idle_frame()));
    }

    #[test]
    fn test_unchanged_frame_suppressed() {
        let mut render = RenderState::new();
        render.check_dirty(&idle_frame());
        assert!(!render.check_dirty(&idle_frame()));
        assert!(!render.check_dirty(&idle_frame()));
    }

    #[test]
    fn test_status_change_is_dirty() {
        let mut render = RenderState::new();
        render.check_dirty(&idle_frame());

        let mut frame = idle_frame();
        frame.status = MeasurementState::WarmingUp;
        assert!(render.check_dirty(&frame));
    }

    #[test]
    fn test_level_change_is_dirty() {
        let mut render = RenderState::new();
        render.check_dirty(&idle_frame());

        let mut frame = idle_frame();
        frame.level = PowerLevel::Half;
        assert!(render.check_dirty(&frame));
    }

    #[test]
    fn test_speed_compared_at_display_precision() {
        let mut render = RenderState::new();
        let mut frame = idle_frame();
        frame.status = MeasurementState::Locked;
        frame.angular_speed = Some(0.31416);
        assert!(render.check_dirty(&frame));

        // Same value after {:.2} rounding: suppressed
        frame.angular_speed = Some(0.31424);
        assert!(!render.check_dirty(&frame));

        // Different at two decimals: dirty
        frame.angular_speed = Some(0.32);
        assert!(render.check_dirty(&frame));
    }

    #[test]
    fn test_zero_result_differs_from_none() {
        let mut render = RenderState::new();
        render.check_dirty(&idle_frame());

        let mut frame = idle_frame();
        frame.status = MeasurementState::Locked;
        frame.angular_speed = Some(0.0);
        assert!(render.check_dirty(&frame));
    }
}
