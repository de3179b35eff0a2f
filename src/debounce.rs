//! Time-based debounce for the physical input lines.
//!
//! Each input source owns its own [`DebounceRecord`], so sources never
//! interfere with each other. Buttons additionally go through [`ButtonState`]
//! for edge detection: a press is reported once, on the accepted edge.

use crate::config::BUTTON_DEBOUNCE_US;

/// Last-accepted-event timestamp for one input source.
///
/// An event is accepted iff more than `threshold_us` has passed since the
/// previously accepted event; rejected events leave the record unchanged.
#[derive(Clone, Copy, Default, Debug)]
pub struct DebounceRecord {
    last_accepted_us: Option<u64>,
}

impl DebounceRecord {
    /// Create a record with no accepted event yet (first event always passes).
    pub const fn new() -> Self {
        Self {
            last_accepted_us: None,
        }
    }

    /// Accept or reject an event at `now_us` against `threshold_us`.
    pub fn accept(
        &mut self,
        now_us: u64,
        threshold_us: u64,
    ) -> bool {
        if let Some(last) = self.last_accepted_us
            && now_us.saturating_sub(last) <= threshold_us
        {
            return false;
        }

        self.last_accepted_us = Some(now_us);
        true
    }
}

/// Button debounce state with time-based edge detection.
pub struct ButtonState {
    was_pressed: bool,
    debounce: DebounceRecord,
}

impl ButtonState {
    /// Create a new button state (not pressed).
    pub const fn new() -> Self {
        Self {
            was_pressed: false,
            debounce: DebounceRecord::new(),
        }
    }

    /// Returns true only on the press edge (button just pressed).
    ///
    /// Buttons are active-low, so the caller passes `is_low()` as
    /// `is_pressed`. A level change inside the debounce window is ignored and
    /// the stored level keeps its previous value until a change is accepted.
    pub fn just_pressed(
        &mut self,
        is_pressed: bool,
        now_us: u64,
    ) -> bool {
        if is_pressed != self.was_pressed {
            if !self.debounce.accept(now_us, BUTTON_DEBOUNCE_US) {
                return false;
            }

            self.was_pressed = is_pressed;

            // Press edge only, not release
            return is_pressed;
        }

        false
    }

    /// Debounced level of the button (true while held).
    pub const fn is_held(&self) -> bool { self.was_pressed }
}

impl Default for ButtonState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_accepted() {
        let mut record = DebounceRecord::new();
        assert!(record.accept(0, 500));
    }

    #[test]
    fn test_event_within_threshold_rejected() {
        let mut record = DebounceRecord::new();
        assert!(record.accept(1_000, 500));
        assert!(!record.accept(1_400, 500));
        // Exactly at the threshold is still a bounce (strict comparison)
        assert!(!record.accept(1_500, 500));
    }

    #[test]
    fn test_event_past_threshold_accepted() {
        let mut record = DebounceRecord::new();
        assert!(record.accept(1_000, 500));
        assert!(record.accept(1_501, 500));
    }

    #[test]
    fn test_rejected_event_leaves_record_unchanged() {
        let mut record = DebounceRecord::new();
        assert!(record.accept(1_000, 500));
        assert!(!record.accept(1_200, 500));
        // Still measured from t=1000, not t=1200
        assert!(record.accept(1_501, 500));
    }

    #[test]
    fn test_sources_are_independent() {
        let mut a = DebounceRecord::new();
        let mut b = DebounceRecord::new();
        assert!(a.accept(1_000, 500));
        // A fresh record is not affected by another source's history
        assert!(b.accept(1_001, 500));
    }

    #[test]
    fn test_button_press_edge_reported_once() {
        let mut button = ButtonState::new();
        assert!(button.just_pressed(true, 0));
        // Held: no repeated press events
        assert!(!button.just_pressed(true, 10_000));
        assert!(!button.just_pressed(true, 500_000));
    }

    #[test]
    fn test_button_release_is_not_a_press() {
        let mut button = ButtonState::new();
        assert!(button.just_pressed(true, 0));
        assert!(!button.just_pressed(false, 200_000));
        assert!(!button.is_held());
    }

    #[test]
    fn test_button_bounce_suppressed() {
        let mut button = ButtonState::new();
        assert!(button.just_pressed(true, 0));
        // Contact bounce: release + re-press inside the 100ms window
        assert!(!button.just_pressed(false, 20_000));
        assert!(!button.just_pressed(true, 40_000));
        assert!(button.is_held());
    }

    #[test]
    fn test_button_repress_after_debounce() {
        let mut button = ButtonState::new();
        assert!(button.just_pressed(true, 0));
        assert!(!button.just_pressed(false, 200_000));
        assert!(button.just_pressed(true, 400_000));
    }

    #[test]
    fn test_held_level_tracks_debounced_state() {
        let mut button = ButtonState::new();
        assert!(!button.is_held());
        button.just_pressed(true, 0);
        assert!(button.is_held());
        // Release rejected by debounce: level unchanged
        button.just_pressed(false, 50_000);
        assert!(button.is_held());
        // Release accepted after the window
        button.just_pressed(false, 200_000);
        assert!(!button.is_held());
    }
}
