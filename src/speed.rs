//! Speed computation from a drained pulse count.

use core::f32::consts::PI;

use crate::config::{MEASURE_DURATION_US, PULSES_PER_REVOLUTION};

/// Calibration divisor between the sensor shaft and the output shaft of the
/// physical rig. Measured on the bench, not derived.
const ANGULAR_CALIBRATION_DIVISOR: f32 = 50.0;

/// Calibration divisor for the reported event frequency.
const FREQUENCY_DIVISOR: f32 = 2.0;

/// Result of one measurement cycle. Produced on the Counting -> Locked
/// transition and held unchanged until the next measurement starts.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct MeasurementResult {
    /// Angular speed in rad/s. Non-negative.
    pub angular_speed: f32,
    /// Event frequency in Hz. Non-negative.
    pub frequency: f32,
}

impl MeasurementResult {
    /// Convert a pulse count collected over the counting window.
    pub fn from_pulse_count(count: u32) -> Self {
        let window_secs = MEASURE_DURATION_US as f32 / 1_000_000.0;
        let angular_speed =
            count as f32 * 2.0 * PI / (PULSES_PER_REVOLUTION as f32 * window_secs) / ANGULAR_CALIBRATION_DIVISOR;
        let frequency = count as f32 / FREQUENCY_DIVISOR;

        Self {
            angular_speed,
            frequency,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_pulses_zero_result() {
        let result = MeasurementResult::from_pulse_count(0);
        assert_eq!(result.angular_speed, 0.0);
        assert_eq!(result.frequency, 0.0);
    }

    #[test]
    fn test_thirty_five_pulses() {
        // 35 * 2pi / (7 * 2.0) / 50
        let result = MeasurementResult::from_pulse_count(35);
        assert!((result.angular_speed - 0.314_159_27).abs() < 1e-5);
        assert_eq!(result.frequency, 17.5);
    }

    #[test]
    fn test_frequency_is_half_the_count() {
        assert_eq!(MeasurementResult::from_pulse_count(1).frequency, 0.5);
        assert_eq!(MeasurementResult::from_pulse_count(70).frequency, 35.0);
    }

    #[test]
    fn test_outputs_non_negative() {
        for count in [0u32, 1, 7, 35, 10_000] {
            let result = MeasurementResult::from_pulse_count(count);
            assert!(result.angular_speed >= 0.0);
            assert!(result.frequency >= 0.0);
        }
    }

    #[test]
    fn test_monotonically_non_decreasing() {
        let mut prev = MeasurementResult::from_pulse_count(0);
        for count in 1..200 {
            let result = MeasurementResult::from_pulse_count(count);
            assert!(result.angular_speed >= prev.angular_speed);
            assert!(result.frequency >= prev.frequency);
            prev = result;
        }
    }

    #[test]
    fn test_speed_scales_linearly() {
        let one = MeasurementResult::from_pulse_count(1).angular_speed;
        let seventy = MeasurementResult::from_pulse_count(70).angular_speed;
        assert!((seventy - one * 70.0).abs() < 1e-4);
    }
}
