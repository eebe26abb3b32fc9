//! Camera trigger configuration snapshot
//!
//! `CameraConfig` is built once from the parameter store and read by the
//! control loop for the rest of the session. Out-of-range values are clamped
//! to safe equivalents rather than rejected so a bad parameter can never stop
//! the loop from ticking. Reconfiguration is only valid while the loop is
//! quiesced (startup or an explicit reload boundary).

use crate::parameters::CameraParams;

/// Rate at which the trigger coordinator ticks (Hz)
pub const TRIGGER_RATE_HZ: u32 = 50;

/// Shutter mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerType {
    /// Servo moved between on/off positions
    Servo,
    /// Relay toggled between active/inactive levels
    Relay,
    /// External camera module, triggered over its own protocol
    External,
    /// Gimbal-mount integrated camera
    Mount,
}

impl TriggerType {
    /// Convert from the CAM_TRIGG_TYPE parameter value
    ///
    /// Unknown values fall back to Servo.
    pub fn from_param(value: i32) -> Self {
        match value {
            1 => TriggerType::Relay,
            2 => TriggerType::External,
            3 => TriggerType::Mount,
            _ => TriggerType::Servo,
        }
    }

    /// True when the shutter is driven by the local pulse actuator
    pub fn drives_local_output(&self) -> bool {
        matches!(self, TriggerType::Servo | TriggerType::Relay)
    }
}

/// Immutable-per-session camera trigger configuration
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    /// Shutter mechanism
    pub trigger_type: TriggerType,
    /// Shutter hold duration (tenths of a second, >= 1)
    pub trigger_duration_ds: u8,
    /// Relay logic level that activates the shutter
    pub relay_active_high: bool,
    /// Servo PWM when the shutter is activated (us)
    pub servo_on_pwm: u16,
    /// Servo PWM when the shutter is released (us)
    pub servo_off_pwm: u16,
    /// Distance between trigger points (m, <= 0 disables distance triggering)
    pub trigger_distance_m: f32,
    /// Minimum time between shots (ms)
    pub min_interval_ms: u32,
    /// Maximum roll angle when triggering (deg, <= 0 disables the gate)
    pub max_roll_deg: f32,
    /// Distance trigger only while in an autonomous mode
    pub auto_mode_only: bool,
    /// Feedback pin number (<= 0 = no hardware feedback)
    pub feedback_pin: i32,
    /// Feedback pin polarity (true = active high)
    pub feedback_active_high: bool,
}

impl CameraConfig {
    /// Build a validated snapshot from raw parameters
    ///
    /// Clamps rather than rejects: a non-positive duration becomes the
    /// minimum one-tenth-second hold, servo endpoints are constrained to the
    /// usual 800-2200 us servo range, and negative thresholds read as
    /// "disabled".
    pub fn from_params(params: &CameraParams) -> Self {
        Self {
            trigger_type: TriggerType::from_param(params.trigger_type),
            trigger_duration_ds: params.trigger_duration_ds.clamp(1, 255) as u8,
            relay_active_high: params.relay_on != 0,
            servo_on_pwm: params.servo_on_pwm.clamp(800, 2200) as u16,
            servo_off_pwm: params.servo_off_pwm.clamp(800, 2200) as u16,
            trigger_distance_m: if params.trigger_distance_m > 0.0 {
                params.trigger_distance_m
            } else {
                0.0
            },
            min_interval_ms: params.min_interval_ms.max(0) as u32,
            max_roll_deg: if params.max_roll_deg > 0.0 {
                params.max_roll_deg
            } else {
                0.0
            },
            auto_mode_only: params.auto_mode_only,
            feedback_pin: params.feedback_pin,
            feedback_active_high: params.feedback_active_high,
        }
    }

    /// True when distance-based triggering is enabled
    pub fn distance_trigger_enabled(&self) -> bool {
        self.trigger_distance_m > 0.0
    }

    /// True when a hardware feedback pin is configured
    pub fn using_feedback_pin(&self) -> bool {
        self.feedback_pin > 0
    }

    /// Shutter hold duration converted to trigger ticks
    ///
    /// One tenth of a second is `TRIGGER_RATE_HZ / 10` ticks; the result is
    /// never zero.
    pub fn duration_ticks(&self) -> u16 {
        (self.trigger_duration_ds as u16) * (TRIGGER_RATE_HZ / 10) as u16
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::from_params(&CameraParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CameraConfig::default();
        assert_eq!(config.trigger_type, TriggerType::Servo);
        assert_eq!(config.trigger_duration_ds, 10);
        assert_eq!(config.servo_on_pwm, 1300);
        assert_eq!(config.servo_off_pwm, 1100);
        assert!(!config.distance_trigger_enabled());
        assert!(!config.using_feedback_pin());
        // One second hold at 50 Hz
        assert_eq!(config.duration_ticks(), 50);
    }

    #[test]
    fn test_non_positive_duration_clamped() {
        let params = CameraParams {
            trigger_duration_ds: 0,
            ..Default::default()
        };
        let config = CameraConfig::from_params(&params);
        assert_eq!(config.trigger_duration_ds, 1);
        assert_eq!(config.duration_ticks(), 5);

        let params = CameraParams {
            trigger_duration_ds: -3,
            ..Default::default()
        };
        assert_eq!(CameraConfig::from_params(&params).trigger_duration_ds, 1);
    }

    #[test]
    fn test_servo_pwm_clamped() {
        let params = CameraParams {
            servo_on_pwm: 5000,
            servo_off_pwm: 100,
            ..Default::default()
        };
        let config = CameraConfig::from_params(&params);
        assert_eq!(config.servo_on_pwm, 2200);
        assert_eq!(config.servo_off_pwm, 800);
    }

    #[test]
    fn test_negative_thresholds_disable() {
        let params = CameraParams {
            trigger_distance_m: -5.0,
            max_roll_deg: -10.0,
            min_interval_ms: -100,
            ..Default::default()
        };
        let config = CameraConfig::from_params(&params);
        assert!(!config.distance_trigger_enabled());
        assert_eq!(config.max_roll_deg, 0.0);
        assert_eq!(config.min_interval_ms, 0);
    }

    #[test]
    fn test_trigger_type_from_param() {
        assert_eq!(TriggerType::from_param(0), TriggerType::Servo);
        assert_eq!(TriggerType::from_param(1), TriggerType::Relay);
        assert_eq!(TriggerType::from_param(2), TriggerType::External);
        assert_eq!(TriggerType::from_param(3), TriggerType::Mount);
        assert_eq!(TriggerType::from_param(99), TriggerType::Servo);

        assert!(TriggerType::Servo.drives_local_output());
        assert!(TriggerType::Relay.drives_local_output());
        assert!(!TriggerType::Mount.drives_local_output());
    }

    #[test]
    fn test_feedback_pin_gate() {
        let params = CameraParams {
            feedback_pin: 21,
            ..Default::default()
        };
        assert!(CameraConfig::from_params(&params).using_feedback_pin());

        let params = CameraParams {
            feedback_pin: 0,
            ..Default::default()
        };
        assert!(!CameraConfig::from_params(&params).using_feedback_pin());
    }
}
