//! Camera Parameter Definitions
//!
//! Defines camera trigger parameters following ArduPilot standards.
//!
//! # Parameters
//!
//! - `CAM_TRIGG_TYPE` - Shutter mechanism (0=Servo, 1=Relay, 2=External, 3=Mount)
//! - `CAM_DURATION` - Shutter hold duration (tenths of a second)
//! - `CAM_RELAY_ON` - Relay logic level that activates the shutter (0/1)
//! - `CAM_SERVO_ON` - Servo PWM when the shutter is activated (us)
//! - `CAM_SERVO_OFF` - Servo PWM when the shutter is released (us)
//! - `CAM_TRIGG_DIST` - Distance between trigger points (m, 0 = disabled)
//! - `CAM_MIN_INTERVAL` - Minimum time between shots (ms)
//! - `CAM_MAX_ROLL` - Maximum roll angle when triggering (deg, 0 = no limit)
//! - `CAM_AUTO_ONLY` - Distance trigger only while in an autonomous mode
//! - `CAM_FEEDBACK_PIN` - Feedback pin number (<= 0 = no hardware feedback)
//! - `CAM_FEEDBACK_POL` - Feedback pin polarity (1 = active high)

use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::platform::Result;

/// Default shutter hold duration (tenths of a second)
pub const DEFAULT_TRIGGER_DURATION_DS: i32 = 10;

/// Default servo PWM when the shutter is activated (us)
pub const DEFAULT_SERVO_ON_PWM: i32 = 1300;

/// Default servo PWM when the shutter is released (us)
pub const DEFAULT_SERVO_OFF_PWM: i32 = 1100;

/// Default feedback pin (disabled)
pub const DEFAULT_FEEDBACK_PIN: i32 = -1;

/// Camera parameters loaded from the parameter store
#[derive(Debug, Clone)]
pub struct CameraParams {
    /// Shutter mechanism selector
    pub trigger_type: i32,
    /// Shutter hold duration (tenths of a second)
    pub trigger_duration_ds: i32,
    /// Relay logic level that activates the shutter
    pub relay_on: i32,
    /// Servo PWM when the shutter is activated (us)
    pub servo_on_pwm: i32,
    /// Servo PWM when the shutter is released (us)
    pub servo_off_pwm: i32,
    /// Distance between trigger points (m, 0 = disabled)
    pub trigger_distance_m: f32,
    /// Minimum time between shots (ms)
    pub min_interval_ms: i32,
    /// Maximum roll angle when triggering (deg, 0 = no limit)
    pub max_roll_deg: f32,
    /// Distance trigger only while in an autonomous mode
    pub auto_mode_only: bool,
    /// Feedback pin number (<= 0 = no hardware feedback)
    pub feedback_pin: i32,
    /// Feedback pin polarity (true = active high)
    pub feedback_active_high: bool,
}

impl CameraParams {
    /// Register camera parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<()> {
        store.register("CAM_TRIGG_TYPE", ParamValue::Int(0), ParamFlags::empty())?;
        store.register(
            "CAM_DURATION",
            ParamValue::Int(DEFAULT_TRIGGER_DURATION_DS),
            ParamFlags::empty(),
        )?;
        store.register("CAM_RELAY_ON", ParamValue::Int(1), ParamFlags::empty())?;
        store.register(
            "CAM_SERVO_ON",
            ParamValue::Int(DEFAULT_SERVO_ON_PWM),
            ParamFlags::empty(),
        )?;
        store.register(
            "CAM_SERVO_OFF",
            ParamValue::Int(DEFAULT_SERVO_OFF_PWM),
            ParamFlags::empty(),
        )?;
        store.register(
            "CAM_TRIGG_DIST",
            ParamValue::Float(0.0),
            ParamFlags::empty(),
        )?;
        store.register("CAM_MIN_INTERVAL", ParamValue::Int(0), ParamFlags::empty())?;
        store.register("CAM_MAX_ROLL", ParamValue::Float(0.0), ParamFlags::empty())?;
        store.register(
            "CAM_AUTO_ONLY",
            ParamValue::Bool(false),
            ParamFlags::empty(),
        )?;
        store.register(
            "CAM_FEEDBACK_PIN",
            ParamValue::Int(DEFAULT_FEEDBACK_PIN),
            ParamFlags::empty(),
        )?;
        store.register("CAM_FEEDBACK_POL", ParamValue::Int(1), ParamFlags::empty())?;

        Ok(())
    }

    /// Load camera parameters from the parameter store
    ///
    /// Missing or mistyped entries fall back to defaults; integer and float
    /// encodings are accepted interchangeably for numeric parameters.
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            trigger_type: read_int(store, "CAM_TRIGG_TYPE", 0),
            trigger_duration_ds: read_int(store, "CAM_DURATION", DEFAULT_TRIGGER_DURATION_DS),
            relay_on: read_int(store, "CAM_RELAY_ON", 1),
            servo_on_pwm: read_int(store, "CAM_SERVO_ON", DEFAULT_SERVO_ON_PWM),
            servo_off_pwm: read_int(store, "CAM_SERVO_OFF", DEFAULT_SERVO_OFF_PWM),
            trigger_distance_m: read_float(store, "CAM_TRIGG_DIST", 0.0),
            min_interval_ms: read_int(store, "CAM_MIN_INTERVAL", 0),
            max_roll_deg: read_float(store, "CAM_MAX_ROLL", 0.0),
            auto_mode_only: read_bool(store, "CAM_AUTO_ONLY", false),
            feedback_pin: read_int(store, "CAM_FEEDBACK_PIN", DEFAULT_FEEDBACK_PIN),
            feedback_active_high: read_int(store, "CAM_FEEDBACK_POL", 1) != 0,
        }
    }
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            trigger_type: 0,
            trigger_duration_ds: DEFAULT_TRIGGER_DURATION_DS,
            relay_on: 1,
            servo_on_pwm: DEFAULT_SERVO_ON_PWM,
            servo_off_pwm: DEFAULT_SERVO_OFF_PWM,
            trigger_distance_m: 0.0,
            min_interval_ms: 0,
            max_roll_deg: 0.0,
            auto_mode_only: false,
            feedback_pin: DEFAULT_FEEDBACK_PIN,
            feedback_active_high: true,
        }
    }
}

fn read_int(store: &ParameterStore, name: &str, default: i32) -> i32 {
    match store.get(name) {
        Some(ParamValue::Int(v)) => *v,
        Some(ParamValue::Float(v)) => *v as i32,
        Some(ParamValue::Bool(v)) => *v as i32,
        None => default,
    }
}

fn read_float(store: &ParameterStore, name: &str, default: f32) -> f32 {
    match store.get(name) {
        Some(ParamValue::Float(v)) => *v,
        Some(ParamValue::Int(v)) => *v as f32,
        _ => default,
    }
}

fn read_bool(store: &ParameterStore, name: &str, default: bool) -> bool {
    match store.get(name) {
        Some(ParamValue::Bool(v)) => *v,
        Some(ParamValue::Int(v)) => *v != 0,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_registered() {
        let mut store = ParameterStore::new();
        CameraParams::register_defaults(&mut store).unwrap();

        assert_eq!(store.count(), 11);
        assert_eq!(store.get("CAM_DURATION"), Some(&ParamValue::Int(10)));
        assert_eq!(store.get("CAM_FEEDBACK_PIN"), Some(&ParamValue::Int(-1)));
    }

    #[test]
    fn test_from_store_round_trip() {
        let mut store = ParameterStore::new();
        CameraParams::register_defaults(&mut store).unwrap();
        store
            .set("CAM_TRIGG_DIST", ParamValue::Float(50.0))
            .unwrap();
        store.set("CAM_AUTO_ONLY", ParamValue::Bool(true)).unwrap();
        store.set("CAM_TRIGG_TYPE", ParamValue::Int(1)).unwrap();

        let params = CameraParams::from_store(&store);
        assert_eq!(params.trigger_distance_m, 50.0);
        assert!(params.auto_mode_only);
        assert_eq!(params.trigger_type, 1);
        assert_eq!(params.servo_on_pwm, DEFAULT_SERVO_ON_PWM);
    }

    #[test]
    fn test_from_store_accepts_mixed_numeric_types() {
        let mut store = ParameterStore::new();
        // A GCS may write integer-valued floats
        store
            .register(
                "CAM_MIN_INTERVAL",
                ParamValue::Float(2000.0),
                ParamFlags::empty(),
            )
            .unwrap();

        let params = CameraParams::from_store(&store);
        assert_eq!(params.min_interval_ms, 2000);
    }

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = ParameterStore::new();
        let params = CameraParams::from_store(&store);
        assert_eq!(params.trigger_duration_ds, DEFAULT_TRIGGER_DURATION_DS);
        assert_eq!(params.feedback_pin, DEFAULT_FEEDBACK_PIN);
        assert!(!params.auto_mode_only);
    }
}
