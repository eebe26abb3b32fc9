//! PWM interface trait
//!
//! This module defines the PWM interface that platform implementations must
//! provide. The camera subsystem drives a shutter servo through this interface
//! at the standard 50 Hz servo refresh rate.

use crate::platform::Result;

/// PWM channel configuration
#[derive(Debug, Clone, Copy)]
pub struct PwmConfig {
    /// PWM frequency in Hz
    pub frequency: u32,
    /// Initial duty cycle (0.0 to 1.0)
    pub duty_cycle: f32,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            frequency: 50,
            duty_cycle: 0.0,
        }
    }
}

/// PWM interface trait
///
/// Platform implementations must provide this interface for PWM output.
pub trait PwmInterface {
    /// Set PWM duty cycle
    ///
    /// # Arguments
    ///
    /// * `duty_cycle` - Duty cycle from 0.0 (always low) to 1.0 (always high)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm(PwmError::InvalidDutyCycle)` if the value
    /// is outside 0.0..=1.0.
    fn set_duty_cycle(&mut self, duty_cycle: f32) -> Result<()>;

    /// Get current duty cycle
    fn duty_cycle(&self) -> f32;

    /// Set PWM frequency in Hz
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm(PwmError::InvalidFrequency)` if the
    /// frequency is zero or unsupported by the hardware.
    fn set_frequency(&mut self, frequency: u32) -> Result<()>;

    /// Get current frequency in Hz
    fn frequency(&self) -> u32;

    /// Enable PWM output
    fn enable(&mut self);

    /// Disable PWM output
    fn disable(&mut self);

    /// Check if PWM output is enabled
    fn is_enabled(&self) -> bool;
}
