//! Platform error types
//!
//! This module defines error types for platform operations.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// GPIO operation failed
    Gpio(GpioError),
    /// PWM operation failed
    Pwm(PwmError),
    /// Flash operation failed
    Flash(FlashError),
    /// Invalid configuration provided
    InvalidConfig,
}

/// GPIO-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Invalid pin number
    InvalidPin,
    /// Invalid mode for operation
    InvalidMode,
    /// Pin already in use
    PinInUse,
}

/// PWM-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError {
    /// Invalid duty cycle value
    InvalidDutyCycle,
    /// Invalid frequency
    InvalidFrequency,
    /// Channel not available
    ChannelUnavailable,
}

/// Flash-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashError {
    /// Read operation failed
    ReadFailed,
    /// Write operation failed
    WriteFailed,
    /// Erase operation failed
    EraseFailed,
    /// Address out of range or not block aligned
    InvalidAddress,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Gpio(e) => write!(f, "GPIO error: {:?}", e),
            PlatformError::Pwm(e) => write!(f, "PWM error: {:?}", e),
            PlatformError::Flash(e) => write!(f, "Flash error: {:?}", e),
            PlatformError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

impl From<GpioError> for PlatformError {
    fn from(err: GpioError) -> Self {
        PlatformError::Gpio(err)
    }
}

impl From<PwmError> for PlatformError {
    fn from(err: PwmError) -> Self {
        PlatformError::Pwm(err)
    }
}

impl From<FlashError> for PlatformError {
    fn from(err: FlashError) -> Self {
        PlatformError::Flash(err)
    }
}
