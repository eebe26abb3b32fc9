//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod flash;
pub mod gpio;
pub mod pwm;

// Re-export trait interfaces
pub use flash::FlashInterface;
pub use gpio::{GpioInterface, GpioMode};
pub use pwm::{PwmConfig, PwmInterface};
