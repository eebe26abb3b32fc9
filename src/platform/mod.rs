//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the peripherals the camera
//! trigger subsystem touches: GPIO (relay output, feedback pin), PWM (servo
//! shutter) and Flash (parameter persistence). The embedding firmware supplies
//! implementations for its target; mock implementations are provided for host
//! testing.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{FlashInterface, GpioInterface, GpioMode, PwmInterface};
