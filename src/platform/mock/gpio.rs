//! Mock GPIO implementation for testing
//!
//! Beyond plain state tracking, the mock counts rising edges so shutter tests
//! can assert how many times the relay actually closed over a scenario.

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};

/// Mock GPIO implementation
#[derive(Debug)]
pub struct MockGpio {
    state: bool,
    mode: GpioMode,
    rising_edges: u32,
}

impl MockGpio {
    /// Create a new mock GPIO in output mode
    pub fn new_output() -> Self {
        Self {
            state: false,
            mode: GpioMode::OutputPushPull,
            rising_edges: 0,
        }
    }

    /// Create a new mock GPIO in input mode
    pub fn new_input() -> Self {
        Self {
            state: false,
            mode: GpioMode::Input,
            rising_edges: 0,
        }
    }

    /// Set the input state (for simulating input pin reads)
    pub fn set_input_state(&mut self, high: bool) {
        self.state = high;
    }

    /// Number of low-to-high transitions driven on this pin
    pub fn rising_edges(&self) -> u32 {
        self.rising_edges
    }

    fn drive(&mut self, high: bool) -> Result<()> {
        match self.mode {
            GpioMode::OutputPushPull | GpioMode::OutputOpenDrain => {
                if high && !self.state {
                    self.rising_edges += 1;
                }
                self.state = high;
                Ok(())
            }
            _ => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }
}

impl GpioInterface for MockGpio {
    fn set_high(&mut self) -> Result<()> {
        self.drive(true)
    }

    fn set_low(&mut self) -> Result<()> {
        self.drive(false)
    }

    fn read(&self) -> bool {
        self.state
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        self.mode = mode;
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}
