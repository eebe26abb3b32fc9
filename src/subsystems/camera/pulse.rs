//! Shutter pulse actuation
//!
//! Drives the physical shutter output for a bounded number of control-loop
//! ticks without blocking. A blocking delay here would stall the periodic
//! scheduler shared with flight-critical control, so hold timing is counted
//! in ticks: `Idle -> Active` on `start()`, `Active -> Idle` when `advance()`
//! has been called once per tick for the configured duration.

use crate::platform::traits::{GpioInterface, PwmInterface};
use crate::platform::Result;

/// Physical shutter output
///
/// Implementations set the output to its "on" or "off" state; hold timing is
/// owned by [`ShutterPulse`].
pub trait ShutterOutput {
    /// Drive the output to its shutter-activated state
    fn shutter_on(&mut self) -> Result<()>;

    /// Drive the output to its shutter-released state
    fn shutter_off(&mut self) -> Result<()>;
}

/// Servo-operated shutter
///
/// Moves a servo between two PWM positions. Pulse widths are converted to
/// duty cycle at the standard 50 Hz servo refresh rate.
pub struct ServoShutter<'a> {
    pwm: &'a mut dyn PwmInterface,
    on_pwm_us: u16,
    off_pwm_us: u16,
}

impl<'a> ServoShutter<'a> {
    /// Create a servo shutter
    ///
    /// # Arguments
    ///
    /// * `pwm` - PWM channel driving the shutter servo
    /// * `on_pwm_us` - Pulse width for the shutter-activated position
    /// * `off_pwm_us` - Pulse width for the shutter-released position
    pub fn new(pwm: &'a mut dyn PwmInterface, on_pwm_us: u16, off_pwm_us: u16) -> Self {
        Self {
            pwm,
            on_pwm_us,
            off_pwm_us,
        }
    }

    /// Convert pulse width to PWM duty cycle
    ///
    /// For 50 Hz PWM (20 ms period):
    /// - 1100 us = 5.5% duty cycle
    /// - 1300 us = 6.5% duty cycle
    fn pulse_to_duty_cycle(pulse_us: u16) -> f32 {
        const PERIOD_US: f32 = 20_000.0;
        pulse_us as f32 / PERIOD_US
    }
}

impl ShutterOutput for ServoShutter<'_> {
    fn shutter_on(&mut self) -> Result<()> {
        self.pwm
            .set_duty_cycle(Self::pulse_to_duty_cycle(self.on_pwm_us))
    }

    fn shutter_off(&mut self) -> Result<()> {
        self.pwm
            .set_duty_cycle(Self::pulse_to_duty_cycle(self.off_pwm_us))
    }
}

/// Relay-operated shutter
///
/// Toggles a GPIO between the configured active level and its complement.
pub struct RelayShutter<'a> {
    gpio: &'a mut dyn GpioInterface,
    active_high: bool,
}

impl<'a> RelayShutter<'a> {
    /// Create a relay shutter
    ///
    /// # Arguments
    ///
    /// * `gpio` - Output pin wired to the relay
    /// * `active_high` - Logic level that closes the shutter contact
    pub fn new(gpio: &'a mut dyn GpioInterface, active_high: bool) -> Self {
        Self { gpio, active_high }
    }
}

impl ShutterOutput for RelayShutter<'_> {
    fn shutter_on(&mut self) -> Result<()> {
        if self.active_high {
            self.gpio.set_high()
        } else {
            self.gpio.set_low()
        }
    }

    fn shutter_off(&mut self) -> Result<()> {
        if self.active_high {
            self.gpio.set_low()
        } else {
            self.gpio.set_high()
        }
    }
}

/// Tick-counted shutter pulse state machine
///
/// Invariant: every `start()` is matched by exactly one off transition after
/// the configured number of `advance()` calls, so the output is never left
/// on indefinitely.
pub struct ShutterPulse<'a> {
    output: &'a mut dyn ShutterOutput,
    remaining_ticks: u16,
}

impl<'a> ShutterPulse<'a> {
    /// Create an idle pulse driver over the given output
    pub fn new(output: &'a mut dyn ShutterOutput) -> Self {
        Self {
            output,
            remaining_ticks: 0,
        }
    }

    /// Begin a pulse of `duration_ticks` ticks
    ///
    /// Valid only from Idle; while a pulse is active this is a no-op, the
    /// running pulse is never cut short or extended. A zero duration is
    /// treated as one tick.
    pub fn start(&mut self, duration_ticks: u16) -> Result<()> {
        if self.is_active() {
            return Ok(());
        }
        self.output.shutter_on()?;
        self.remaining_ticks = duration_ticks.max(1);
        Ok(())
    }

    /// Advance the countdown by one tick
    ///
    /// Must be called once per control-loop tick. Releases the output when
    /// the countdown expires; no-op while Idle.
    pub fn advance(&mut self) -> Result<()> {
        if self.remaining_ticks == 0 {
            return Ok(());
        }
        self.remaining_ticks -= 1;
        if self.remaining_ticks == 0 {
            self.output.shutter_off()?;
        }
        Ok(())
    }

    /// True while a pulse is running
    pub fn is_active(&self) -> bool {
        self.remaining_ticks > 0
    }
}
