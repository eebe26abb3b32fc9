//! Camera trigger coordinator
//!
//! Single authority for the question "should the shutter fire now?". Runs
//! inside the vehicle's periodic control loop: [`CameraTrigger::update`]
//! evaluates distance-based triggering and [`CameraTrigger::update_trigger`]
//! advances the pulse countdown, services queued fires and correlates
//! feedback. Both are expected at [`TRIGGER_RATE_HZ`](super::config::TRIGGER_RATE_HZ).
//!
//! None of the operations here can fail in the error-return sense; an
//! actuator fault degrades to a logged warning and the loop keeps ticking.

use super::config::CameraConfig;
use super::feedback::{FeedbackCorrelator, FeedbackEvent, FeedbackLatch};
use super::geo;
use super::log::{CameraLogSink, CameraRecord, TriggerRecord};
use super::pulse::{ShutterOutput, ShutterPulse};
use super::types::{Location, VehicleState};

/// Camera trigger coordinator
///
/// Constructed once at startup; the command interface and telemetry emitter
/// receive a reference rather than looking it up through a global.
pub struct CameraTrigger<'a> {
    config: CameraConfig,
    pulse: ShutterPulse<'a>,
    correlator: FeedbackCorrelator<'a>,
    sink: &'a mut dyn CameraLogSink,
    /// A fire decision was made while the actuator was busy
    trigger_pending: bool,
    /// Time of the last photo (None until the first)
    last_photo_us: Option<u64>,
    /// Distance baseline: where the last photo was taken (or where distance
    /// triggering first observed the vehicle)
    last_location: Option<Location>,
    /// Photos since startup
    image_index: u16,
    /// Most recent event awaiting telemetry pickup (newest wins)
    pending_feedback: Option<FeedbackEvent>,
}

impl<'a> CameraTrigger<'a> {
    /// Create a coordinator
    ///
    /// # Arguments
    ///
    /// * `config` - Session configuration snapshot
    /// * `output` - Physical shutter output matching `config.trigger_type`
    /// * `latch` - Feedback latch shared with the pin-interrupt handler
    /// * `sink` - Structured log collaborator
    pub fn new(
        config: CameraConfig,
        output: &'a mut dyn ShutterOutput,
        latch: &'a FeedbackLatch,
        sink: &'a mut dyn CameraLogSink,
    ) -> Self {
        Self {
            config,
            pulse: ShutterPulse::new(output),
            correlator: FeedbackCorrelator::new(latch),
            sink,
            trigger_pending: false,
            last_photo_us: None,
            last_location: None,
            image_index: 0,
            pending_feedback: None,
        }
    }

    /// Evaluate distance-based triggering. Call at the trigger rate.
    ///
    /// The first observation with distance triggering enabled seeds the
    /// baseline without firing. A fire requires: autonomous mode (when
    /// `CAM_AUTO_ONLY` is set), distance moved at or past the threshold, the
    /// minimum interval elapsed, and roll within the configured limit.
    pub fn update(&mut self, vehicle: &VehicleState) {
        if !self.config.distance_trigger_enabled() {
            return;
        }
        if self.config.auto_mode_only && !vehicle.in_auto_mode {
            return;
        }

        let baseline = match self.last_location {
            Some(location) => location,
            None => {
                self.last_location = Some(vehicle.location);
                return;
            }
        };

        if geo::calculate_distance(&baseline, &vehicle.location) < self.config.trigger_distance_m {
            return;
        }
        if !self.interval_elapsed(vehicle.timestamp_us) {
            return;
        }
        if !self.roll_within_limit(vehicle) {
            return;
        }

        self.request_fire(vehicle);
    }

    /// Per-tick cleanup. Call at the trigger rate, every tick.
    ///
    /// Advances the pulse countdown so pulses self-terminate, services a
    /// queued fire once the actuator has returned to idle, and finalizes at
    /// most one hardware feedback event.
    pub fn update_trigger(&mut self, vehicle: &VehicleState) {
        if self.pulse.advance().is_err() {
            crate::log_warn!("Camera: shutter release fault");
        }

        if self.trigger_pending && !self.pulse.is_active() {
            self.trigger_pending = false;
            self.fire(vehicle);
        }

        if self.config.using_feedback_pin() {
            if let Some(event) = self.correlator.poll(vehicle) {
                self.emit(event);
            }
        }
    }

    /// Operator-commanded fire
    ///
    /// Bypasses distance gating but keeps the minimum-interval guard: rapid
    /// repeated commands are silently ignored rather than wearing out the
    /// shutter. Returns false when the command was ignored.
    pub fn take_picture(&mut self, vehicle: &VehicleState) -> bool {
        if !self.interval_elapsed(vehicle.timestamp_us) {
            return false;
        }
        self.request_fire(vehicle);
        true
    }

    /// Withdraw a queued fire request
    ///
    /// Only a request still waiting for the actuator can be withdrawn; an
    /// active pulse always runs to completion. Returns true if a request was
    /// cancelled.
    pub fn cancel_pending(&mut self) -> bool {
        let was_pending = self.trigger_pending;
        self.trigger_pending = false;
        was_pending
    }

    /// Update the distance threshold from a mission command
    ///
    /// Zero disables distance triggering. Applies from the next tick; this
    /// is the only configuration field mutated during a session, always from
    /// the polling thread.
    pub fn set_trigger_distance(&mut self, meters: f32) {
        self.config.trigger_distance_m = if meters > 0.0 { meters } else { 0.0 };
    }

    /// Take the most recent unreported feedback event, if any
    ///
    /// Newest wins: if telemetry polls slower than events finalize, older
    /// events are superseded here but remain logged and counted.
    pub fn take_feedback(&mut self) -> Option<FeedbackEvent> {
        self.pending_feedback.take()
    }

    /// Most recent feedback event (telemetry replay)
    pub fn last_feedback(&self) -> Option<&FeedbackEvent> {
        self.correlator.last_event()
    }

    /// Photos taken since startup
    pub fn image_index(&self) -> u16 {
        self.image_index
    }

    /// Total shutter activations observed by the feedback path
    pub fn trigger_count(&self) -> u32 {
        self.correlator.trigger_count()
    }

    /// True while the shutter output is held active
    pub fn is_pulse_active(&self) -> bool {
        self.pulse.is_active()
    }

    /// True while a fire request is queued behind an active pulse
    pub fn pending_fire(&self) -> bool {
        self.trigger_pending
    }

    /// Current configuration snapshot
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Queue or execute a fire decision
    fn request_fire(&mut self, vehicle: &VehicleState) {
        if self.pulse.is_active() {
            // Queue at most once; never interrupt an in-progress pulse
            self.trigger_pending = true;
            return;
        }
        self.fire(vehicle);
    }

    /// Actuate the shutter and record the shot
    fn fire(&mut self, vehicle: &VehicleState) {
        self.image_index = self.image_index.wrapping_add(1);

        if self.config.trigger_type.drives_local_output()
            && self.pulse.start(self.config.duration_ticks()).is_err()
        {
            crate::log_warn!("Camera: shutter output fault");
        }

        self.last_photo_us = Some(vehicle.timestamp_us);
        self.last_location = Some(vehicle.location);

        self.sink.write_trigger(&TriggerRecord {
            timestamp_us: vehicle.timestamp_us,
            image_index: self.image_index,
        });
        crate::log_debug!("Camera: trigger, image index {}", self.image_index);

        if !self.config.using_feedback_pin() {
            // No hardware confirmation available: the fire instant is the
            // best capture estimate we will get
            let event = self.correlator.capture_now(vehicle);
            self.emit(event);
        }
    }

    /// Hand a finalized event to the log and telemetry collaborators
    fn emit(&mut self, event: FeedbackEvent) {
        self.sink.write_camera(&CameraRecord::from(&event));
        self.pending_feedback = Some(event);
    }

    /// Minimum-interval guard; inclusive so a shot exactly at the boundary
    /// is allowed. No guard until a first photo exists.
    fn interval_elapsed(&self, now_us: u64) -> bool {
        match self.last_photo_us {
            Some(last) => {
                now_us.saturating_sub(last) >= self.config.min_interval_ms as u64 * 1_000
            }
            None => true,
        }
    }

    /// Roll gate; disabled when the configured limit is zero
    fn roll_within_limit(&self, vehicle: &VehicleState) -> bool {
        if self.config.max_roll_deg <= 0.0 {
            return true;
        }
        libm::fabsf(vehicle.attitude.roll_deg()) <= self.config.max_roll_deg
    }
}
