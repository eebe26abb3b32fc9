//! Camera trigger subsystem
//!
//! Decides when to fire a capture, drives the shutter mechanism, and
//! correlates the capture instant with vehicle state.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Vehicle control loop (50 Hz)                │
//! │        update(vehicle) / update_trigger(vehicle)             │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//!                ▼                              │ feedback pin edge
//! ┌─────────────────────────────┐               │ (interrupt context)
//! │   CameraTrigger             │               ▼
//! │   distance / interval /     │   ┌─────────────────────────┐
//! │   roll / mode gating        │   │  FeedbackLatch          │
//! └──────┬───────────────┬──────┘   │  atomic count + stamp   │
//!        │               │          └──────────┬──────────────┘
//!        ▼               ▼                     │ polled
//! ┌─────────────┐ ┌──────────────────┐         ▼
//! │ ShutterPulse│ │ FeedbackCorrelator ◄───────┘
//! │ tick-counted│ │ one event per     │──► CameraLogSink,
//! │ Idle/Active │ │ activation        │    telemetry notification
//! └─────────────┘ └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use pico_shutter::subsystems::camera::{
//!     CameraConfig, CameraTrigger, FeedbackLatch, RelayShutter, RingBufferLog,
//! };
//!
//! static FEEDBACK: FeedbackLatch = FeedbackLatch::new();
//!
//! let config = CameraConfig::from_params(&params);
//! let mut relay = RelayShutter::new(&mut relay_pin, config.relay_active_high);
//! let mut log = RingBufferLog::new();
//! let mut camera = CameraTrigger::new(config, &mut relay, &FEEDBACK, &mut log);
//!
//! // In the control loop:
//! camera.update_trigger(&vehicle);
//! camera.update(&vehicle);
//! if let Some(event) = camera.take_feedback() {
//!     // forward to telemetry
//! }
//! ```

mod config;
mod feedback;
mod geo;
mod log;
mod pulse;
mod trigger;
mod types;

// Re-export public API
pub use config::{CameraConfig, TriggerType, TRIGGER_RATE_HZ};
pub use feedback::{FeedbackCorrelator, FeedbackEvent, FeedbackLatch};
pub use geo::{calculate_distance, offset_location};
pub use log::{CameraLogSink, CameraRecord, RingBufferLog, TriggerRecord, LOG_CAPACITY};
pub use pulse::{RelayShutter, ServoShutter, ShutterOutput, ShutterPulse};
pub use trigger::CameraTrigger;
pub use types::{Attitude, Location, VehicleState};
