#![cfg_attr(not(test), no_std)]

//! pico_shutter - Camera trigger subsystem for small autonomous vehicles
//!
//! This library decides when to fire a still/video capture, drives the
//! physical shutter actuation (servo pulse or relay toggle), and correlates
//! the capture instant with vehicle state for logging and telemetry.
//!
//! The host firmware owns the 50 Hz control loop and the MAVLink transport;
//! this crate plugs into both through explicit handles (no globals).

// Mock platform implementations are host-only and need std
#[cfg(any(test, feature = "mock"))]
extern crate std;

// Platform abstraction layer (GPIO, PWM, Flash)
pub mod platform;

// Logging macros and shared infrastructure
pub mod core;

// Parameter storage and camera parameter definitions
pub mod parameters;

// Camera trigger subsystem (coordinator, actuator, feedback correlation)
pub mod subsystems;

// MAVLink boundary glue (command handling, feedback telemetry)
pub mod communication;
