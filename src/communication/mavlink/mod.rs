//! MAVLink message handling
//!
//! Uses the ArduPilot dialect: camera commands arrive as COMMAND_LONG and
//! confirmed captures leave as CAMERA_FEEDBACK.

pub mod handlers;
