//! MAVLink protocol handlers

pub mod camera;

pub use camera::CameraHandler;
