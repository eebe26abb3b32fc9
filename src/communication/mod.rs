//! Communication protocols
//!
//! Boundary glue between the camera subsystem and the vehicle's MAVLink
//! stack. The transport, routing and dispatch live in the embedding firmware;
//! this module only translates camera-related messages.

pub mod mavlink;
