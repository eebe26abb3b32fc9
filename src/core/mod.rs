//! Shared infrastructure
//!
//! This module contains cross-cutting pieces of the camera subsystem,
//! currently the logging abstraction.

pub mod logging;
