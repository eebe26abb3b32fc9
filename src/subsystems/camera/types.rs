//! Vehicle state snapshot types for the camera subsystem
//!
//! The camera never reaches into AHRS or GPS singletons; the control loop
//! hands it a `VehicleState` snapshot each tick.

/// Geographic position
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Location {
    /// Latitude in degrees (-90 to +90)
    pub latitude: f32,
    /// Longitude in degrees (-180 to +180)
    pub longitude: f32,
    /// Altitude in meters above sea level
    pub altitude: f32,
}

impl Location {
    /// Create a location at sea level
    pub const fn new(latitude: f32, longitude: f32) -> Self {
        Self {
            latitude,
            longitude,
            altitude: 0.0,
        }
    }
}

/// Vehicle attitude - roll, pitch, yaw
///
/// All angles are in radians.
///
/// # Coordinate System
///
/// - Roll (φ): Rotation around X-axis (positive = right wing down)
/// - Pitch (θ): Rotation around Y-axis (positive = nose up)
/// - Yaw (ψ): Rotation around Z-axis (positive = clockwise from above, 0 = north)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attitude {
    /// Roll angle in radians
    pub roll: f32,
    /// Pitch angle in radians
    pub pitch: f32,
    /// Yaw angle in radians (heading)
    pub yaw: f32,
}

impl Attitude {
    /// Create new attitude with given angles (radians)
    pub const fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Get roll in degrees (convenience method)
    pub fn roll_deg(&self) -> f32 {
        self.roll.to_degrees()
    }

    /// Get pitch in degrees (convenience method)
    pub fn pitch_deg(&self) -> f32 {
        self.pitch.to_degrees()
    }

    /// Get yaw in degrees (convenience method)
    pub fn yaw_deg(&self) -> f32 {
        self.yaw.to_degrees()
    }
}

/// Snapshot of vehicle state handed to the camera each tick
#[derive(Debug, Clone, Copy)]
pub struct VehicleState {
    /// Timestamp of this snapshot (microseconds since startup)
    pub timestamp_us: u64,
    /// Current position
    pub location: Location,
    /// Current attitude
    pub attitude: Attitude,
    /// True while the vehicle is in an autonomous (non-manual) mode
    pub in_auto_mode: bool,
}

impl VehicleState {
    /// Create a snapshot
    pub const fn new(
        timestamp_us: u64,
        location: Location,
        attitude: Attitude,
        in_auto_mode: bool,
    ) -> Self {
        Self {
            timestamp_us,
            location,
            attitude,
            in_auto_mode,
        }
    }
}
