//! Geographic helpers for distance-based triggering
//!
//! Distances between trigger points are short (tens of meters), so a planar
//! equirectangular approximation is used instead of full great-circle math.

use super::types::Location;
use libm::{cosf, sqrtf};

/// Mean Earth radius in meters
const EARTH_RADIUS_M: f32 = 6_371_000.0;

/// Calculate planar distance between two locations in meters
///
/// Equirectangular approximation: longitude differences are scaled by the
/// cosine of the mid latitude. Altitude is ignored.
pub fn calculate_distance(from: &Location, to: &Location) -> f32 {
    let lat_mid = ((from.latitude + to.latitude) * 0.5).to_radians();
    let dlat = (to.latitude - from.latitude).to_radians();
    let dlon = (to.longitude - from.longitude).to_radians() * cosf(lat_mid);
    sqrtf(dlat * dlat + dlon * dlon) * EARTH_RADIUS_M
}

/// Offset a location by north/east meters (test and mission helper)
pub fn offset_location(origin: &Location, north_m: f32, east_m: f32) -> Location {
    let dlat = north_m / EARTH_RADIUS_M;
    let dlon = east_m / (EARTH_RADIUS_M * cosf(origin.latitude.to_radians()));
    Location {
        latitude: origin.latitude + dlat.to_degrees(),
        longitude: origin.longitude + dlon.to_degrees(),
        altitude: origin.altitude,
    }
}
