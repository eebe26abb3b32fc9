//! Shutter feedback correlation
//!
//! Produces exactly one [`FeedbackEvent`] per physical shutter activation and
//! binds it to vehicle state.
//!
//! Two triggering paths feed the correlator:
//!
//! 1. **Hardware feedback**: the camera's hotshoe (or equivalent) toggles a
//!    pin and an interrupt delivers the edge. Interrupt-context work is
//!    limited to [`FeedbackLatch::record_edge`]: store the raw timestamp,
//!    then publish by incrementing the trigger counter. The 50 Hz polling
//!    loop later observes the counter, reads the timestamp back and samples
//!    vehicle state. Attitude changes slowly relative to shutter timing, so
//!    the poll-time state sample is accepted.
//! 2. **No hardware feedback**: [`FeedbackCorrelator::capture_now`] finalizes
//!    an event synchronously when the pulse starts, using decision-time
//!    state. Lower timing precision, guaranteed coverage.
//!
//! The latch is a single-producer/single-consumer handoff: the timestamp
//! store is ordered before the counter increment (Release), and the consumer
//! loads the counter with Acquire before reading the timestamp. No lock is
//! needed, and none is wanted in an interrupt-context producer.

use core::sync::atomic::{AtomicU32, Ordering};

use super::types::{Location, VehicleState};

/// Interrupt-to-poll handoff for shutter feedback edges
///
/// Intended to live in a `static` so the platform's pin-interrupt handler can
/// reach it. The handler must be attached for the configured polarity edge
/// (CAM_FEEDBACK_POL); the latch itself records unconditionally.
pub struct FeedbackLatch {
    /// Number of feedback edges seen; publishes `timestamp_us`
    trigger_count: AtomicU32,
    /// Raw capture timestamp (microseconds, wraps at ~71 minutes)
    timestamp_us: AtomicU32,
}

impl FeedbackLatch {
    /// Create an empty latch (const, suitable for statics)
    pub const fn new() -> Self {
        Self {
            trigger_count: AtomicU32::new(0),
            timestamp_us: AtomicU32::new(0),
        }
    }

    /// Record a feedback edge. Interrupt context.
    ///
    /// The timestamp store is ordered before the counter increment so a
    /// consumer that observes the new count is guaranteed to see the matching
    /// timestamp.
    pub fn record_edge(&self, timestamp_us: u32) {
        self.timestamp_us.store(timestamp_us, Ordering::Relaxed);
        self.trigger_count.fetch_add(1, Ordering::Release);
    }

    /// Record a synthetic edge from the polling context (fallback path)
    ///
    /// With no feedback pin configured the interrupt never fires, so the
    /// polling loop is the only producer and the handoff stays
    /// single-writer.
    pub fn bump(&self, timestamp_us: u32) {
        self.record_edge(timestamp_us);
    }

    /// Current trigger count (Acquire: pairs with `record_edge`)
    pub fn count(&self) -> u32 {
        self.trigger_count.load(Ordering::Acquire)
    }

    /// Latched raw timestamp; only meaningful after `count()` returned a new
    /// value
    pub fn timestamp_us(&self) -> u32 {
        self.timestamp_us.load(Ordering::Relaxed)
    }
}

impl Default for FeedbackLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Confirmed, timestamped, state-correlated record of a shutter activation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeedbackEvent {
    /// Capture timestamp (microseconds since startup)
    pub timestamp_us: u64,
    /// Vehicle position at the capture instant
    pub location: Location,
    /// Roll at capture (radians)
    pub roll: f32,
    /// Pitch at capture (radians)
    pub pitch: f32,
    /// Yaw at capture (radians)
    pub yaw: f32,
    /// Strictly increasing sequence id; gaps mean counted-but-unreported
    /// activations
    pub seq: u32,
}

/// Correlates latched feedback edges with vehicle state
///
/// Owned by the trigger coordinator and driven from the polling loop only.
pub struct FeedbackCorrelator<'a> {
    latch: &'a FeedbackLatch,
    /// Last trigger count an event was emitted for
    processed: u32,
    /// Most recent event, retained for telemetry replay
    last_event: Option<FeedbackEvent>,
}

impl<'a> FeedbackCorrelator<'a> {
    /// Create a correlator over the given latch
    pub fn new(latch: &'a FeedbackLatch) -> Self {
        Self {
            latch,
            processed: 0,
            last_event: None,
        }
    }

    /// Process latched feedback edges; at most one event per call
    ///
    /// If the counter advanced by more than one since the last poll, the
    /// extra activations stay counted (the next event's sequence id jumps)
    /// but only the most recent edge is finalized - there is only one latched
    /// timestamp and one state snapshot to bind it to.
    pub fn poll(&mut self, vehicle: &VehicleState) -> Option<FeedbackEvent> {
        let count = self.latch.count();
        if count == self.processed {
            return None;
        }
        self.processed = count;
        Some(self.finalize(count, vehicle))
    }

    /// Fallback path: record and finalize an event at decision time
    pub fn capture_now(&mut self, vehicle: &VehicleState) -> FeedbackEvent {
        self.latch.bump(vehicle.timestamp_us as u32);
        let count = self.latch.count();
        self.processed = count;
        self.finalize(count, vehicle)
    }

    fn finalize(&mut self, seq: u32, vehicle: &VehicleState) -> FeedbackEvent {
        // Rebuild a 64-bit capture time from the 32-bit latch: the edge is
        // always in the recent past, so the wrapping delta against "now" is
        // small.
        let latched = self.latch.timestamp_us();
        let delta = (vehicle.timestamp_us as u32).wrapping_sub(latched);
        let timestamp_us = vehicle.timestamp_us.saturating_sub(delta as u64);

        let event = FeedbackEvent {
            timestamp_us,
            location: vehicle.location,
            roll: vehicle.attitude.roll,
            pitch: vehicle.attitude.pitch,
            yaw: vehicle.attitude.yaw,
            seq,
        };
        self.last_event = Some(event);
        event
    }

    /// Most recent event, if any (telemetry replay)
    pub fn last_event(&self) -> Option<&FeedbackEvent> {
        self.last_event.as_ref()
    }

    /// Total activations observed, including any not yet finalized
    pub fn trigger_count(&self) -> u32 {
        self.latch.count()
    }
}
