//! Structured camera log records
//!
//! Two record kinds are appended through the [`CameraLogSink`] collaborator:
//! a per-shot record carrying the correlated capture state, and a trigger
//! record written whenever the shutter mechanism is actuated, independent of
//! feedback correlation. [`RingBufferLog`] is a bounded in-memory sink for
//! host tests and telemetry replay.

use heapless::HistoryBuf;

use super::feedback::FeedbackEvent;

/// Ring capacity per record kind
pub const LOG_CAPACITY: usize = 32;

/// Per-shot record: correlated capture state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CameraRecord {
    /// Feedback sequence id
    pub seq: u32,
    /// Capture timestamp (microseconds since startup)
    pub timestamp_us: u64,
    /// Latitude at capture (degrees)
    pub latitude: f32,
    /// Longitude at capture (degrees)
    pub longitude: f32,
    /// Altitude at capture (meters)
    pub altitude: f32,
    /// Roll at capture (radians)
    pub roll: f32,
    /// Pitch at capture (radians)
    pub pitch: f32,
    /// Yaw at capture (radians)
    pub yaw: f32,
}

impl From<&FeedbackEvent> for CameraRecord {
    fn from(event: &FeedbackEvent) -> Self {
        Self {
            seq: event.seq,
            timestamp_us: event.timestamp_us,
            latitude: event.location.latitude,
            longitude: event.location.longitude,
            altitude: event.location.altitude,
            roll: event.roll,
            pitch: event.pitch,
            yaw: event.yaw,
        }
    }
}

/// Trigger record: shutter mechanism actuation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerRecord {
    /// Actuation timestamp (microseconds since startup)
    pub timestamp_us: u64,
    /// Image index at actuation (count since startup)
    pub image_index: u16,
}

/// Append-only structured log collaborator
pub trait CameraLogSink {
    /// Append a per-shot record
    fn write_camera(&mut self, record: &CameraRecord);

    /// Append a trigger record
    fn write_trigger(&mut self, record: &TriggerRecord);
}

/// Bounded in-memory log sink
///
/// Keeps the most recent `LOG_CAPACITY` records of each kind, evicting the
/// oldest when full and counting the overflow.
pub struct RingBufferLog {
    camera: HistoryBuf<CameraRecord, LOG_CAPACITY>,
    trigger: HistoryBuf<TriggerRecord, LOG_CAPACITY>,
    overflow_count: u32,
}

impl RingBufferLog {
    /// Create an empty log
    pub const fn new() -> Self {
        Self {
            camera: HistoryBuf::new(),
            trigger: HistoryBuf::new(),
            overflow_count: 0,
        }
    }

    /// Number of per-shot records currently held
    pub fn camera_count(&self) -> usize {
        self.camera.len()
    }

    /// Number of trigger records currently held
    pub fn trigger_count(&self) -> usize {
        self.trigger.len()
    }

    /// Records lost to ring overflow
    pub fn overflow_count(&self) -> u32 {
        self.overflow_count
    }

    /// Iterate per-shot records oldest first
    pub fn camera_records(&self) -> impl Iterator<Item = &CameraRecord> {
        self.camera.oldest_ordered()
    }

    /// Iterate trigger records oldest first
    pub fn trigger_records(&self) -> impl Iterator<Item = &TriggerRecord> {
        self.trigger.oldest_ordered()
    }
}

impl Default for RingBufferLog {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraLogSink for RingBufferLog {
    fn write_camera(&mut self, record: &CameraRecord) {
        if self.camera.len() == LOG_CAPACITY {
            self.overflow_count = self.overflow_count.saturating_add(1);
        }
        self.camera.write(*record);
    }

    fn write_trigger(&mut self, record: &TriggerRecord) {
        if self.trigger.len() == LOG_CAPACITY {
            self.overflow_count = self.overflow_count.saturating_add(1);
        }
        self.trigger.write(*record);
    }
}
