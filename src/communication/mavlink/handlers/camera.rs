//! Camera Command Handler
//!
//! Handles camera-related COMMAND_LONG messages from the ground control
//! station and builds outbound CAMERA_FEEDBACK telemetry.
//!
//! # Supported Commands
//!
//! - **MAV_CMD_DO_DIGICAM_CONTROL**: Shutter/zoom/focus control; a shooting
//!   command triggers a capture, the remaining fields are opaque to this
//!   subsystem and forwarded to whatever protocol the physical camera speaks
//! - **MAV_CMD_DO_DIGICAM_CONFIGURE**: Mode/shutter-speed/aperture/ISO
//!   passthrough, opaque here
//! - **MAV_CMD_DO_SET_CAM_TRIGG_DIST**: Set the distance-trigger threshold
//!   from a mission item
//!
//! # Command Flow
//!
//! 1. GCS sends COMMAND_LONG
//! 2. The vehicle's dispatcher routes camera commands here together with a
//!    mutable handle on the coordinator and the current vehicle state
//! 3. Handler executes the command and returns COMMAND_ACK plus any
//!    immediate follow-up messages (e.g. CAMERA_FEEDBACK for a manual shot)

use crate::subsystems::camera::{CameraTrigger, FeedbackEvent, VehicleState};
use heapless::Vec;
use mavlink::ardupilotmega::{
    CameraFeedbackFlags, MavCmd, MavMessage, MavResult, CAMERA_FEEDBACK_DATA, COMMAND_ACK_DATA,
    COMMAND_LONG_DATA,
};

/// Camera command handler and feedback telemetry builder
pub struct CameraHandler {
    /// MAVLink system id stamped into CAMERA_FEEDBACK
    target_system: u8,
}

impl CameraHandler {
    /// Create a handler for the given MAVLink system id
    pub fn new(target_system: u8) -> Self {
        Self { target_system }
    }

    /// Handle a camera COMMAND_LONG message
    ///
    /// Returns the COMMAND_ACK and optional additional messages to send back
    /// to the GCS (a CAMERA_FEEDBACK is pushed immediately after a manual
    /// shot so the operator sees the result without waiting for the
    /// telemetry stream).
    pub fn handle_command_long(
        &mut self,
        cmd: &COMMAND_LONG_DATA,
        camera: &mut CameraTrigger,
        vehicle: &VehicleState,
    ) -> (COMMAND_ACK_DATA, Vec<MavMessage, 4>) {
        let mut messages: Vec<MavMessage, 4> = Vec::new();

        let result = match cmd.command {
            MavCmd::MAV_CMD_DO_DIGICAM_CONTROL => {
                // param5 is the shooting command; the other fields belong to
                // the camera's own protocol
                if cmd.param5 >= 1.0 {
                    // Min-interval suppression is deliberate, not a failure
                    if camera.take_picture(vehicle) {
                        if let Some(event) = camera.take_feedback() {
                            let _ = messages
                                .push(self.build_feedback(&event, camera.image_index()));
                        }
                    } else {
                        crate::log_debug!("Camera: shot command inside min interval, ignored");
                    }
                }
                MavResult::MAV_RESULT_ACCEPTED
            }
            MavCmd::MAV_CMD_DO_DIGICAM_CONFIGURE => {
                crate::log_debug!("Camera: configure passthrough");
                MavResult::MAV_RESULT_ACCEPTED
            }
            MavCmd::MAV_CMD_DO_SET_CAM_TRIGG_DIST => {
                camera.set_trigger_distance(cmd.param1);
                crate::log_info!("Camera: trigger distance set");
                MavResult::MAV_RESULT_ACCEPTED
            }
            _ => {
                crate::log_warn!("Camera: unsupported command {}", cmd.command as u32);
                MavResult::MAV_RESULT_UNSUPPORTED
            }
        };

        let ack = COMMAND_ACK_DATA {
            command: cmd.command,
            result,
            progress: 0,         // MAVLink v2 extension
            result_param2: 0,    // MAVLink v2 extension
            target_system: 0,    // MAVLink v2 extension
            target_component: 0, // MAVLink v2 extension
        };

        (ack, messages)
    }

    /// Build a CAMERA_FEEDBACK message for a pending event, if one exists
    ///
    /// Call after the control loop tick; consumes the event.
    pub fn drain_feedback(&self, camera: &mut CameraTrigger) -> Option<MavMessage> {
        camera
            .take_feedback()
            .map(|event| self.build_feedback(&event, camera.image_index()))
    }

    /// Build a CAMERA_FEEDBACK message for the most recent event (on-demand
    /// replay, e.g. in response to a GCS request)
    pub fn last_feedback_message(&self, camera: &CameraTrigger) -> Option<MavMessage> {
        camera
            .last_feedback()
            .map(|event| self.build_feedback(event, camera.image_index()))
    }

    fn build_feedback(&self, event: &FeedbackEvent, image_index: u16) -> MavMessage {
        let mut data = CAMERA_FEEDBACK_DATA::default();
        data.time_usec = event.timestamp_us;
        data.target_system = self.target_system;
        data.cam_idx = 0;
        data.img_idx = image_index;
        data.lat = (event.location.latitude as f64 * 1e7) as i32;
        data.lng = (event.location.longitude as f64 * 1e7) as i32;
        data.alt_msl = event.location.altitude;
        // Home-relative altitude is not tracked by this subsystem
        data.alt_rel = 0.0;
        data.roll = event.roll.to_degrees();
        data.pitch = event.pitch.to_degrees();
        data.yaw = event.yaw.to_degrees();
        data.foc_len = 0.0;
        data.flags = CameraFeedbackFlags::CAMERA_FEEDBACK_PHOTO;
        MavMessage::CAMERA_FEEDBACK(data)
    }
}

impl Default for CameraHandler {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::CameraParams;
    use crate::platform::Result;
    use crate::subsystems::camera::{
        Attitude, CameraConfig, FeedbackLatch, Location, RingBufferLog, ShutterOutput,
    };

    struct NullOutput;

    impl ShutterOutput for NullOutput {
        fn shutter_on(&mut self) -> Result<()> {
            Ok(())
        }

        fn shutter_off(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn create_command_long(command: MavCmd, param1: f32, param5: f32) -> COMMAND_LONG_DATA {
        COMMAND_LONG_DATA {
            target_system: 1,
            target_component: 1,
            command,
            confirmation: 0,
            param1,
            param2: 0.0,
            param3: 0.0,
            param4: 0.0,
            param5,
            param6: 0.0,
            param7: 0.0,
        }
    }

    fn vehicle() -> VehicleState {
        VehicleState::new(
            5_000_000,
            Location {
                latitude: 35.5,
                longitude: 139.5,
                altitude: 120.0,
            },
            Attitude::new(0.1, -0.05, 1.5),
            false,
        )
    }

    #[test]
    fn test_digicam_control_takes_picture() {
        let latch = FeedbackLatch::new();
        let mut output = NullOutput;
        let mut sink = RingBufferLog::new();
        let config = CameraConfig::from_params(&CameraParams::default());
        let mut camera = CameraTrigger::new(config, &mut output, &latch, &mut sink);
        let mut handler = CameraHandler::new(1);

        let cmd = create_command_long(MavCmd::MAV_CMD_DO_DIGICAM_CONTROL, 0.0, 1.0);
        let (ack, messages) = handler.handle_command_long(&cmd, &mut camera, &vehicle());

        assert_eq!(ack.command, MavCmd::MAV_CMD_DO_DIGICAM_CONTROL);
        assert_eq!(ack.result, MavResult::MAV_RESULT_ACCEPTED);
        assert_eq!(camera.image_index(), 1);

        // Immediate CAMERA_FEEDBACK for the manual shot
        assert_eq!(messages.len(), 1);
        match &messages[0] {
            MavMessage::CAMERA_FEEDBACK(data) => {
                assert_eq!(data.img_idx, 1);
                assert_eq!(data.time_usec, 5_000_000);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_digicam_control_without_shot_is_noop() {
        let latch = FeedbackLatch::new();
        let mut output = NullOutput;
        let mut sink = RingBufferLog::new();
        let config = CameraConfig::from_params(&CameraParams::default());
        let mut camera = CameraTrigger::new(config, &mut output, &latch, &mut sink);
        let mut handler = CameraHandler::new(1);

        // Zoom-only control: shooting command is zero
        let cmd = create_command_long(MavCmd::MAV_CMD_DO_DIGICAM_CONTROL, 0.0, 0.0);
        let (ack, messages) = handler.handle_command_long(&cmd, &mut camera, &vehicle());

        assert_eq!(ack.result, MavResult::MAV_RESULT_ACCEPTED);
        assert_eq!(camera.image_index(), 0);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_digicam_configure_accepted() {
        let latch = FeedbackLatch::new();
        let mut output = NullOutput;
        let mut sink = RingBufferLog::new();
        let config = CameraConfig::from_params(&CameraParams::default());
        let mut camera = CameraTrigger::new(config, &mut output, &latch, &mut sink);
        let mut handler = CameraHandler::new(1);

        let cmd = create_command_long(MavCmd::MAV_CMD_DO_DIGICAM_CONFIGURE, 2.0, 0.0);
        let (ack, _) = handler.handle_command_long(&cmd, &mut camera, &vehicle());

        assert_eq!(ack.result, MavResult::MAV_RESULT_ACCEPTED);
        assert_eq!(camera.image_index(), 0);
    }

    #[test]
    fn test_set_cam_trigg_dist() {
        let latch = FeedbackLatch::new();
        let mut output = NullOutput;
        let mut sink = RingBufferLog::new();
        let config = CameraConfig::from_params(&CameraParams::default());
        let mut camera = CameraTrigger::new(config, &mut output, &latch, &mut sink);
        let mut handler = CameraHandler::new(1);

        assert!(!camera.config().distance_trigger_enabled());

        let cmd = create_command_long(MavCmd::MAV_CMD_DO_SET_CAM_TRIGG_DIST, 25.0, 0.0);
        let (ack, _) = handler.handle_command_long(&cmd, &mut camera, &vehicle());

        assert_eq!(ack.result, MavResult::MAV_RESULT_ACCEPTED);
        assert_eq!(camera.config().trigger_distance_m, 25.0);
    }

    #[test]
    fn test_unsupported_command() {
        let latch = FeedbackLatch::new();
        let mut output = NullOutput;
        let mut sink = RingBufferLog::new();
        let config = CameraConfig::from_params(&CameraParams::default());
        let mut camera = CameraTrigger::new(config, &mut output, &latch, &mut sink);
        let mut handler = CameraHandler::new(1);

        let cmd = create_command_long(MavCmd::MAV_CMD_NAV_WAYPOINT, 0.0, 0.0);
        let (ack, messages) = handler.handle_command_long(&cmd, &mut camera, &vehicle());

        assert_eq!(ack.result, MavResult::MAV_RESULT_UNSUPPORTED);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_feedback_message_fields() {
        let latch = FeedbackLatch::new();
        let mut output = NullOutput;
        let mut sink = RingBufferLog::new();
        let config = CameraConfig::from_params(&CameraParams::default());
        let mut camera = CameraTrigger::new(config, &mut output, &latch, &mut sink);
        let handler = CameraHandler::new(7);

        camera.take_picture(&vehicle());
        let msg = handler.drain_feedback(&mut camera).unwrap();

        match msg {
            MavMessage::CAMERA_FEEDBACK(data) => {
                assert_eq!(data.target_system, 7);
                assert_eq!(data.time_usec, 5_000_000);
                assert_eq!(data.lat, 355_000_000);
                assert_eq!(data.lng, 1_395_000_000);
                assert_eq!(data.alt_msl, 120.0);
                assert!((data.roll - 0.1f32.to_degrees()).abs() < 0.001);
                assert_eq!(data.flags, CameraFeedbackFlags::CAMERA_FEEDBACK_PHOTO);
            }
            other => panic!("unexpected message: {:?}", other),
        }

        // Event consumed; replay still available
        assert!(handler.drain_feedback(&mut camera).is_none());
        assert!(handler.last_feedback_message(&camera).is_some());
    }
}
