/// Shared f32 buffer layout read by the JS renderer each frame.
/// Must stay in sync with the TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Pose: POSE_FLOATS]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header; TypeScript reads them to
/// compute the section offsets instead of hardcoding them.

use crate::api::config::FanConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_POSE_FLOATS: usize = 2;
pub const HEADER_MAX_EVENTS: usize = 3;
pub const HEADER_EVENT_COUNT: usize = 4;
pub const HEADER_ACTIVE_CONTROL: usize = 5;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per pose record: blade_spin, head_yaw, x, y, z (wire format —
/// never changes).
pub const POSE_FLOATS: usize = 5;

/// Floats per UI event: kind, a, b, c (wire format — never changes).
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum UI events per frame.
    pub max_events: usize,

    /// Offset (in floats) where the pose section begins.
    pub pose_offset: usize,
    /// Size of the event data section in floats.
    pub event_data_floats: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from the event capacity.
    pub fn new(max_events: usize) -> Self {
        let pose_offset = HEADER_FLOATS;
        let event_data_offset = pose_offset + POSE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;
        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_events,
            pose_offset,
            event_data_floats,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a FanConfig.
    pub fn from_config(config: &FanConfig) -> Self {
        Self::new(config.max_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_layout() {
        let layout = ProtocolLayout::from_config(&FanConfig::default());
        assert_eq!(layout.max_events, 32);
        assert_eq!(layout.pose_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_offset, HEADER_FLOATS + POSE_FLOATS);
        assert_eq!(layout.event_data_floats, 32 * EVENT_FLOATS);
        assert_eq!(
            layout.buffer_total_floats,
            HEADER_FLOATS + POSE_FLOATS + 32 * EVENT_FLOATS
        );
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn sections_are_contiguous() {
        let layout = ProtocolLayout::new(8);
        assert_eq!(layout.pose_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_offset, layout.pose_offset + POSE_FLOATS);
        assert_eq!(
            layout.buffer_total_floats,
            layout.event_data_offset + layout.event_data_floats
        );
    }
}
