// ── Control kinds pushed from the page ───────────────────────────────

pub const CONTROL_STOP_ALL: u32 = 1;
pub const CONTROL_TOGGLE_HEAD: u32 = 2;
pub const CONTROL_SET_SPEED: u32 = 3;

/// Control events the simulation understands.
/// The UI layer decides which buttons map to which events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Stop the blades, the head sweep, and the float.
    StopAll,
    /// Toggle head oscillation on/off.
    ToggleHead,
    /// Select a blade speed. `speed` is the raw value from the UI.
    SetSpeed { speed: f32 },
    /// Unrecognized event from the UI layer; ignored by the simulation.
    Unknown { kind: u32, value: f32 },
}

impl ControlEvent {
    /// Decode a raw (kind, value) pair pushed from JS via wasm-bindgen.
    pub fn from_raw(kind: u32, value: f32) -> Self {
        match kind {
            CONTROL_STOP_ALL => ControlEvent::StopAll,
            CONTROL_TOGGLE_HEAD => ControlEvent::ToggleHead,
            CONTROL_SET_SPEED => ControlEvent::SetSpeed { speed: value },
            _ => ControlEvent::Unknown { kind, value },
        }
    }
}

/// A queue of control events.
/// JS writes events into the queue; the sim reads and drains them each frame.
pub struct InputQueue {
    events: Vec<ControlEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    /// Push a new control event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: ControlEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &ControlEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
