use breeze_engine::bridge::protocol::{
    EVENT_FLOATS, HEADER_ACTIVE_CONTROL, HEADER_EVENT_COUNT, HEADER_FRAME_COUNTER,
    HEADER_MAX_EVENTS, HEADER_POSE_FLOATS, HEADER_PROTOCOL_VERSION, POSE_FLOATS, PROTOCOL_VERSION,
};
use breeze_engine::{
    ControlEvent, FanConfig, FanSim, FixedTimestep, InputQueue, ProtocolLayout, RigPose,
};

/// Wires the fan simulation to the browser loop.
///
/// JS drives it: control events from button clicks go into the input
/// queue, `tick(dt)` runs from requestAnimationFrame, and after each tick
/// the pose and UI events sit in a flat f32 buffer JS reads by pointer.
pub struct FanRunner {
    sim: FanSim,
    input: InputQueue,
    pose: RigPose,
    timestep: FixedTimestep,
    layout: ProtocolLayout,
    /// Flat f32 buffer: header, pose, UI events.
    buffer: Vec<f32>,
    frame: u32,
    initialized: bool,
}

impl FanRunner {
    pub fn new(config: FanConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        let timestep = FixedTimestep::new(config.fixed_dt);
        let buffer = vec![0.0; layout.buffer_total_floats];
        let sim = FanSim::new(config);
        let pose = sim.home_pose();

        Self {
            sim,
            input: InputQueue::new(),
            pose,
            timestep,
            layout,
            buffer,
            frame: 0,
            initialized: false,
        }
    }

    /// Write the static header fields and mark the runner live.
    /// Call once after construction.
    pub fn init(&mut self) {
        self.buffer[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        self.buffer[HEADER_POSE_FLOATS] = POSE_FLOATS as f32;
        self.buffer[HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        self.initialized = true;
    }

    /// Push a raw control event from JS into the queue.
    pub fn push_control(&mut self, kind: u32, value: f32) {
        self.input.push(ControlEvent::from_raw(kind, value));
    }

    /// Run one frame: apply queued controls, advance the fixed steps this
    /// frame earned, and repack the shared buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.sim.clear_frame_data();

        // Button clicks land between frames; apply them all before stepping.
        self.sim.handle_input(&self.input);
        self.input.drain();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.sim.tick(&mut self.pose);
        }

        self.frame = self.frame.wrapping_add(1);
        self.write_buffer();
    }

    fn write_buffer(&mut self) {
        let events = self.sim.events();
        let buf = &mut self.buffer;

        buf[HEADER_FRAME_COUNTER] = self.frame as f32;
        buf[HEADER_EVENT_COUNT] = events.len() as f32;
        buf[HEADER_ACTIVE_CONTROL] = self.sim.active_control().code();

        let p = self.layout.pose_offset;
        buf[p] = self.pose.blade_spin;
        buf[p + 1] = self.pose.head_yaw;
        buf[p + 2] = self.pose.position.x;
        buf[p + 3] = self.pose.position.y;
        buf[p + 4] = self.pose.position.z;

        let mut off = self.layout.event_data_offset;
        for event in events {
            buf[off] = event.kind;
            buf[off + 1] = event.a;
            buf[off + 2] = event.b;
            buf[off + 3] = event.c;
            off += EVENT_FLOATS;
        }
    }

    // ---- Pointer accessors for JS-side reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn pose_offset(&self) -> u32 {
        self.layout.pose_offset as u32
    }

    pub fn event_data_offset(&self) -> u32 {
        self.layout.event_data_offset as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn event_count(&self) -> u32 {
        self.sim.events().len() as u32
    }
}
