pub mod runner;

pub use runner::FanRunner;

use std::cell::RefCell;

use breeze_engine::{FanConfig, CONTROL_SET_SPEED, CONTROL_STOP_ALL, CONTROL_TOGGLE_HEAD};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<FanRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut FanRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Fan not initialized. Call fan_init() first.");
        f(runner)
    })
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn install(config: FanConfig) {
    let mut runner = FanRunner::new(config);
    runner.init();
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("breeze: initialized");
}

/// Start the fan with default configuration.
#[wasm_bindgen]
pub fn fan_init() {
    init_logging();
    install(FanConfig::default());
}

/// Start the fan with a JSON configuration from the page.
/// Malformed JSON is logged and falls back to the defaults.
#[wasm_bindgen]
pub fn fan_init_with_config(json: &str) {
    init_logging();
    let config = match FanConfig::from_json(json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("invalid fan config, using defaults: {err}");
            FanConfig::default()
        }
    };
    install(config);
}

/// Advance the simulation by one display frame (dt in seconds).
#[wasm_bindgen]
pub fn fan_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

/// Generic control event entry point.
#[wasm_bindgen]
pub fn fan_control_event(kind: u32, value: f32) {
    with_runner(|r| r.push_control(kind, value));
}

// ---- Convenience wrappers matching the five page buttons ----

#[wasm_bindgen]
pub fn fan_set_speed(speed: f32) {
    with_runner(|r| r.push_control(CONTROL_SET_SPEED, speed));
}

#[wasm_bindgen]
pub fn fan_toggle_head() {
    with_runner(|r| r.push_control(CONTROL_TOGGLE_HEAD, 0.0));
}

#[wasm_bindgen]
pub fn fan_stop_all() {
    with_runner(|r| r.push_control(CONTROL_STOP_ALL, 0.0));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_pose_offset() -> u32 {
    with_runner(|r| r.pose_offset())
}

#[wasm_bindgen]
pub fn get_event_data_offset() -> u32 {
    with_runner(|r| r.event_data_offset())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}

#[wasm_bindgen]
pub fn get_event_count() -> u32 {
    with_runner(|r| r.event_count())
}
