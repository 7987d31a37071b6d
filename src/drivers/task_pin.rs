//! Core-pinned thread spawning with explicit FreeRTOS priority.
//!
//! ESP-IDF implements `std::thread` on top of pthreads, which are thin
//! wrappers around FreeRTOS tasks. `esp_pthread_set_cfg()` sets
//! thread-local configuration consumed by the *next* `pthread_create()`
//! from the calling thread, so the config→spawn pair must not be
//! interleaved with other thread creation on the same thread.
//!
//! On host builds core and priority are ignored; only the stack size and
//! name reach the OS thread.

use std::io;
use std::thread::JoinHandle;

use crate::tasks::TaskSpec;

/// CPU core identifiers for the ESP32 dual-core parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    /// PRO_CPU: WiFi/BT stacks when enabled.
    Pro = 0,
    /// APP_CPU: the monitoring pipeline.
    App = 1,
}

/// Spawn one pipeline task as a thread pinned to `core`.
///
/// `task.name` must be null-terminated (e.g. `"sensing\0"`), since it is
/// handed to FreeRTOS as a C string.
#[cfg(target_os = "espidf")]
pub fn spawn_on_core(
    core: Core,
    task: &TaskSpec,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    // SAFETY: the config struct is fully initialised by the IDF default
    // constructor and `task.name` is a 'static null-terminated string.
    let ret = unsafe {
        let mut cfg = esp_idf_sys::esp_create_default_pthread_config();
        cfg.pin_to_core = core as i32;
        cfg.prio = task.priority as i32;
        cfg.stack_size = (task.stack_kb * 1024) as i32;
        cfg.thread_name = task.name.as_ptr() as *const _;
        esp_idf_sys::esp_pthread_set_cfg(&cfg)
    };
    if ret != esp_idf_sys::ESP_OK as i32 {
        return Err(io::Error::other(format!("esp_pthread_set_cfg failed: {ret}")));
    }

    let display_name = task.display_name();
    log::info!(
        "Spawning '{}' on {:?} (pri={}, stack={}KB)",
        display_name,
        core,
        task.priority,
        task.stack_kb
    );

    std::thread::Builder::new().name(display_name.into()).spawn(f)
}

/// Simulation fallback: ignores core affinity and priority.
#[cfg(not(target_os = "espidf"))]
pub fn spawn_on_core(
    _core: Core,
    task: &TaskSpec,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    let display_name = task.display_name();
    log::info!(
        "Spawning '{}' (sim, pri={} not applied, stack={}KB)",
        display_name,
        task.priority,
        task.stack_kb
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .stack_size(task.stack_kb * 1024)
        .spawn(f)
}
