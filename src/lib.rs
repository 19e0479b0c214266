pub mod config;
pub mod counter;
pub mod error;
pub mod log;
pub mod menu;
pub mod observer;
pub mod reveal;
pub mod scroll;
pub mod sections;
pub mod smooth_scroll;
pub mod typewriter;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
