//! Long-running tasks.
//!
//! - [`keypad`]: Background thread turning serial key codes into navigation
//!   changes and redraw requests
//! - [`render`]: Main-thread render loop that owns the framebuffer and the
//!   serial write side

pub mod keypad;
pub mod render;

pub use keypad::{KeyReader, request_redraw};
pub use render::Scheduler;
