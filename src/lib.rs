// Crate-level lints: pixel math casts between u32, i32 and usize are intentional
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

//! Status panel for 128x64 serial graphic LCD modules with a 7-key keypad.
//!
//! The panel shows host telemetry (CPU, memory, disk, uptime, network
//! interfaces, running services) and offers a power menu and service
//! stop / restart, all driven from the keypad on the same serial line.
//!
//! # Architecture
//!
//! ```text
//! keypad thread                     main thread
//! ┌──────────────┐   atomics   ┌──────────────────────────────┐
//! │ KeyReader    │ ──────────▶ │ NavigationState              │
//! │  read 1 byte │             │                              │
//! │  handle_key  │  bounded(1) │ Scheduler (redraw | 1 s tick)│
//! │  try_send ───┼───────────▶ │  dialog dispatch             │
//! └──────────────┘             │  Screen::draw → Framebuffer  │
//!                              │  WireFrame::encode           │
//!                              │  DisplayLink::send_frame     │
//!                              └──────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`framebuffer`]: 1-bit draw target and scanline packing
//! - [`protocol`]: Column transposition and transmission order
//! - [`device`]: Init sequence, settle delays, frame writes
//! - [`state`]: Navigation state and key dispatch
//! - [`screens`]: The five screens
//! - [`widgets`]: Icons, prompts, scrollbar
//! - [`telemetry`]: Host information provider
//! - [`actions`]: Shutdown, reboot and service control
//! - [`tasks`]: Keypad reader and render scheduler

pub mod actions;
pub mod config;
pub mod device;
pub mod error;
pub mod framebuffer;
pub mod protocol;
pub mod screens;
pub mod state;
pub mod styles;
pub mod tasks;
pub mod telemetry;
pub mod widgets;

pub use error::{Error, Result};
