//! Navigation state for the panel.
//!
//! - `keys`: Keypad byte codes
//! - `dialog`: Modal dialog kinds, results and service actions
//! - `navigation`: Shared atomic cursors and modal flags
//! - `input`: Key press dispatch

mod dialog;
mod input;
mod keys;
mod navigation;

pub use dialog::{DialogKind, DialogResult, ServiceAction};
pub use input::handle_key;
pub use keys::Key;
pub use navigation::{NavigationSnapshot, NavigationState};
