//! Widget components shared by the screens.
//!
//! - [`icons`]: 8x8 bitmaps for the info screens
//! - [`popups`]: Confirmation overlays for the power menu and service list
//! - [`primitives`]: Scrollbar and text truncation
//!
//! Every widget is generic over `DrawTarget<Color = BinaryColor>` and uses the
//! const styles from [`styles`](crate::styles).

pub mod icons;
mod popups;
mod primitives;

pub use icons::draw_icon;
pub use popups::{draw_confirm_box, draw_prompt_line};
pub use primitives::{SCROLLBAR_WIDTH, draw_scrollbar, scrollbar_thumb, truncate};
