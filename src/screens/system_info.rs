//! Host overview: CPU, memory, disk and uptime.
//!
//! ```text
//! [cpu] CPU: 37%
//! [ram] RAM: 512/1024 MB
//! [dsk] DSK: 12/30 GB
//! [clk] UPT: 1d 02h 03m
//! ```

use core::fmt::Write;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use heapless::String;

use super::ScreenContext;
use crate::styles::TEXT_STYLE;
use crate::widgets::{draw_icon, icons};

// =============================================================================
// Layout Constants
// =============================================================================

const ICON_X: i32 = 0;
const TEXT_X: i32 = 10;

/// Text baselines, one row per metric.
const ROW_BASELINES: [i32; 4] = [12, 28, 44, 60];

/// Icon top edge relative to the row baseline.
const ICON_RISE: i32 = 8;

pub(super) fn draw<D>(
    display: &mut D,
    ctx: &ScreenContext<'_>,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let telemetry = ctx.telemetry;
    let memory = telemetry.memory_info();
    let disk = telemetry.disk_info();

    let mut cpu: String<24> = String::new();
    let _ = write!(cpu, "CPU: {:.0}%", telemetry.cpu_usage_percent());

    let mut ram: String<24> = String::new();
    let _ = write!(ram, "RAM: {}/{} MB", memory.used, memory.total);

    let mut dsk: String<24> = String::new();
    let _ = write!(dsk, "DSK: {}/{} GB", disk.used, disk.total);

    let mut upt: String<24> = String::new();
    let _ = write!(upt, "UPT: {}", telemetry.uptime());

    let rows: [(&icons::Icon, &str); 4] = [
        (&icons::CPU, cpu.as_str()),
        (&icons::RAM, ram.as_str()),
        (&icons::DISK, dsk.as_str()),
        (&icons::CLOCK, upt.as_str()),
    ];

    for ((icon, text), baseline) in rows.into_iter().zip(ROW_BASELINES) {
        draw_icon(display, ICON_X, baseline - ICON_RISE, icon);
        Text::new(text, Point::new(TEXT_X, baseline), TEXT_STYLE)
            .draw(display)
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;
    use crate::state::NavigationState;
    use crate::telemetry::{StaticTelemetry, Usage};

    #[test]
    fn test_draws_all_rows() {
        let nav = NavigationState::new();
        let telemetry = StaticTelemetry {
            cpu: 37.4,
            memory: Usage { used: 512, total: 1024 },
            disk: Usage { used: 12, total: 30 },
            uptime: "1d 02h 03m".into(),
            ..StaticTelemetry::default()
        };
        let ctx = ScreenContext {
            nav: &nav,
            telemetry: &telemetry,
        };
        let mut fb = Framebuffer::new(128, 64);
        draw(&mut fb, &ctx);

        for baseline in ROW_BASELINES {
            let icon_row = (baseline - ICON_RISE) as u32;
            let has_icon = (icon_row..icon_row + 8).any(|y| (0..8).any(|x| fb.is_dark(x, y)));
            let has_text = (icon_row..baseline as u32).any(|y| (10..128).any(|x| fb.is_dark(x, y)));
            assert!(has_icon, "icon missing at baseline {baseline}");
            assert!(has_text, "text missing at baseline {baseline}");
        }
    }
}
