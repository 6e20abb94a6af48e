//! `lcd-panel`: drive a 128x64 serial graphic LCD with a 7-key keypad.
//!
//! # Usage
//!
//! ```text
//! lcd-panel [DEVICE] [--odd-first]
//! ```
//!
//! `DEVICE` defaults to `/dev/ttyS1`. Logging is configured through
//! `RUST_LOG` (default `info`); `RUST_LOG=debug` shows every key press and
//! frame.
//!
//! The process runs until killed or until the serial link fails, in which case
//! it exits non-zero.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use lcd_panel::actions::SystemActions;
use lcd_panel::config::{BAUD_RATE, DEFAULT_SERIAL_DEVICE, READ_TIMEOUT};
use lcd_panel::device::{DisplayLink, LinkTiming};
use lcd_panel::protocol::BankOrder;
use lcd_panel::state::NavigationState;
use lcd_panel::tasks::{KeyReader, Scheduler};
use lcd_panel::telemetry::ProcTelemetry;
use log::{error, info};
use serialport::{DataBits, FlowControl, Parity, StopBits};

#[derive(Parser, Debug)]
#[command(version, about = "Status panel for 128x64 serial graphic LCD modules")]
struct Args {
    /// Serial device the LCD module and keypad are attached to.
    #[arg(default_value = DEFAULT_SERIAL_DEVICE)]
    device: String,

    /// Send odd 64-byte windows before even ones (for modules that latch the
    /// other bank first).
    #[arg(long)]
    odd_first: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    info!("Opening {} at {BAUD_RATE} baud", args.device);
    let port = serialport::new(&args.device, BAUD_RATE)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(READ_TIMEOUT)
        .open()
        .map_err(lcd_panel::Error::from)
        .with_context(|| format!("cannot open serial port {}", args.device))?;
    let keypad_port = port
        .try_clone()
        .context("cannot clone serial port for the keypad reader")?;

    let nav = Arc::new(NavigationState::new());
    let telemetry = Arc::new(ProcTelemetry::new());
    let (redraw_tx, redraw_rx) = bounded(1);

    KeyReader::new(keypad_port, Arc::clone(&nav), telemetry.clone(), redraw_tx)
        .spawn()
        .context("cannot start keypad reader")?;

    let order = if args.odd_first {
        BankOrder::OddFirst
    } else {
        BankOrder::EvenFirst
    };
    let link = DisplayLink::new(port, LinkTiming::default(), order);
    Scheduler::new(link, nav, telemetry, Arc::new(SystemActions))
        .run(redraw_rx)
        .context("display link failed")
}
