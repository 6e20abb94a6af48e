//! System telemetry for the info screens.
//!
//! [`Telemetry`] is the only thing screens know about the host. Providers never
//! fail: a missing file or a failed command yields zeros or an empty list, and
//! the failure is logged at debug level.
//!
//! [`ProcTelemetry`] reads Linux `/proc` and `/sys`, `statvfs` and two external
//! commands (`ip`, `systemctl`). The parsers are plain functions over text so
//! they can be tested without a Linux host.

use std::collections::HashMap;
use std::ffi::CString;
use std::fs;
use std::mem::MaybeUninit;
use std::process::Command;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use log::debug;

use crate::config::CPU_SAMPLE_WINDOW;

// =============================================================================
// Data Types
// =============================================================================

/// Used / total pair. Units depend on the source (MB for memory, GB for disk).
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Usage {
    pub used: u64,
    pub total: u64,
}

/// One non-loopback network interface.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct NetworkInterface {
    pub name: String,
    /// IPv4 address without prefix length, empty when none is assigned.
    pub ip: String,
    pub up: bool,
    pub rx_bytes_per_sec: u64,
    pub tx_bytes_per_sec: u64,
}

/// Host information consumed by the screens.
pub trait Telemetry: Send + Sync {
    /// Busy share of all CPUs since the previous call, 0..=100.
    fn cpu_usage_percent(&self) -> f32;

    /// Memory in MB.
    fn memory_info(&self) -> Usage;

    /// Root filesystem in GB.
    fn disk_info(&self) -> Usage;

    /// Human readable uptime: `1d 02h 03m`, `02h 03m` or `03m`.
    fn uptime(&self) -> String;

    /// Non-loopback interfaces in a stable order.
    fn network_interfaces(&self) -> Vec<NetworkInterface>;

    /// Running service units without the `.service` suffix, sorted.
    fn running_services(&self) -> Vec<String>;

    /// Length of the last interface listing.
    ///
    /// Called from the key reader, so providers whose listing is expensive
    /// or stateful should answer from the previous call.
    fn interface_count(&self) -> usize { self.network_interfaces().len() }

    /// Length of the last service listing. Same contract as
    /// [`interface_count`](Self::interface_count).
    fn service_count(&self) -> usize { self.running_services().len() }
}

// =============================================================================
// Parsers
// =============================================================================

/// Aggregate CPU counters from the first line of `/proc/stat`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CpuSample {
    pub total: u64,
    /// idle + iowait
    pub idle: u64,
}

pub fn parse_cpu_sample(stat: &str) -> Option<CpuSample> {
    let line = stat.lines().find(|l| l.starts_with("cpu "))?;
    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .take(8)
        .map(|f| f.parse().unwrap_or(0))
        .collect();
    if fields.len() < 4 {
        return None;
    }
    let idle = fields[3] + fields.get(4).copied().unwrap_or(0);
    Some(CpuSample {
        total: fields.iter().sum(),
        idle,
    })
}

/// Busy percentage between two samples. Zero when no time passed.
pub fn cpu_percent(
    prev: CpuSample,
    cur: CpuSample,
) -> f32 {
    let total = cur.total.saturating_sub(prev.total);
    if total == 0 {
        return 0.0;
    }
    let idle = cur.idle.saturating_sub(prev.idle).min(total);
    100.0 * (1.0 - idle as f32 / total as f32)
}

/// Used / total memory in MB, used = total - free - buffers - cached.
pub fn parse_meminfo(meminfo: &str) -> Usage {
    let mut total = 0u64;
    let mut free = 0u64;
    let mut buffers = 0u64;
    let mut cached = 0u64;

    for line in meminfo.lines() {
        let mut parts = line.split_whitespace();
        let (Some(label), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let value: u64 = value.parse().unwrap_or(0);
        match label {
            "MemTotal:" => total = value,
            "MemFree:" => free = value,
            "Buffers:" => buffers = value,
            "Cached:" => cached = value,
            _ => {}
        }
    }

    Usage {
        used: total.saturating_sub(free + buffers + cached) / 1024,
        total: total / 1024,
    }
}

/// Whole seconds from `/proc/uptime`.
pub fn parse_uptime_secs(uptime: &str) -> Option<u64> {
    let first = uptime.split_whitespace().next()?;
    first.parse::<f64>().ok().map(|s| s as u64)
}

pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours:02}h {minutes:02}m")
    } else if hours > 0 {
        format!("{hours:02}h {minutes:02}m")
    } else {
        format!("{minutes:02}m")
    }
}

/// Interface name to IPv4 address from `ip -o -4 addr show`.
///
/// Lines look like `2: eth0    inet 192.168.1.20/24 brd ...`. The first
/// address of an interface wins.
pub fn parse_ipv4_addrs(output: &str) -> HashMap<String, String> {
    let mut addrs = HashMap::new();
    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(pos) = fields.iter().position(|&f| f == "inet") else {
            continue;
        };
        let (Some(name), Some(cidr)) = (fields.get(1), fields.get(pos + 1)) else {
            continue;
        };
        let ip = cidr.split('/').next().unwrap_or_default();
        addrs
            .entry(name.trim_end_matches(':').to_string())
            .or_insert_with(|| ip.to_string());
    }
    addrs
}

/// Service names from `systemctl list-units --type=service --state=running`.
pub fn parse_services(output: &str) -> Vec<String> {
    let mut services: Vec<String> = output
        .lines()
        .filter_map(|line| {
            line.split_whitespace()
                .find(|f| f.ends_with(".service"))
                .and_then(|unit| unit.strip_suffix(".service"))
                .map(str::to_string)
        })
        .collect();
    services.sort();
    services.dedup();
    services
}

/// Bytes per second between two counter readings.
pub fn byte_rate(
    prev: u64,
    cur: u64,
    elapsed_secs: f64,
) -> u64 {
    if elapsed_secs <= 0.0 {
        return 0;
    }
    (cur.saturating_sub(prev) as f64 / elapsed_secs) as u64
}

// =============================================================================
// Linux Provider
// =============================================================================

/// Previous counter reading for one interface.
#[derive(Clone, Copy, Debug)]
struct NetSample {
    rx: u64,
    tx: u64,
    at: Instant,
}

/// Byte counter history per interface.
#[derive(Debug, Default)]
pub struct RateTracker {
    samples: HashMap<String, NetSample>,
}

impl RateTracker {
    /// RX / TX bytes per second since the previous reading of `name`, zero on
    /// the first one. Remembers this reading.
    pub fn update(
        &mut self,
        name: &str,
        rx: u64,
        tx: u64,
        at: Instant,
    ) -> (u64, u64) {
        let rates = self.samples.get(name).map_or((0, 0), |prev| {
            let secs = at.saturating_duration_since(prev.at).as_secs_f64();
            (byte_rate(prev.rx, rx, secs), byte_rate(prev.tx, tx, secs))
        });
        self.samples.insert(name.to_string(), NetSample { rx, tx, at });
        rates
    }

    /// Drop history of interfaces not in `names`.
    pub fn retain(
        &mut self,
        names: &[String],
    ) {
        self.samples.retain(|name, _| names.contains(name));
    }

    #[inline]
    pub fn len(&self) -> usize { self.samples.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }
}

/// Telemetry from `/proc`, `/sys/class/net`, `statvfs` and `systemctl`.
#[derive(Debug, Default)]
pub struct ProcTelemetry {
    last_cpu: Mutex<Option<CpuSample>>,
    last_net: Mutex<RateTracker>,
    interface_count: AtomicUsize,
    service_count: AtomicUsize,
}

impl ProcTelemetry {
    pub fn new() -> Self { Self::default() }

    fn read(path: &str) -> Option<String> {
        fs::read_to_string(path)
            .map_err(|e| debug!("Cannot read {path}: {e}"))
            .ok()
    }

    fn run(
        program: &str,
        args: &[&str],
    ) -> Option<String> {
        match Command::new(program).args(args).output() {
            Ok(out) if out.status.success() => Some(String::from_utf8_lossy(&out.stdout).into_owned()),
            Ok(out) => {
                debug!("{program} exited with {}", out.status);
                None
            }
            Err(e) => {
                debug!("Cannot run {program}: {e}");
                None
            }
        }
    }

    fn cpu_sample() -> Option<CpuSample> { Self::read("/proc/stat").as_deref().and_then(parse_cpu_sample) }

    fn read_counter(path: &str) -> u64 {
        Self::read(path)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }
}

impl Telemetry for ProcTelemetry {
    fn cpu_usage_percent(&self) -> f32 {
        let Ok(mut last) = self.last_cpu.lock() else {
            return 0.0;
        };
        let prev = match *last {
            Some(prev) => prev,
            None => {
                let Some(first) = Self::cpu_sample() else {
                    return 0.0;
                };
                thread::sleep(CPU_SAMPLE_WINDOW);
                first
            }
        };
        let Some(cur) = Self::cpu_sample() else {
            return 0.0;
        };
        *last = Some(cur);
        cpu_percent(prev, cur)
    }

    fn memory_info(&self) -> Usage {
        Self::read("/proc/meminfo")
            .map(|s| parse_meminfo(&s))
            .unwrap_or_default()
    }

    fn disk_info(&self) -> Usage {
        const GB: u64 = 1024 * 1024 * 1024;

        let Ok(root) = CString::new("/") else {
            return Usage::default();
        };
        let mut stat = MaybeUninit::<libc::statvfs>::uninit();
        // SAFETY: `root` is a valid C string and `stat` is a writable statvfs.
        let rc = unsafe { libc::statvfs(root.as_ptr(), stat.as_mut_ptr()) };
        if rc != 0 {
            debug!("statvfs(/) failed: {}", std::io::Error::last_os_error());
            return Usage::default();
        }
        // SAFETY: statvfs returned 0, so the struct is initialized.
        let stat = unsafe { stat.assume_init() };

        let block = stat.f_frsize as u64;
        let blocks = stat.f_blocks as u64;
        let free = stat.f_bfree as u64;
        Usage {
            used: blocks.saturating_sub(free) * block / GB,
            total: blocks * block / GB,
        }
    }

    fn uptime(&self) -> String {
        Self::read("/proc/uptime")
            .as_deref()
            .and_then(parse_uptime_secs)
            .map_or_else(|| "?".to_string(), format_uptime)
    }

    fn network_interfaces(&self) -> Vec<NetworkInterface> {
        let Ok(entries) = fs::read_dir("/sys/class/net") else {
            debug!("Cannot list /sys/class/net");
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name != "lo")
            .collect();
        names.sort();

        let addrs = Self::run("ip", &["-o", "-4", "addr", "show"])
            .map(|out| parse_ipv4_addrs(&out))
            .unwrap_or_default();

        let now = Instant::now();
        let mut rates = self.last_net.lock().ok();
        if let Some(rates) = rates.as_mut() {
            rates.retain(&names);
        }
        self.interface_count.store(names.len(), Ordering::Relaxed);

        names
            .into_iter()
            .map(|name| {
                let base = format!("/sys/class/net/{name}");
                let up = Self::read(&format!("{base}/operstate")).is_some_and(|s| s.trim() == "up");
                let rx = Self::read_counter(&format!("{base}/statistics/rx_bytes"));
                let tx = Self::read_counter(&format!("{base}/statistics/tx_bytes"));

                let (rx_rate, tx_rate) = rates
                    .as_mut()
                    .map_or((0, 0), |rates| rates.update(&name, rx, tx, now));

                NetworkInterface {
                    ip: addrs.get(&name).cloned().unwrap_or_default(),
                    name,
                    up,
                    rx_bytes_per_sec: rx_rate,
                    tx_bytes_per_sec: tx_rate,
                }
            })
            .collect()
    }

    fn running_services(&self) -> Vec<String> {
        let services = Self::run(
            "systemctl",
            &["list-units", "--type=service", "--state=running", "--no-legend", "--plain"],
        )
        .map(|out| parse_services(&out))
        .unwrap_or_default();
        self.service_count.store(services.len(), Ordering::Relaxed);
        services
    }

    fn interface_count(&self) -> usize { self.interface_count.load(Ordering::Relaxed) }

    fn service_count(&self) -> usize { self.service_count.load(Ordering::Relaxed) }
}

// =============================================================================
// Test Support
// =============================================================================

/// Fixed telemetry values for tests.
#[cfg(test)]
#[derive(Clone, Default, Debug)]
pub(crate) struct StaticTelemetry {
    pub cpu: f32,
    pub memory: Usage,
    pub disk: Usage,
    pub uptime: String,
    pub interfaces: Vec<NetworkInterface>,
    pub services: Vec<String>,
}

#[cfg(test)]
impl StaticTelemetry {
    /// `n` services named `svc00`, `svc01`, ...
    pub fn with_services(n: usize) -> Self {
        Self {
            services: (0..n).map(|i| format!("svc{i:02}")).collect(),
            ..Self::default()
        }
    }

    /// `n` interfaces named `eth0`, `eth1`, ...
    pub fn with_interfaces(n: usize) -> Self {
        Self {
            interfaces: (0..n)
                .map(|i| NetworkInterface {
                    name: format!("eth{i}"),
                    ..NetworkInterface::default()
                })
                .collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Telemetry for StaticTelemetry {
    fn cpu_usage_percent(&self) -> f32 { self.cpu }

    fn memory_info(&self) -> Usage { self.memory }

    fn disk_info(&self) -> Usage { self.disk }

    fn uptime(&self) -> String { self.uptime.clone() }

    fn network_interfaces(&self) -> Vec<NetworkInterface> { self.interfaces.clone() }

    fn running_services(&self) -> Vec<String> { self.services.clone() }
}

/// Knows list lengths only; listing panics.
#[cfg(test)]
#[derive(Clone, Copy, Default, Debug)]
pub(crate) struct CountOnlyTelemetry {
    pub interfaces: usize,
    pub services: usize,
}

#[cfg(test)]
impl Telemetry for CountOnlyTelemetry {
    fn cpu_usage_percent(&self) -> f32 { 0.0 }

    fn memory_info(&self) -> Usage { Usage::default() }

    fn disk_info(&self) -> Usage { Usage::default() }

    fn uptime(&self) -> String { String::new() }

    fn network_interfaces(&self) -> Vec<NetworkInterface> { panic!("interfaces listed") }

    fn running_services(&self) -> Vec<String> { panic!("services listed") }

    fn interface_count(&self) -> usize { self.interfaces }

    fn service_count(&self) -> usize { self.services }
}

// =============================================================================
// Unit Tests
// =============================================================================
