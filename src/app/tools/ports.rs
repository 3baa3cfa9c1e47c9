use crate::config::cli::PortsArgs;
use crate::config::toml_config::PortsConfig;
use crate::core::port_watch::{PortRange, PortScanner, TcpProber, LOCALHOST};
use crate::domain::model::ScanReport;
use crate::domain::ports::Prober;
use crate::utils::error::Result;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;

const RULE_WIDTH: usize = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Busy,
    Free,
    All,
}

impl DisplayMode {
    /// `--show-all` wins over `--show-free`.
    pub fn from_flags(show_free: bool, show_all: bool) -> Self {
        if show_all {
            DisplayMode::All
        } else if show_free {
            DisplayMode::Free
        } else {
            DisplayMode::Busy
        }
    }

    fn shows_busy(&self) -> bool {
        matches!(self, DisplayMode::Busy | DisplayMode::All)
    }

    fn shows_free(&self) -> bool {
        matches!(self, DisplayMode::Free | DisplayMode::All)
    }
}

/// A single `--port` takes precedence over `--start/--end`; missing bounds fall back to the config.
pub fn resolve_range(args: &PortsArgs, config: &PortsConfig) -> Result<PortRange> {
    match args.port {
        Some(port) => PortRange::single(port),
        None => PortRange::new(
            args.start.unwrap_or(i64::from(config.start)),
            args.end.unwrap_or(i64::from(config.end)),
        ),
    }
}

pub fn run<W: Write>(args: &PortsArgs, config: &PortsConfig, out: &mut W) -> Result<()> {
    if args.manual {
        writeln!(out, "{}", MANUAL)?;
        return Ok(());
    }
    if args.examples {
        writeln!(out, "{}", EXAMPLES)?;
        return Ok(());
    }
    if args.help {
        writeln!(out, "{}", QUICK_HELP)?;
        return Ok(());
    }

    let range = resolve_range(args, config)?;
    let prober = TcpProber::from_secs(args.timeout.unwrap_or(config.timeout_secs))?;
    let mode = DisplayMode::from_flags(args.show_free, args.show_all);
    scan_and_report(prober, range, mode, args.verbose, out)
}

pub fn scan_and_report<P: Prober + Timed, W: Write>(
    prober: P,
    range: PortRange,
    mode: DisplayMode,
    progress: bool,
    out: &mut W,
) -> Result<()> {
    print_header(out, range, prober.timeout_secs(), mode)?;

    let bar = if progress {
        let pb = ProgressBar::new(range.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:50.cyan}] {percent}% ({pos}/{len})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█░"),
        );
        pb.set_message("Progress:");
        writeln!(out, "{}\n", "Scanning in progress...".bold())?;
        Some(pb)
    } else {
        writeln!(out, "{:<10} {:<15} {:<30}", "PORT".bold(), "STATUS".bold(), "INFO".bold())?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        None
    };

    let scanner = PortScanner::new(prober);
    let mut write_error = None;
    let report = scanner.scan_with(range, |_, port, busy| {
        if let Some(pb) = &bar {
            pb.inc(1);
            return;
        }
        let line = if busy && mode.shows_busy() {
            Some(format!(
                "{:<10} {:<15} {:<30}",
                port,
                "● BUSY".red(),
                "Service is running on this port"
            ))
        } else if !busy && mode.shows_free() {
            Some(format!(
                "{:<10} {:<15} {:<30}",
                port,
                "○ FREE".green(),
                "Port is available"
            ))
        } else {
            None
        };
        if let Some(line) = line {
            if let Err(e) = writeln!(out, "{}", line) {
                write_error.get_or_insert(e);
            }
        }
    });
    if let Some(pb) = bar {
        pb.finish_and_clear();
    }
    if let Some(e) = write_error {
        return Err(e.into());
    }

    print_summary(out, &report)
}

/// Probers that can report their per-port timeout for the header.
pub trait Timed {
    fn timeout_secs(&self) -> f64;
}

impl Timed for TcpProber {
    fn timeout_secs(&self) -> f64 {
        self.timeout().as_secs_f64()
    }
}

fn print_header<W: Write>(out: &mut W, range: PortRange, timeout: f64, mode: DisplayMode) -> Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{}", rule)?;
    writeln!(out, "{}", format!("{:^70}", "PORT WATCHER").cyan().bold())?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "{} {}", "Target:".bold(), LOCALHOST)?;
    writeln!(out, "{} {} - {}", "Port Range:".bold(), range.start(), range.end())?;
    writeln!(out, "{} {}s per port", "Timeout:".bold(), timeout)?;
    writeln!(out, "{}\n", rule)?;

    let mut shown = Vec::new();
    if mode.shows_busy() {
        shown.push("BUSY".red().to_string());
    }
    if mode.shows_free() {
        shown.push("FREE".green().to_string());
    }
    writeln!(out, "{} {} ports\n", "Displaying:".bold(), shown.join(" and "))?;
    Ok(())
}

/// Busy ports five per line when there are at most twenty, otherwise the first three.
pub fn busy_port_lines(busy: &[u16]) -> Vec<String> {
    if busy.len() <= 20 {
        busy.chunks(5)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect()
    } else {
        vec![
            format!(
                "{}, {}, {}, ... (showing first 3 of {})",
                busy[0],
                busy[1],
                busy[2],
                busy.len()
            ),
            "Use -a to list every port".to_string(),
        ]
    }
}

fn print_summary<W: Write>(out: &mut W, report: &ScanReport) -> Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{}", rule)?;
    writeln!(out, "{}", format!("{:^70}", "SCAN SUMMARY").cyan().bold())?;
    writeln!(out, "{}", rule)?;

    writeln!(out, "\n{}", "Statistics:".bold())?;
    writeln!(out, "  Total Scanned:  {}", report.total())?;
    writeln!(out, "  {}     {}", "Busy Ports:".red(), report.busy.len())?;
    writeln!(out, "  {}     {}", "Free Ports:".green(), report.free.len())?;
    writeln!(out, "  Scan Time:      {:.2} seconds", report.elapsed.as_secs_f64())?;
    writeln!(out, "  Speed:          {:.0} ports/sec", report.ports_per_second())?;

    if report.busy.is_empty() {
        writeln!(out, "\n{}", "✓ No busy ports found - all ports are free!".green())?;
    } else {
        writeln!(out, "\n{}", "Busy Ports:".red().bold())?;
        for line in busy_port_lines(&report.busy) {
            writeln!(out, "  {}", line)?;
        }
    }

    if !report.busy.is_empty() && report.busy.len() < report.total() {
        writeln!(out, "\n{}", "Recommendations:".bold())?;
        writeln!(out, "  • Use -f flag to find available ports")?;
        writeln!(out, "  • Check --manual to see all services")?;
    }
    writeln!(out, "{}\n", rule)?;
    Ok(())
}

pub const QUICK_HELP: &str = "
Port Watcher - Quick Help

Usage: toolshed ports [OPTIONS]

Common Options:
  -s, --start PORT    Start port (default: 8000)
  -e, --end PORT      End port (default: 9000)
  -p, --port PORT     Check single port
  -f, --show-free     Show free ports only
  -a, --show-all      Show busy and free ports
  -t, --timeout SECS  Connection timeout (default: 0.5)
  -v, --verbose       Show progress
  --manual            Full user manual
  --examples          Usage examples

Examples:
  toolshed ports                    # Scan 8000-9000
  toolshed ports -s 3000 -e 5000    # Custom range
  toolshed ports -p 8080            # Single port
  toolshed ports --manual           # Full manual
";

pub const MANUAL: &str = "
╔════════════════════════════════════════════════════════════════════════╗
║                      PORT WATCHER - USER MANUAL                        ║
╚════════════════════════════════════════════════════════════════════════╝

DESCRIPTION:
    Port Watcher identifies which local TCP ports are currently occupied.

USAGE:
    toolshed ports [OPTIONS]

OPTIONS:
    -s, --start PORT        Starting port number (default: 8000)
    -e, --end PORT          Ending port number (default: 9000)
    -p, --port PORT         Check a single specific port
    -f, --show-free         Show free ports (default: only busy ports)
    -a, --show-all          Show both busy and free ports
    -t, --timeout SECONDS   Connection timeout in seconds (default: 0.5)
    -v, --verbose           Show scanning progress
    -h, --help              Show quick help
    --manual                Show complete user manual (this page)
    --examples              Show usage examples

    Defaults can also be set in the [ports] section of toolshed.toml.

HOW IT WORKS:
    1. Each port in the range is probed in ascending order with a single
       TCP connection attempt to 127.0.0.1.
    2. A connection that succeeds within the timeout marks the port BUSY.
    3. Refusal, timeout or any other error marks the port FREE.

TECHNICAL DETAILS:
    • Protocol: TCP
    • Target: localhost (127.0.0.1)
    • Default Timeout: 0.5 seconds per port
    • Port Range: 1-65535 (default scan: 8000-9000)

TROUBLESHOOTING:
    • Slow scans: Reduce port range or decrease timeout value
    • No ports found: Ensure services are listening on localhost

EXIT CODES:
    0 - Success
    1 - Error (invalid arguments, scanning error)

NOTES:
    • Only localhost is scanned, never external hosts
    • A BUSY port indicates an active listener, not necessarily a reachable service
    • Firewalls may interfere with results
";

pub const EXAMPLES: &str = "
╔════════════════════════════════════════════════════════════════════════╗
║                     PORT WATCHER - USAGE EXAMPLES                      ║
╚════════════════════════════════════════════════════════════════════════╝

BASIC USAGE:
    $ toolshed ports

CUSTOM PORT RANGE:
    $ toolshed ports --start 3000 --end 5000
    $ toolshed ports -s 3000 -e 5000

SINGLE PORT CHECK:
    $ toolshed ports -p 8080

SHOW ALL PORTS:
    $ toolshed ports --show-all -s 8000 -e 8005

SHOW ONLY FREE PORTS:
    $ toolshed ports --show-free -s 3000 -e 3010

VERBOSE MODE:
    $ toolshed ports -v -s 1000 -e 2000

QUICK SCAN:
    $ toolshed ports -t 0.2 -s 8000 -e 8100

COMMON SCENARIOS:
    1. Find an available port for your web server:
       $ toolshed ports -f -s 3000 -e 3100
    2. Check if your database is running:
       $ toolshed ports -p 5432  # PostgreSQL
       $ toolshed ports -p 3306  # MySQL
    3. Scan well-known service ports:
       $ toolshed ports -s 80 -e 443 -a
";
