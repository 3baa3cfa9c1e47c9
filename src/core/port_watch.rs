use crate::domain::model::ScanReport;
use crate::domain::ports::Prober;
use crate::utils::error::{Result, ToolError};
use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::time::{Duration, Instant};

pub const DEFAULT_START_PORT: u32 = 8000;
pub const DEFAULT_END_PORT: u32 = 9000;
pub const DEFAULT_TIMEOUT_SECS: f64 = 0.5;
pub const LOCALHOST: Ipv4Addr = Ipv4Addr::LOCALHOST;

/// Inclusive, validated port range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    /// Accepts `i64` so out-of-bounds user input is reported instead of truncated.
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if !(1..=65535).contains(&start) || !(1..=65535).contains(&end) {
            return Err(ToolError::validation("Ports must be between 1 and 65535"));
        }
        if start > end {
            return Err(ToolError::validation("Start port must be <= end port"));
        }
        Ok(Self {
            start: start as u16,
            end: end as u16,
        })
    }

    pub fn single(port: i64) -> Result<Self> {
        if !(1..=65535).contains(&port) {
            return Err(ToolError::validation("Port must be between 1 and 65535"));
        }
        Ok(Self {
            start: port as u16,
            end: port as u16,
        })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Always false: construction rejects `start > end`, so a range holds at least one port.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }
}

#[derive(Debug, Clone)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_secs(secs: f64) -> Result<Self> {
        let timeout = Duration::try_from_secs_f64(secs)
            .map_err(|_| ToolError::validation("Timeout must be a non-negative number of seconds"))?;
        if timeout.is_zero() {
            return Err(ToolError::validation("Timeout must be greater than 0"));
        }
        Ok(Self::new(timeout))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS))
    }
}

impl Prober for TcpProber {
    fn is_busy(&self, port: u16) -> bool {
        let addr = SocketAddr::from((LOCALHOST, port));
        match TcpStream::connect_timeout(&addr, self.timeout) {
            Ok(_stream) => true,
            Err(e) => {
                tracing::trace!("Port {} free: {}", port, e);
                false
            }
        }
    }
}

pub struct PortScanner<P: Prober> {
    prober: P,
}

impl<P: Prober> PortScanner<P> {
    pub fn new(prober: P) -> Self {
        Self { prober }
    }

    pub fn scan(&self, range: PortRange) -> ScanReport {
        self.scan_with(range, |_, _, _| {})
    }

    /// Probes every port sequentially in ascending order. `on_probe` receives
    /// the 1-based position, the port, and whether it was busy.
    pub fn scan_with<F>(&self, range: PortRange, mut on_probe: F) -> ScanReport
    where
        F: FnMut(usize, u16, bool),
    {
        tracing::debug!("Scanning ports {}-{} on {}", range.start(), range.end(), LOCALHOST);
        let started = Instant::now();
        let mut report = ScanReport::default();

        for (i, port) in range.iter().enumerate() {
            let busy = self.prober.is_busy(port);
            if busy {
                report.busy.push(port);
            } else {
                report.free.push(port);
            }
            on_probe(i + 1, port, busy);
        }

        report.elapsed = started.elapsed();
        tracing::debug!(
            "Scan finished: {} busy, {} free in {:?}",
            report.busy.len(),
            report.free.len(),
            report.elapsed
        );
        report
    }
}
