use std::net::TcpListener;
use toolshed::core::port_watch::{PortRange, PortScanner, TcpProber, LOCALHOST};

/// Ports that were bound and released, so nothing listens on them now.
fn released_ports(n: usize) -> Vec<u16> {
    let listeners: Vec<TcpListener> = (0..n)
        .map(|_| TcpListener::bind((LOCALHOST, 0)).unwrap())
        .collect();
    listeners
        .iter()
        .map(|l| l.local_addr().unwrap().port())
        .collect()
}

#[test]
fn test_range_without_listeners_is_all_free() {
    let prober = TcpProber::from_secs(0.2).unwrap();
    let scanner = PortScanner::new(prober);
    for port in released_ports(3) {
        let report = scanner.scan(PortRange::single(port as i64).unwrap());
        assert!(report.busy.is_empty());
        assert_eq!(report.free, vec![port]);
    }
}

#[test]
fn test_bound_listener_is_busy() {
    let listener = TcpListener::bind((LOCALHOST, 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    let start = port.saturating_sub(1).max(1);
    let end = port.saturating_add(1);

    let scanner = PortScanner::new(TcpProber::from_secs(0.2).unwrap());
    let mut order = Vec::new();
    let report = scanner.scan_with(
        PortRange::new(start as i64, end as i64).unwrap(),
        |_, p, _| order.push(p),
    );

    assert!(report.busy.contains(&port));
    assert_eq!(report.total(), (end - start + 1) as usize);
    assert!(order.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_invalid_ranges_fail_before_scanning() {
    assert!(PortRange::new(0, 100).is_err());
    assert!(PortRange::new(100, 65536).is_err());
    assert!(PortRange::new(200, 100).is_err());
    assert!(PortRange::single(-5).is_err());
}
