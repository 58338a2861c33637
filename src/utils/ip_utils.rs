use ipnet::Ipv4Net;
use std::net::Ipv4Addr;

/// IPv4 helpers for subnet derivation and address formatting

/// Check if a string is a valid IPv4 address
pub fn is_valid_ipv4(ip: &str) -> bool {
    ip.trim().parse::<Ipv4Addr>().is_ok()
}

/// Drop a `/len` suffix: `"10.0.0.1/32"` → `"10.0.0.1"`
pub fn strip_prefix_len(addr: &str) -> &str {
    let addr = addr.trim();
    addr.split_once('/').map_or(addr, |(ip, _)| ip)
}

/// Attach a prefix length to a bare address, leaving `a.b.c.d/n` untouched
pub fn with_prefix_len(ip: &str, cidr: Option<u8>) -> String {
    let ip = ip.trim();
    match cidr {
        Some(len) if !ip.contains('/') => format!("{}/{}", ip, len),
        _ => ip.to_string(),
    }
}

/// Network address of `ip/prefix` in CIDR notation (`10.1.0.5`, 24 → `10.1.0.0/24`)
pub fn network_of(ip: &str, prefix: u8) -> Option<String> {
    let addr = strip_prefix_len(ip).parse::<Ipv4Addr>().ok()?;
    let net = Ipv4Net::new(addr, prefix).ok()?;
    Some(net.trunc().to_string())
}

/// Network address of an `a.b.c.d/n` string
pub fn network_of_cidr(addr: &str) -> Option<String> {
    let net = addr.trim().parse::<Ipv4Net>().ok()?;
    Some(net.trunc().to_string())
}

/// Host route for an address, ignoring any prefix it carries
pub fn host_route(addr: &str) -> Option<String> {
    let ip = strip_prefix_len(addr);
    if is_valid_ipv4(ip) {
        Some(format!("{}/32", ip))
    } else {
        None
    }
}

/// The /30 block an address belongs to (point-to-point links)
pub fn anchor_slash30(addr: &str) -> Option<String> {
    network_of(addr, 30)
}

/// Highest host address of an `a.b.c.d/n` network (broadcast minus one)
pub fn last_host(subnet: &str) -> Option<String> {
    let net = subnet.trim().parse::<Ipv4Net>().ok()?;
    if net.prefix_len() > 30 {
        return None;
    }
    let last = u32::from(net.broadcast()).checked_sub(1)?;
    Some(Ipv4Addr::from(last).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_and_attach_prefix() {
        assert_eq!(strip_prefix_len("10.0.0.1/32"), "10.0.0.1");
        assert_eq!(strip_prefix_len(" 10.0.0.1 "), "10.0.0.1");
        assert_eq!(with_prefix_len("10.0.0.2", Some(30)), "10.0.0.2/30");
        assert_eq!(with_prefix_len("10.0.0.2/30", Some(24)), "10.0.0.2/30");
        assert_eq!(with_prefix_len("10.0.0.2", None), "10.0.0.2");
    }

    #[test]
    fn test_network_derivation() {
        assert_eq!(network_of("10.1.0.5", 24).as_deref(), Some("10.1.0.0/24"));
        assert_eq!(network_of("10.1.0.5/32", 24).as_deref(), Some("10.1.0.0/24"));
        assert_eq!(network_of("not-an-ip", 24), None);
        assert_eq!(network_of("10.1.0.5", 40), None);
        assert_eq!(network_of_cidr("100.71.85.2/30").as_deref(), Some("100.71.85.0/30"));
        assert_eq!(network_of_cidr("100.71.85.2"), None);
    }

    #[test]
    fn test_last_host() {
        assert_eq!(last_host("100.71.85.64/26").as_deref(), Some("100.71.85.126"));
        assert_eq!(last_host("10.1.0.5/24").as_deref(), Some("10.1.0.254"));
        assert_eq!(last_host("10.0.0.1/32"), None);
        assert_eq!(last_host("10.0.0.0"), None);
    }

    #[test]
    fn test_host_route_and_slash30() {
        assert_eq!(host_route("10.0.0.1/32").as_deref(), Some("10.0.0.1/32"));
        assert_eq!(host_route("10.0.0.1").as_deref(), Some("10.0.0.1/32"));
        assert_eq!(host_route(""), None);
        assert_eq!(anchor_slash30("100.71.85.18/30").as_deref(), Some("100.71.85.16/30"));
        assert_eq!(anchor_slash30("100.71.85.17").as_deref(), Some("100.71.85.16/30"));
    }
}
