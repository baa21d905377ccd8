//! Client address normalization for ticket origin binding.

use std::net::{IpAddr, SocketAddr};

/// Canonical form of a client address.
///
/// IP literals are reformatted canonically, IPv4-mapped IPv6 collapses to IPv4,
/// and a trailing port is dropped. Anything that is not an address (e.g. a
/// proxy-supplied token) is trimmed and lower-cased. `None` yields the empty
/// tag.
pub fn normalize_client_address(address: Option<&str>) -> String {
    let Some(raw) = address.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return String::new();
    };

    let ip = raw
        .parse::<IpAddr>()
        .ok()
        .or_else(|| raw.parse::<SocketAddr>().ok().map(|sock| sock.ip()));

    match ip {
        Some(IpAddr::V6(v6)) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None => v6.to_string(),
        },
        Some(ip) => ip.to_string(),
        None => raw.to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_address_is_empty() {
        assert_eq!(normalize_client_address(None), "");
        assert_eq!(normalize_client_address(Some("   ")), "");
    }

    #[test]
    fn test_ipv4_forms() {
        assert_eq!(normalize_client_address(Some(" 10.0.0.1 ")), "10.0.0.1");
        assert_eq!(normalize_client_address(Some("10.0.0.1:443")), "10.0.0.1");
        assert_eq!(normalize_client_address(Some("::ffff:10.0.0.1")), "10.0.0.1");
    }

    #[test]
    fn test_ipv6_forms() {
        assert_eq!(
            normalize_client_address(Some("2001:DB8:0:0:0:0:0:1")),
            "2001:db8::1"
        );
        assert_eq!(normalize_client_address(Some("[2001:db8::1]:8080")), "2001:db8::1");
    }

    #[test]
    fn test_opaque_tokens() {
        assert_eq!(normalize_client_address(Some("Proxy-A")), "proxy-a");
    }
}
