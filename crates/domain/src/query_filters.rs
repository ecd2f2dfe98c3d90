use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Classifies PTR questions so reverse lookups for private address space are
/// answered locally instead of leaking to upstreams.
pub struct PrivateIpFilter;

impl PrivateIpFilter {
    pub fn is_private_ip(ip: &IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => Self::is_private_ipv4(v4),
            IpAddr::V6(v6) => Self::is_private_ipv6(v6),
        }
    }

    fn is_private_ipv4(ip: &Ipv4Addr) -> bool {
        ip.is_private() || ip.is_loopback() || ip.is_link_local()
    }

    fn is_private_ipv6(ip: &Ipv6Addr) -> bool {
        if ip.is_loopback() {
            return true;
        }
        let segments = ip.segments();
        // fc00::/7 unique-local, fe80::/10 link-local
        (segments[0] & 0xfe00) == 0xfc00 || (segments[0] & 0xffc0) == 0xfe80
    }

    /// Recover the queried address from a reverse-lookup name, e.g.
    /// `1.1.168.192.in-addr.arpa` → `192.168.1.1`.
    pub fn extract_ip_from_ptr(domain: &str) -> Option<IpAddr> {
        if let Some(v4_part) = domain.strip_suffix(".in-addr.arpa") {
            let octets: Vec<&str> = v4_part.split('.').collect();
            if octets.len() != 4 {
                return None;
            }
            let forward: Vec<&str> = octets.iter().rev().copied().collect();
            return forward.join(".").parse::<Ipv4Addr>().ok().map(IpAddr::V4);
        }

        if let Some(v6_part) = domain.strip_suffix(".ip6.arpa") {
            let nibbles: Vec<char> = v6_part
                .chars()
                .filter(|c| c.is_ascii_hexdigit())
                .collect();
            if nibbles.len() != 32 {
                return None;
            }
            let forward: String = nibbles.iter().rev().collect();
            let grouped: Vec<String> = forward
                .as_bytes()
                .chunks(4)
                .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
                .collect();
            return grouped.join(":").parse::<Ipv6Addr>().ok().map(IpAddr::V6);
        }

        None
    }

    pub fn is_private_ptr_query(domain: &str) -> bool {
        Self::extract_ip_from_ptr(domain)
            .map(|ip| Self::is_private_ip(&ip))
            .unwrap_or(false)
    }
}
