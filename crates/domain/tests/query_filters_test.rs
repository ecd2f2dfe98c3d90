use hearth_dns_domain::PrivateIpFilter;
use std::net::IpAddr;

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

#[test]
fn test_private_ipv4_detection() {
    assert!(PrivateIpFilter::is_private_ip(&ip("10.0.0.1")));
    assert!(PrivateIpFilter::is_private_ip(&ip("10.255.255.254")));
    assert!(PrivateIpFilter::is_private_ip(&ip("172.16.0.1")));
    assert!(PrivateIpFilter::is_private_ip(&ip("172.31.255.254")));
    assert!(PrivateIpFilter::is_private_ip(&ip("192.168.1.1")));
    assert!(PrivateIpFilter::is_private_ip(&ip("127.0.0.1")));
    assert!(PrivateIpFilter::is_private_ip(&ip("169.254.1.1")));

    assert!(!PrivateIpFilter::is_private_ip(&ip("8.8.8.8")));
    assert!(!PrivateIpFilter::is_private_ip(&ip("1.1.1.1")));
    assert!(!PrivateIpFilter::is_private_ip(&ip("172.15.0.1")));
    assert!(!PrivateIpFilter::is_private_ip(&ip("172.32.0.1")));
    assert!(!PrivateIpFilter::is_private_ip(&ip("192.167.255.255")));
}

#[test]
fn test_private_ipv6_detection() {
    assert!(PrivateIpFilter::is_private_ip(&ip("::1")));
    assert!(PrivateIpFilter::is_private_ip(&ip("fc00::1")));
    assert!(PrivateIpFilter::is_private_ip(&ip("fd12:3456::1")));
    assert!(PrivateIpFilter::is_private_ip(&ip("fe80::1")));

    assert!(!PrivateIpFilter::is_private_ip(&ip("2001:db8::1")));
    assert!(!PrivateIpFilter::is_private_ip(&ip("2606:4700::1111")));
}

#[test]
fn test_extract_ip_from_ptr_ipv4() {
    assert_eq!(
        PrivateIpFilter::extract_ip_from_ptr("1.0.168.192.in-addr.arpa"),
        Some(ip("192.168.0.1"))
    );
    assert_eq!(
        PrivateIpFilter::extract_ip_from_ptr("100.1.168.192.in-addr.arpa"),
        Some(ip("192.168.1.100"))
    );
    assert_eq!(
        PrivateIpFilter::extract_ip_from_ptr("8.8.8.8.in-addr.arpa"),
        Some(ip("8.8.8.8"))
    );

    assert!(PrivateIpFilter::extract_ip_from_ptr("example.com").is_none());
    assert!(PrivateIpFilter::extract_ip_from_ptr("1.2.3.in-addr.arpa").is_none());
    assert!(PrivateIpFilter::extract_ip_from_ptr("").is_none());
}

#[test]
fn test_extract_ip_from_ptr_ipv6() {
    let loopback_ptr = "1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.ip6.arpa";
    assert_eq!(
        PrivateIpFilter::extract_ip_from_ptr(loopback_ptr),
        Some(ip("::1"))
    );
    assert!(PrivateIpFilter::extract_ip_from_ptr("0.0.ip6.arpa").is_none());
}

#[test]
fn test_is_private_ptr_query() {
    assert!(PrivateIpFilter::is_private_ptr_query(
        "1.1.168.192.in-addr.arpa"
    ));
    assert!(PrivateIpFilter::is_private_ptr_query(
        "1.0.0.127.in-addr.arpa"
    ));
    assert!(!PrivateIpFilter::is_private_ptr_query(
        "8.8.8.8.in-addr.arpa"
    ));
    assert!(!PrivateIpFilter::is_private_ptr_query("example.com"));
}
