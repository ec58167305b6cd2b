#![no_main]
use libfuzzer_sys::fuzz_target;
use rfc3986::component::Host;
use std::net::{Ipv4Addr, Ipv6Addr};

fuzz_target!(|data: &str| {
    let host = Host::parse(data);

    if let Ok(addr) = data.parse::<Ipv4Addr>() {
        assert_eq!(host, Ok(Host::Ipv4(addr)));
    }
    if let Ok(Host::Ipv4(addr)) = host {
        assert_eq!(data.parse::<Ipv4Addr>(), Ok(addr));
    }

    if let Ok(Host::Ipv6 {
        addr,
        zone_id: None,
    }) = host
    {
        let inner = &data[1..data.len() - 1];
        assert_eq!(inner.parse::<Ipv6Addr>(), Ok(addr));
    }
});
