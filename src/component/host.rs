use super::{scan, Violation};
use crate::{
    error::HostError,
    ip::{self, Dotted},
    pct_enc::{table, EStr},
};
use alloc::string::String;
use core::net::{Ipv4Addr, Ipv6Addr};

/// A parsed [host] subcomponent of an authority.
///
/// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
///
/// # Examples
///
/// ```
/// use rfc3986::component::Host;
/// use std::net::{Ipv4Addr, Ipv6Addr};
///
/// assert_eq!(Host::parse("127.0.0.1")?, Host::Ipv4(Ipv4Addr::LOCALHOST));
/// assert_eq!(
///     Host::parse("[::1%25eth0]")?,
///     Host::Ipv6 { addr: Ipv6Addr::LOCALHOST, zone_id: Some("eth0".into()) },
/// );
/// assert_eq!(
///     Host::parse("Example.COM")?,
///     Host::RegisteredName("example.com".into()),
/// );
/// # Ok::<_, rfc3986::error::HostError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Host {
    /// An IPv4 address in strict dotted-decimal form.
    Ipv4(Ipv4Addr),
    /// An IPv6 address enclosed in square brackets.
    Ipv6 {
        /// The address.
        addr: Ipv6Addr,
        /// The [zone identifier] of a scoped address, still percent-encoded
        /// and without the leading `"%25"`.
        ///
        /// [zone identifier]: https://datatracker.ietf.org/doc/html/rfc6874
        zone_id: Option<String>,
    },
    /// A registered name, in lowercase with the hexadecimal digits of
    /// percent-encoded octets left as they were.
    RegisteredName(String),
}

impl Host {
    /// The empty registered name.
    pub(crate) const EMPTY: Host = Host::RegisteredName(String::new());

    /// Parses a host.
    ///
    /// A string starting with `'['` is an IP literal. Otherwise it is an IPv4
    /// address if it consists of four dot-separated groups of digits, and a
    /// registered name if it does not.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is empty, if an IP literal or a string of
    /// four digit groups is not a valid address, or if a registered name
    /// contains a disallowed byte or a malformed percent-encoded octet.
    pub fn parse(s: &str) -> Result<Self, HostError> {
        let bytes = s.as_bytes();
        if bytes.is_empty() {
            return Err(HostError::Empty);
        }

        if bytes[0] == b'[' {
            let inner = s
                .strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
                .ok_or(HostError::InvalidIpv6 { index: 0 })?;
            return parse_ip_literal(inner);
        }

        match ip::parse_v4(bytes) {
            Dotted::Addr(addr) => return Ok(Host::Ipv4(addr)),
            Dotted::Malformed { index } => return Err(HostError::InvalidIpv4 { index }),
            Dotted::NotDotted => {}
        }

        scan(bytes, table::REG_NAME).map_err(|v| match v {
            Violation::Char { index, byte } => HostError::InvalidCharacter { index, byte },
            Violation::PctEncoding { index } => HostError::InvalidRegisteredName { index },
        })?;
        Ok(Host::RegisteredName(lowercase_outside_octets(s)))
    }

    /// Returns the registered name, if the host is one.
    #[must_use]
    pub fn as_registered_name(&self) -> Option<&EStr> {
        match self {
            Host::RegisteredName(name) => Some(EStr::new_validated(name)),
            _ => None,
        }
    }

    /// Checks whether the host is an IP literal, i.e., enclosed in brackets.
    #[must_use]
    pub fn is_ip_literal(&self) -> bool {
        matches!(self, Host::Ipv6 { .. })
    }

    /// Checks whether the host is an empty registered name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Host::RegisteredName(name) if name.is_empty())
    }
}

// IP-literal = "[" ( IPv6address / IPv6addrz ) "]"
// IPv6addrz  = IPv6address "%25" ZoneID
//
// Indexes in errors count the opening bracket.
fn parse_ip_literal(s: &str) -> Result<Host, HostError> {
    let (addr, zone_id) = match s.split_once("%25") {
        Some((addr, zone)) => {
            if zone.is_empty() || !table::ZONE_ID.validate(zone.as_bytes()) {
                return Err(HostError::InvalidIpv6 {
                    index: addr.len() + 4,
                });
            }
            (addr, Some(String::from(zone)))
        }
        None => (s, None),
    };
    let addr = ip::parse_v6(addr.as_bytes()).ok_or(HostError::InvalidIpv6 { index: 1 })?;
    Ok(Host::Ipv6 { addr, zone_id })
}

/// Lowercases every ASCII letter except the hexadecimal digits that
/// follow a `'%'`.
pub(crate) fn lowercase_outside_octets(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    let mut octet_digits = 0;
    for ch in s.chars() {
        if octet_digits > 0 {
            octet_digits -= 1;
            buf.push(ch);
        } else if ch == '%' {
            octet_digits = 2;
            buf.push(ch);
        } else {
            buf.push(ch.to_ascii_lowercase());
        }
    }
    buf
}
