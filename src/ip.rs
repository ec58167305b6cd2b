//! IP address parsing for the host component.

use crate::pct_enc::OCTET_TABLE_LO;
use core::net::{Ipv4Addr, Ipv6Addr};

/// Outcome of reading a host as a dotted-decimal IPv4 address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Dotted {
    /// A valid address.
    Addr(Ipv4Addr),
    /// Four dot-separated groups of digits that break the `dec-octet` rule.
    Malformed {
        /// The index of the first invalid group.
        index: usize,
    },
    /// Not four dot-separated groups of digits at all.
    NotDotted,
}

// dec-octet   = DIGIT                 ; 0-9
//             / %x31-39 DIGIT         ; 10-99
//             / "1" 2DIGIT            ; 100-199
//             / "2" %x30-34 DIGIT     ; 200-249
//             / "25" %x30-35          ; 250-255
// IPv4address = dec-octet "." dec-octet "." dec-octet "." dec-octet
pub(crate) fn parse_v4(s: &[u8]) -> Dotted {
    let mut groups = 0;
    for group in s.split(|&x| x == b'.') {
        if groups == 4 || group.is_empty() || !group.iter().all(u8::is_ascii_digit) {
            return Dotted::NotDotted;
        }
        groups += 1;
    }
    if groups != 4 {
        return Dotted::NotDotted;
    }

    let mut octets = [0; 4];
    let mut index = 0;
    for (octet, group) in octets.iter_mut().zip(s.split(|&x| x == b'.')) {
        match dec_octet(group) {
            Some(x) => *octet = x,
            None => return Dotted::Malformed { index },
        }
        index += group.len() + 1;
    }
    Dotted::Addr(Ipv4Addr::from(octets))
}

fn dec_octet(digits: &[u8]) -> Option<u8> {
    // Leading zeros could be read as octal by other parsers.
    if digits.len() > 3 || (digits.len() > 1 && digits[0] == b'0') {
        return None;
    }
    let value = digits
        .iter()
        .fold(0u16, |acc, &x| acc * 10 + u16::from(x - b'0'));
    u8::try_from(value).ok()
}

/// Parses an IPv6 address, without brackets or zone identifier.
pub(crate) fn parse_v6(s: &[u8]) -> Option<Ipv6Addr> {
    let mut segs = [0u16; 8];

    let ellipsis = s.windows(2).position(|w| w == b"::");
    let (head, tail) = match ellipsis {
        Some(i) => (&s[..i], Some(&s[i + 2..])),
        None => (s, None),
    };

    let head_len = read_groups(head, &mut segs, tail.is_none())?;
    match tail {
        None => (head_len == 8).then(|| segs.into()),
        Some(tail) => {
            let mut rest = [0u16; 8];
            let tail_len = read_groups(tail, &mut rest, true)?;
            // "::" must stand for at least one group of zeros.
            if head_len + tail_len > 7 {
                return None;
            }
            segs[8 - tail_len..].copy_from_slice(&rest[..tail_len]);
            Some(segs.into())
        }
    }
}

/// Reads colon-separated 16-bit groups into `out`, returning the number of
/// groups written. The last group may be an embedded IPv4 address taking
/// two slots, if `allow_v4` is set.
fn read_groups(s: &[u8], out: &mut [u16; 8], allow_v4: bool) -> Option<usize> {
    if s.is_empty() {
        return Some(0);
    }

    let mut n = 0;
    let mut groups = s.split(|&x| x == b':').peekable();
    while let Some(group) = groups.next() {
        let is_last = groups.peek().is_none();
        if is_last && allow_v4 && group.contains(&b'.') {
            let Dotted::Addr(addr) = parse_v4(group) else {
                return None;
            };
            if n > 6 {
                return None;
            }
            let [a, b, c, d] = addr.octets();
            out[n] = u16::from_be_bytes([a, b]);
            out[n + 1] = u16::from_be_bytes([c, d]);
            n += 2;
        } else {
            if n == 8 || group.is_empty() || group.len() > 4 {
                return None;
            }
            let mut seg = 0u16;
            for &x in group {
                let digit = OCTET_TABLE_LO[x as usize];
                if digit > 0xf {
                    return None;
                }
                seg = seg << 4 | u16::from(digit);
            }
            out[n] = seg;
            n += 1;
        }
    }
    Some(n)
}
