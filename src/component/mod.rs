//! URI components.
//!
//! Each component has a validating `parse` function returning a typed,
//! immutable value, and serializes back to text through [`Display`].
//!
//! [`Display`]: core::fmt::Display

mod authority;
mod fragment;
mod host;
mod path;
mod port;
mod query;
mod scheme;
mod userinfo;

pub use authority::Authority;
pub use fragment::Fragment;
pub use host::Host;
pub use path::{Path, Segments};
pub use query::{Pairs, Query};
pub use port::Port;
pub use scheme::Scheme;
pub use userinfo::Userinfo;

use crate::pct_enc::{self, Table};

/// The first byte at which a string stops matching a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Violation {
    /// A byte not allowed by the table.
    Char { index: usize, byte: u8 },
    /// A `'%'` not followed by two hexadecimal digits.
    PctEncoding { index: usize },
}

/// Checks every byte of `s` against `table`.
///
/// A `'%'` is accepted only when the table allows percent-encoded octets
/// and it is followed by two hexadecimal digits.
pub(crate) fn scan(s: &[u8], table: Table) -> Result<(), Violation> {
    let mut i = 0;
    while i < s.len() {
        let x = s[i];
        if x == b'%' && table.allows_pct_encoded() {
            let [hi, lo, ..] = s[i + 1..] else {
                return Err(Violation::PctEncoding { index: i });
            };
            if !pct_enc::is_hexdig_pair(hi, lo) {
                return Err(Violation::PctEncoding { index: i });
            }
            i += 3;
        } else if table.allows(x) {
            i += 1;
        } else {
            return Err(Violation::Char { index: i, byte: x });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pct_enc::table::{PATH, UNRESERVED};

    #[test]
    fn scan_reports_first_violation() {
        assert_eq!(scan(b"a/b%2Fc", PATH), Ok(()));
        assert_eq!(
            scan(b"a b", PATH),
            Err(Violation::Char { index: 1, byte: b' ' })
        );
        assert_eq!(scan(b"ab%2", PATH), Err(Violation::PctEncoding { index: 2 }));
        assert_eq!(scan(b"%g0", PATH), Err(Violation::PctEncoding { index: 0 }));
        assert_eq!(
            scan(b"a%20", UNRESERVED),
            Err(Violation::Char { index: 1, byte: b'%' })
        );
        assert_eq!(
            scan(b"a\r\n", PATH),
            Err(Violation::Char { index: 1, byte: b'\r' })
        );
    }
}
