//! Byte class tables from RFC 3986.
//!
//! The predefined table constants in this module are documented with
//! the ABNF notation of [RFC 5234].
//!
//! [RFC 5234]: https://datatracker.ietf.org/doc/html/rfc5234

use crate::pct_enc;

const MASK_PCT_ENCODED: u64 = 1 << b'%';

/// A table specifying the bytes allowed in a string.
///
/// Internally this is a 128-bit bitmap split into two `u64` words, one bit
/// per ASCII byte. Bytes outside the ASCII range are never allowed. The bit
/// of `%` is reused as a flag for whether percent-encoded octets are allowed.
///
/// # Examples
///
/// ```
/// use rfc3986::pct_enc::table::{Table, UNRESERVED};
///
/// const SLUG: Table = UNRESERVED.sub(Table::new(b"~"));
///
/// assert!(SLUG.allows(b'-'));
/// assert!(!SLUG.allows(b'~'));
/// assert!(!SLUG.allows(0xe2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Table(u64, u64);

impl Table {
    /// Creates a table that only allows the given unencoded bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII or equals `b'%'`.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0;
        while let [cur, rem @ ..] = bytes {
            assert!(
                !matches!(cur, b'%' | 128..),
                "cannot allow non-ASCII byte or %"
            );
            table |= 1u128 << *cur;
            bytes = rem;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the bytes allowed
    /// by `self` or by `other`.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Marks this table as allowing percent-encoded octets.
    #[must_use]
    pub const fn or_pct_encoded(self) -> Self {
        Self(self.0 | MASK_PCT_ENCODED, self.1)
    }

    /// Subtracts from this table.
    ///
    /// Returns a new table that allows all the bytes allowed
    /// by `self` but not allowed by `other`.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self(self.0 & !other.0, self.1 & !other.1)
    }

    /// Checks whether the table is a subset of another, i.e., `other`
    /// allows at least all the bytes allowed by `self`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & other.0 == self.0 && self.1 & other.1 == self.1
    }

    /// Checks whether the given unencoded byte is allowed by the table.
    ///
    /// Always returns `false` for `b'%'` and for bytes that are not ASCII.
    #[inline]
    #[must_use]
    pub const fn allows(self, x: u8) -> bool {
        let word = if x < 64 {
            self.0 & !MASK_PCT_ENCODED
        } else if x < 128 {
            self.1
        } else {
            return false;
        };
        word & (1u64 << (x & 63)) != 0
    }

    /// Checks whether percent-encoded octets are allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows_pct_encoded(self) -> bool {
        self.0 & MASK_PCT_ENCODED != 0
    }

    /// Checks whether the whole byte string is made up of allowed bytes
    /// and, if the table allows them, well-formed percent-encoded octets.
    #[must_use]
    pub const fn validate(self, s: &[u8]) -> bool {
        let mut i = 0;
        while i < s.len() {
            let x = s[i];
            if x == b'%' && self.allows_pct_encoded() {
                if i + 2 >= s.len() || !pct_enc::is_hexdig_pair(s[i + 1], s[i + 2]) {
                    return false;
                }
                i += 3;
            } else if self.allows(x) {
                i += 1;
            } else {
                return false;
            }
        }
        true
    }
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

/// `ALPHA = %x41-5A / %x61-7A`
pub const ALPHA: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT = %x30-39`
pub const DIGIT: Table = new(b"0123456789");

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`
pub const HEXDIG: Table = DIGIT.or(new(b"ABCDEFabcdef"));

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub const UNRESERVED: Table = ALPHA.or(DIGIT).or(new(b"-._~"));

/// `reserved = gen-delims / sub-delims`
pub const RESERVED: Table = GEN_DELIMS.or(SUB_DELIMS);

/// `gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"`
pub const GEN_DELIMS: Table = new(b":/?#[]@");

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///             / "*" / "+" / "," / ";" / "="`
pub const SUB_DELIMS: Table = new(b"!$&'()*+,;=");

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub const SCHEME: Table = ALPHA.or(DIGIT).or(new(b"+-."));

/// `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`
pub const USERINFO: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":")).or_pct_encoded();

/// `reg-name = *( unreserved / pct-encoded / sub-delims )`
pub const REG_NAME: Table = UNRESERVED.or(SUB_DELIMS).or_pct_encoded();

/// `ZoneID = 1*( unreserved / pct-encoded )` (RFC 6874)
pub const ZONE_ID: Table = UNRESERVED.or_pct_encoded();

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`
pub const PCHAR: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":@")).or_pct_encoded();

/// `path = *( pchar / "/" )`
pub const PATH: Table = PCHAR.or(new(b"/"));

/// `query = *( pchar / "/" / "?" )`
pub const QUERY: Table = PCHAR.or(new(b"/?"));

/// `fragment = *( pchar / "/" / "?" )`
pub const FRAGMENT: Table = QUERY;

/// Bytes that must never appear unencoded anywhere in a URI: every byte
/// that is neither reserved, unreserved, nor `%`.
///
/// This covers the space, the control characters `%x00-1F / %x7F`, and
/// `<`, `>`, `{`, `}`, `|`, `\`, `^`, `` ` `` and `"`.
pub(crate) const URI_CHAR: Table = RESERVED.or(UNRESERVED).or_pct_encoded();
