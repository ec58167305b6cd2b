//! Percent-encoding utilities.
//!
//! Everything here works on bytes and is agnostic to text encoding:
//! a non-ASCII character is simply percent-encoded byte by byte, and
//! reassembling decoded bytes into text is left to the caller.

pub mod table;

pub use table::Table;

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{cmp::Ordering, hash, iter::FusedIterator, str};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// Percent-encodes a byte sequence.
///
/// Each byte is kept as is if it is [allowed] by the table, or otherwise
/// replaced by `'%'` followed by two uppercase hexadecimal digits.
/// This function never fails.
///
/// Note that `'%'` is never allowed unencoded, so encoding an already
/// encoded string encodes it once more.
///
/// [allowed]: Table::allows
///
/// # Examples
///
/// ```
/// use rfc3986::pct_enc::{self, table::PCHAR};
///
/// assert_eq!(pct_enc::encode(b"hello world", PCHAR), "hello%20world");
/// assert_eq!(pct_enc::encode("¡Olé!".as_bytes(), PCHAR), "%C2%A1Ol%C3%A9!");
/// ```
#[must_use]
pub fn encode(bytes: &[u8], table: Table) -> String {
    let mut buf = String::with_capacity(bytes.len());
    encode_to(bytes, table, &mut buf);
    buf
}

/// Percent-encodes a byte sequence, appending the output to a buffer.
///
/// See [`encode`] for the exact behavior of this function.
pub fn encode_to(bytes: &[u8], table: Table, buf: &mut String) {
    for &x in bytes {
        if table.allows(x) {
            buf.push(x as char);
        } else {
            buf.push_str(encode_byte(x));
        }
    }
}

/// Decodes a percent-encoded byte sequence.
///
/// Every well-formed percent-encoded octet (`'%'` followed by two hexadecimal
/// digits of either case) is replaced by the byte it stands for. Any other
/// byte, including a `'%'` that does not start a well-formed octet, is passed
/// through unchanged. This function never fails.
///
/// The output is borrowed from the input when it contains no octet to decode.
///
/// # Examples
///
/// ```
/// use rfc3986::pct_enc;
///
/// assert_eq!(&*pct_enc::decode(b"%C2%A1Hola%21"), "¡Hola!".as_bytes());
/// assert_eq!(&*pct_enc::decode(b"100%"), b"100%");
/// assert_eq!(&*pct_enc::decode(b"%zz%4"), b"%zz%4");
/// ```
#[must_use]
pub fn decode(bytes: &[u8]) -> Cow<'_, [u8]> {
    let Some(first) = find_octet(bytes, 0) else {
        return Cow::Borrowed(bytes);
    };

    let mut buf = Vec::with_capacity(bytes.len());
    buf.extend_from_slice(&bytes[..first]);

    let mut i = first;
    while i < bytes.len() {
        let x = bytes[i];
        if x == b'%' && i + 2 < bytes.len() && is_hexdig_pair(bytes[i + 1], bytes[i + 2]) {
            buf.push(decode_octet(bytes[i + 1], bytes[i + 2]));
            i += 3;
        } else {
            buf.push(x);
            i += 1;
        }
    }
    Cow::Owned(buf)
}

/// Decodes a percent-encoded string and converts the output to a string,
/// replacing any invalid UTF-8 sequences with
/// [`U+FFFD REPLACEMENT CHARACTER`][U+FFFD].
///
/// [U+FFFD]: char::REPLACEMENT_CHARACTER
///
/// # Examples
///
/// ```
/// use rfc3986::pct_enc;
///
/// assert_eq!(pct_enc::decode_to_string_lossy("%E5%BC%A0%E4%B8%89"), "张三");
/// assert_eq!(pct_enc::decode_to_string_lossy("%FF"), "\u{FFFD}");
/// ```
#[must_use]
pub fn decode_to_string_lossy(s: &str) -> Cow<'_, str> {
    match decode(s.as_bytes()) {
        Cow::Borrowed(_) => Cow::Borrowed(s),
        Cow::Owned(bytes) => match String::from_utf8_lossy(&bytes) {
            Cow::Borrowed(s) => Cow::Owned(s.into()),
            Cow::Owned(s) => Cow::Owned(s),
        },
    }
}

/// Normalizes the percent-encoded octets in a string.
///
/// An octet whose decoded byte is [unreserved] is replaced by that byte;
/// the hexadecimal digits of any other octet are uppercased. Everything else,
/// including a `'%'` that does not start a well-formed octet, is kept as is.
/// A decoded hexadecimal digit stays encoded when it would otherwise form a
/// new octet with a preceding stray `'%'`.
///
/// This function is idempotent.
///
/// [unreserved]: table::UNRESERVED
///
/// # Examples
///
/// ```
/// use rfc3986::pct_enc;
///
/// assert_eq!(pct_enc::normalize("%7euser%2fname%3a"), "~user%2Fname%3A");
/// assert_eq!(pct_enc::normalize("100%"), "100%");
/// assert_eq!(pct_enc::normalize("%%34%31"), "%%341");
/// ```
#[must_use]
pub fn normalize(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    normalize_to(&mut buf, s, false);
    buf
}

/// Normalizes the percent-encoded octets in a string, appending the output
/// to a buffer and optionally lowercasing every unencoded ASCII letter.
pub(crate) fn normalize_to(buf: &mut String, s: &str, to_ascii_lowercase: bool) {
    let bytes = s.as_bytes();
    let mut i = 0;

    while let Some(j) = find_octet(bytes, i) {
        push_run(buf, &s[i..j], to_ascii_lowercase);

        let mut x = decode_octet(bytes[j + 1], bytes[j + 2]);
        if table::UNRESERVED.allows(x) && !(is_hexdig(x) && ends_in_partial_octet(buf)) {
            if to_ascii_lowercase {
                x.make_ascii_lowercase();
            }
            buf.push(x as char);
        } else {
            buf.push_str(encode_byte(x));
        }
        i = j + 3;
    }
    push_run(buf, &s[i..], to_ascii_lowercase);
}

/// Checks whether the buffer ends in `'%'` or `'%'` followed by a hexadecimal
/// digit, so that pushing a hexadecimal digit could complete an octet.
fn ends_in_partial_octet(buf: &str) -> bool {
    match buf.as_bytes() {
        [.., b'%'] => true,
        [.., b'%', x] => is_hexdig(*x),
        _ => false,
    }
}

fn push_run(buf: &mut String, run: &str, to_ascii_lowercase: bool) {
    let start = buf.len();
    buf.push_str(run);
    if to_ascii_lowercase {
        buf[start..].make_ascii_lowercase();
    }
}

/// Returns the index of the next well-formed percent-encoded octet at or after `from`.
fn find_octet(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() && is_hexdig_pair(bytes[i + 1], bytes[i + 2]) {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Returns the index of the first `'%'` that does not start a well-formed octet.
pub(crate) fn find_invalid_octet(bytes: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len() || !is_hexdig_pair(bytes[i + 1], bytes[i + 2]) {
                return Some(i);
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    None
}

pub(crate) const fn is_hexdig(x: u8) -> bool {
    table::HEXDIG.allows(x)
}

pub(crate) const fn is_hexdig_pair(hi: u8, lo: u8) -> bool {
    is_hexdig(hi) && is_hexdig(lo)
}

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
pub(crate) const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a percent-encoded octet, assuming that the bytes are hexadecimal.
fn decode_octet(hi: u8, lo: u8) -> u8 {
    debug_assert!(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit());
    OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize]
}

/// Returns the percent-encoded octet of a byte, with uppercase hexadecimal digits.
pub(crate) fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

/// Percent-encoded string slices.
///
/// Every `'%'` in an `EStr` starts a well-formed percent-encoded octet.
/// Component accessors hand out `EStr` slices so that you can [split] them
/// on reserved delimiters first and [decode] the pieces afterwards.
///
/// `EStr` slices are compared lexicographically by their byte values.
/// Normalization is **not** performed prior to comparison.
///
/// [split]: Self::split
/// [decode]: Self::decode
///
/// # Examples
///
/// ```
/// use rfc3986::pct_enc::EStr;
///
/// let s = EStr::new("name=%E5%BC%A0%E4%B8%89").unwrap();
/// let (k, v) = s.split_once('=').unwrap();
/// assert_eq!(k, "name");
/// assert_eq!(v.decode_lossy(), "张三");
///
/// assert!(EStr::new("100%").is_none());
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EStr {
    inner: str,
}

impl EStr {
    /// Converts a string slice to an `EStr` slice assuming validity.
    #[ref_cast_custom]
    pub(crate) const fn new_validated(s: &str) -> &Self;

    /// An empty `EStr` slice.
    pub const EMPTY: &'static Self = Self::new_validated("");

    /// Converts a string slice to an `EStr` slice, returning `None` if
    /// the string contains a `'%'` that does not start a well-formed octet.
    #[must_use]
    pub fn new(s: &str) -> Option<&Self> {
        match find_invalid_octet(s.as_bytes()) {
            None => Some(Self::new_validated(s)),
            Some(_) => None,
        }
    }

    /// Yields the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length of the `EStr` slice in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the `EStr` slice is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Decodes the slice to bytes.
    ///
    /// This method allocates only when the slice contains any percent-encoded octet.
    #[must_use]
    pub fn decode(&self) -> Cow<'_, [u8]> {
        decode(self.inner.as_bytes())
    }

    /// Decodes the slice to a string, replacing any invalid UTF-8 sequences with
    /// [`U+FFFD REPLACEMENT CHARACTER`][U+FFFD].
    ///
    /// [U+FFFD]: char::REPLACEMENT_CHARACTER
    #[must_use]
    pub fn decode_lossy(&self) -> Cow<'_, str> {
        decode_to_string_lossy(&self.inner)
    }

    /// Returns an iterator over subslices separated by the given delimiter.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3986::pct_enc::EStr;
    ///
    /// assert!(EStr::new("a,b,c").unwrap().split(',').eq(["a", "b", "c"]));
    /// assert!(EStr::EMPTY.split(',').eq([""]));
    /// ```
    pub fn split(&self, delim: char) -> Split<'_> {
        assert!(
            delim.is_ascii() && table::RESERVED.allows(delim as u8),
            "splitting with non-reserved character"
        );
        Split {
            inner: self.inner.split(delim),
        }
    }

    /// Splits the slice on the first occurrence of the given delimiter.
    ///
    /// Returns `None` if the delimiter is not found.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    #[must_use]
    pub fn split_once(&self, delim: char) -> Option<(&Self, &Self)> {
        assert!(
            delim.is_ascii() && table::RESERVED.allows(delim as u8),
            "splitting with non-reserved character"
        );
        self.inner
            .split_once(delim)
            .map(|(a, b)| (Self::new_validated(a), Self::new_validated(b)))
    }
}

impl AsRef<str> for EStr {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for EStr {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl PartialEq<str> for EStr {
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl PartialEq<EStr> for str {
    fn eq(&self, other: &EStr) -> bool {
        self == &other.inner
    }
}

impl Eq for EStr {}

impl hash::Hash for EStr {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl PartialOrd for EStr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EStr {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl Default for &EStr {
    /// Creates an empty `EStr` slice.
    fn default() -> Self {
        EStr::EMPTY
    }
}

/// An iterator over subslices of an [`EStr`] slice separated by a delimiter.
///
/// This struct is created by [`EStr::split`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Split<'a> {
    inner: str::Split<'a, char>,
}

impl<'a> Iterator for Split<'a> {
    type Item = &'a EStr;

    fn next(&mut self) -> Option<&'a EStr> {
        self.inner.next().map(EStr::new_validated)
    }
}

impl<'a> DoubleEndedIterator for Split<'a> {
    fn next_back(&mut self) -> Option<&'a EStr> {
        self.inner.next_back().map(EStr::new_validated)
    }
}

impl FusedIterator for Split<'_> {}
