use crate::{error::FragmentError, pct_enc};
use alloc::{borrow::Cow, string::String};

/// A [fragment] component.
///
/// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
///
/// Parsing is lenient: only `'#'` and line breaks are rejected.
///
/// # Examples
///
/// ```
/// use rfc3986::component::Fragment;
///
/// let fragment = Fragment::parse("section%202")?;
/// assert_eq!(fragment.as_str(), "section%202");
/// assert_eq!(fragment.decode(), "section 2");
/// assert!(Fragment::parse("a#b").is_err());
/// # Ok::<_, rfc3986::error::FragmentError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Fragment {
    inner: String,
}

impl Fragment {
    /// Parses a fragment.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string contains `'#'`, `'\r'` or `'\n'`.
    pub fn parse(s: &str) -> Result<Self, FragmentError> {
        for (index, &x) in s.as_bytes().iter().enumerate() {
            match x {
                b'#' => return Err(FragmentError::ContainsHash { index }),
                b'\r' | b'\n' => return Err(FragmentError::ContainsNewline { index }),
                _ => {}
            }
        }
        Ok(Self { inner: s.into() })
    }

    /// Returns the fragment as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Decodes the fragment to a string, passing malformed octets through
    /// and replacing invalid UTF-8 with `U+FFFD`.
    #[must_use]
    pub fn decode(&self) -> Cow<'_, str> {
        pct_enc::decode_to_string_lossy(&self.inner)
    }
}
