use super::{scan, Violation};
use crate::{
    error::UserinfoError,
    pct_enc::{table, EStr},
};
use alloc::string::String;

/// A [userinfo] subcomponent of an authority.
///
/// [userinfo]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.1
///
/// # Examples
///
/// ```
/// use rfc3986::component::Userinfo;
///
/// let userinfo = Userinfo::parse("alice:s%3Dcret")?;
/// assert_eq!(userinfo.user(), "alice");
/// assert_eq!(userinfo.password().unwrap().decode_lossy(), "s=cret");
/// # Ok::<_, rfc3986::error::UserinfoError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Userinfo {
    inner: String,
}

impl Userinfo {
    pub(crate) fn new_unchecked(s: String) -> Self {
        Self { inner: s }
    }

    /// Parses a userinfo subcomponent.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string contains a byte not allowed in userinfo
    /// or a malformed percent-encoded octet.
    pub fn parse(s: &str) -> Result<Self, UserinfoError> {
        scan(s.as_bytes(), table::USERINFO).map_err(|v| match v {
            Violation::Char { index, byte } => UserinfoError::InvalidCharacter { index, byte },
            Violation::PctEncoding { index } => UserinfoError::InvalidPercentEncoding { index },
        })?;
        Ok(Self::new_unchecked(s.into()))
    }

    /// Returns the userinfo as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the part before the first `':'`, or the whole userinfo.
    #[must_use]
    pub fn user(&self) -> &EStr {
        let user = match self.inner.split_once(':') {
            Some((user, _)) => user,
            None => &self.inner,
        };
        EStr::new_validated(user)
    }

    /// Returns the part after the first `':'`, if any.
    ///
    /// Note that RFC 3986 deprecates passing a password in the userinfo.
    #[must_use]
    pub fn password(&self) -> Option<&EStr> {
        self.inner
            .split_once(':')
            .map(|(_, password)| EStr::new_validated(password))
    }
}
