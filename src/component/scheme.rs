use crate::{error::SchemeError, pct_enc::table};
use alloc::borrow::Cow;

#[cfg(feature = "serde")]
use alloc::string::String;
#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A [scheme] component.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
///
/// A `Scheme` is always stored in lowercase, so comparison is
/// effectively case-insensitive with respect to the parsed input.
///
/// # Examples
///
/// ```
/// use rfc3986::component::Scheme;
///
/// let scheme = Scheme::parse("HTTP")?;
/// assert_eq!(scheme, Scheme::HTTP);
/// assert_eq!(scheme.as_str(), "http");
/// assert_eq!(scheme.default_port(), Some(80));
/// # Ok::<_, rfc3986::error::SchemeError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scheme {
    inner: Cow<'static, str>,
}

macro_rules! well_known {
    ($($(#[$attr:meta])* $name:ident = $s:literal => $port:expr;)*) => {
        impl Scheme {
            $(
                $(#[$attr])*
                pub const $name: Scheme = Scheme::new_unchecked($s);
            )*

            /// Returns the well-known default port of the scheme, if any.
            ///
            /// # Examples
            ///
            /// ```
            /// use rfc3986::component::Scheme;
            ///
            /// assert_eq!(Scheme::HTTPS.default_port(), Some(443));
            /// assert_eq!(Scheme::parse("postgresql")?.default_port(), Some(5432));
            /// assert_eq!(Scheme::parse("urn")?.default_port(), None);
            /// # Ok::<_, rfc3986::error::SchemeError>(())
            /// ```
            #[must_use]
            pub fn default_port(&self) -> Option<u16> {
                match &*self.inner {
                    $($s => $port,)*
                    _ => None,
                }
            }
        }
    };
}

well_known! {
    /// `http`
    HTTP = "http" => Some(80);
    /// `https`
    HTTPS = "https" => Some(443);
    /// `ftp`
    FTP = "ftp" => Some(21);
    /// `ftps`
    FTPS = "ftps" => Some(990);
    /// `ssh`
    SSH = "ssh" => Some(22);
    /// `telnet`
    TELNET = "telnet" => Some(23);
    /// `smtp`
    SMTP = "smtp" => Some(25);
    /// `dns`
    DNS = "dns" => Some(53);
    /// `dhcp-server`
    DHCP_SERVER = "dhcp-server" => Some(67);
    /// `dhcp-client`
    DHCP_CLIENT = "dhcp-client" => Some(68);
    /// `pop3`
    POP3 = "pop3" => Some(110);
    /// `imap`
    IMAP = "imap" => Some(143);
    /// `snmp`
    SNMP = "snmp" => Some(161);
    /// `ldap`
    LDAP = "ldap" => Some(389);
    /// `ldaps`
    LDAPS = "ldaps" => Some(636);
    /// `mysql`
    MYSQL = "mysql" => Some(3306);
    /// `postgresql`
    POSTGRESQL = "postgresql" => Some(5432);
    /// `redis`
    REDIS = "redis" => Some(6379);
    /// `mongodb`
    MONGODB = "mongodb" => Some(27017);
    /// `file`
    FILE = "file" => None;
    /// `mailto`
    MAILTO = "mailto" => None;
    /// `urn`
    URN = "urn" => None;
}

impl Scheme {
    /// Creates a `Scheme` from a lowercase string assumed to be valid.
    pub(crate) const fn new_unchecked(s: &'static str) -> Self {
        Self {
            inner: Cow::Borrowed(s),
        }
    }

    /// Parses a scheme, converting it to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is empty, does not start with an ASCII
    /// letter, or contains a byte other than a letter, digit, `'+'`, `'-'` or `'.'`.
    pub fn parse(s: &str) -> Result<Self, SchemeError> {
        let bytes = s.as_bytes();
        let Some(&first) = bytes.first() else {
            return Err(SchemeError::Empty);
        };
        if !first.is_ascii_alphabetic() {
            return Err(SchemeError::InvalidStart { byte: first });
        }
        if let Some(index) = bytes.iter().position(|&x| !table::SCHEME.allows(x)) {
            return Err(SchemeError::InvalidCharacter {
                index,
                byte: bytes[index],
            });
        }

        Ok(Self {
            inner: Cow::Owned(s.to_ascii_lowercase()),
        })
    }

    /// Returns the scheme as a lowercase string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for Scheme {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl core::str::FromStr for Scheme {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Scheme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Scheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Scheme::parse(&s).map_err(de::Error::custom)
    }
}
