//! Error types.
//!
//! Every component parser has its own error type. Indexes are byte offsets
//! into the text handed to that parser, not into the whole URI.

use alloc::string::String;
use core::fmt;

#[cfg(feature = "impl-error")]
use core::error::Error;

/// Writes a byte for display, escaping it when it is not printable ASCII.
struct DisplayByte(u8);

impl fmt::Display for DisplayByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() {
            write!(f, "'{}' (0x{:02X})", self.0 as char, self.0)
        } else {
            write!(f, "0x{:02X}", self.0)
        }
    }
}

/// An error occurred when parsing a [`Scheme`](crate::component::Scheme).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SchemeError {
    /// The input is empty.
    Empty,
    /// The first byte is not an ASCII letter.
    InvalidStart {
        /// The offending byte.
        byte: u8,
    },
    /// A byte other than a letter, digit, `'+'`, `'-'` or `'.'`.
    InvalidCharacter {
        /// The index of the offending byte.
        index: usize,
        /// The offending byte.
        byte: u8,
    },
}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Empty => f.write_str("scheme is empty"),
            Self::InvalidStart { byte } => write!(
                f,
                "scheme must start with a letter, found {}",
                DisplayByte(byte)
            ),
            Self::InvalidCharacter { index, byte } => write!(
                f,
                "invalid character {} at index {index} in scheme",
                DisplayByte(byte)
            ),
        }
    }
}

/// An error occurred when parsing a [`Userinfo`](crate::component::Userinfo).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UserinfoError {
    /// A byte that is not allowed in userinfo.
    InvalidCharacter {
        /// The index of the offending byte.
        index: usize,
        /// The offending byte.
        byte: u8,
    },
    /// A `'%'` not followed by two hexadecimal digits.
    InvalidPercentEncoding {
        /// The index of the `'%'`.
        index: usize,
    },
}

impl fmt::Display for UserinfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidCharacter { index, byte } => write!(
                f,
                "invalid character {} at index {index} in userinfo",
                DisplayByte(byte)
            ),
            Self::InvalidPercentEncoding { index } => write!(
                f,
                "invalid percent-encoded octet at index {index} in userinfo"
            ),
        }
    }
}

/// An error occurred when parsing a [`Host`](crate::component::Host).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HostError {
    /// The input is empty.
    Empty,
    /// Four dot-separated decimal groups that do not form a valid IPv4
    /// address, e.g. because an octet exceeds 255 or has a leading zero.
    InvalidIpv4 {
        /// The index of the first invalid group.
        index: usize,
    },
    /// A bracketed IP literal that is not a valid IPv6 address
    /// with an optional zone identifier.
    InvalidIpv6 {
        /// The index of the invalid address or zone identifier,
        /// or of the `'['` if the closing bracket is missing.
        index: usize,
    },
    /// A `'%'` not followed by two hexadecimal digits in a registered name.
    InvalidRegisteredName {
        /// The index of the `'%'`.
        index: usize,
    },
    /// A byte that is not allowed in a registered name.
    InvalidCharacter {
        /// The index of the offending byte.
        index: usize,
        /// The offending byte.
        byte: u8,
    },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Empty => f.write_str("host is empty"),
            Self::InvalidIpv4 { index } => {
                write!(f, "invalid IPv4 address octet at index {index}")
            }
            Self::InvalidIpv6 { index } => {
                write!(f, "invalid IPv6 address at index {index} in IP literal")
            }
            Self::InvalidRegisteredName { index } => write!(
                f,
                "invalid percent-encoded octet at index {index} in registered name"
            ),
            Self::InvalidCharacter { index, byte } => write!(
                f,
                "invalid character {} at index {index} in host",
                DisplayByte(byte)
            ),
        }
    }
}

/// An error occurred when parsing a [`Port`](crate::component::Port).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PortError {
    /// The input is empty.
    Empty,
    /// A byte that is not an ASCII digit.
    InvalidCharacter {
        /// The index of the offending byte.
        index: usize,
        /// The offending byte.
        byte: u8,
    },
    /// The value exceeds 65535.
    Overflow,
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Empty => f.write_str("port is empty"),
            Self::InvalidCharacter { index, byte } => write!(
                f,
                "invalid character {} at index {index} in port",
                DisplayByte(byte)
            ),
            Self::Overflow => f.write_str("port exceeds 65535"),
        }
    }
}

/// An error occurred when parsing a [`Path`](crate::component::Path).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathError {
    /// A byte that is not allowed in a path, including `'\r'` and `'\n'`.
    InvalidCharacter {
        /// The index of the offending byte.
        index: usize,
        /// The offending byte.
        byte: u8,
    },
    /// A `'%'` not followed by two hexadecimal digits.
    InvalidPercentEncoding {
        /// The index of the `'%'`.
        index: usize,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidCharacter { index, byte } => write!(
                f,
                "invalid character {} at index {index} in path",
                DisplayByte(byte)
            ),
            Self::InvalidPercentEncoding { index } => {
                write!(f, "invalid percent-encoded octet at index {index} in path")
            }
        }
    }
}

/// An error occurred when parsing a [`Query`](crate::component::Query).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryError {
    /// A byte that is not allowed in a query, including `'\r'`, `'\n'` and `'#'`.
    InvalidCharacter {
        /// The index of the offending byte.
        index: usize,
        /// The offending byte.
        byte: u8,
    },
    /// A `'%'` not followed by two hexadecimal digits.
    InvalidPercentEncoding {
        /// The index of the `'%'`.
        index: usize,
    },
    /// A `'&'`-separated field with an empty key.
    EmptyKey {
        /// The index where the field starts.
        index: usize,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidCharacter { index, byte } => write!(
                f,
                "invalid character {} at index {index} in query",
                DisplayByte(byte)
            ),
            Self::InvalidPercentEncoding { index } => {
                write!(f, "invalid percent-encoded octet at index {index} in query")
            }
            Self::EmptyKey { index } => write!(f, "empty key at index {index} in query"),
        }
    }
}

/// An error occurred when parsing a [`Fragment`](crate::component::Fragment).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FragmentError {
    /// The input contains `'#'`.
    ContainsHash {
        /// The index of the `'#'`.
        index: usize,
    },
    /// The input contains `'\r'` or `'\n'`.
    ContainsNewline {
        /// The index of the line break.
        index: usize,
    },
}

impl fmt::Display for FragmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ContainsHash { index } => write!(f, "fragment contains '#' at index {index}"),
            Self::ContainsNewline { index } => {
                write!(f, "fragment contains a line break at index {index}")
            }
        }
    }
}

/// An error occurred when parsing an [`Authority`](crate::component::Authority).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AuthorityError {
    /// The userinfo subcomponent is invalid.
    InvalidUserinfo(UserinfoError),
    /// The host subcomponent is invalid.
    InvalidHost(String, HostError),
    /// The port subcomponent is invalid.
    InvalidPort(String, PortError),
    /// A `'['` without a matching `']'`.
    UnterminatedIpv6,
    /// Something other than `":" port` follows the closing `']'`.
    InvalidCharactersAfterIpv6 {
        /// The index of the first byte after `']'`.
        index: usize,
    },
}

impl fmt::Display for AuthorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUserinfo(e) => write!(f, "invalid userinfo: {e}"),
            Self::InvalidHost(host, e) => write!(f, "invalid host {host:?}: {e}"),
            Self::InvalidPort(port, e) => write!(f, "invalid port {port:?}: {e}"),
            Self::UnterminatedIpv6 => f.write_str("IP literal is missing the closing ']'"),
            Self::InvalidCharactersAfterIpv6 { index } => write!(
                f,
                "unexpected characters at index {index} after IP literal"
            ),
        }
    }
}

/// An error occurred when parsing one of the components of a [`Uri`](crate::Uri).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ComponentError {
    /// The scheme is invalid.
    Scheme(SchemeError),
    /// The authority is invalid.
    Authority(AuthorityError),
    /// The path is invalid.
    Path(PathError),
    /// The query is invalid.
    Query(QueryError),
    /// The fragment is invalid.
    Fragment(FragmentError),
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheme(e) => fmt::Display::fmt(e, f),
            Self::Authority(e) => fmt::Display::fmt(e, f),
            Self::Path(e) => fmt::Display::fmt(e, f),
            Self::Query(e) => fmt::Display::fmt(e, f),
            Self::Fragment(e) => fmt::Display::fmt(e, f),
        }
    }
}

macro_rules! impl_from_for_component_error {
    ($($variant:ident($err:ty)),*) => {
        $(
            impl From<$err> for ComponentError {
                fn from(value: $err) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_for_component_error! {
    Scheme(SchemeError),
    Authority(AuthorityError),
    Path(PathError),
    Query(QueryError),
    Fragment(FragmentError)
}

/// An error occurred when creating a [`Uri`](crate::Uri).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UriError {
    /// The text as a whole is rejected: it contains a byte that may never
    /// appear unencoded in a URI, such as a non-ASCII byte, a control
    /// character, a space, a backtick, or one of `<>{}|\^"`.
    InvalidUri {
        /// The index of the offending byte.
        index: usize,
        /// The offending byte.
        byte: u8,
    },
    /// One of the components is invalid.
    InvalidComponent(ComponentError),
    /// The text assembled from components does not parse back into
    /// the same components.
    ConversionFailed {
        /// The assembled text.
        text: String,
    },
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUri { index, byte } => write!(
                f,
                "invalid URI: character {} at index {index} is not allowed",
                DisplayByte(*byte)
            ),
            Self::InvalidComponent(e) => write!(f, "invalid URI component: {e}"),
            Self::ConversionFailed { text } => {
                write!(f, "components do not assemble into a consistent URI: {text:?}")
            }
        }
    }
}

impl From<ComponentError> for UriError {
    fn from(value: ComponentError) -> Self {
        Self::InvalidComponent(value)
    }
}

#[cfg(feature = "impl-error")]
impl Error for SchemeError {}

#[cfg(feature = "impl-error")]
impl Error for UserinfoError {}

#[cfg(feature = "impl-error")]
impl Error for HostError {}

#[cfg(feature = "impl-error")]
impl Error for PortError {}

#[cfg(feature = "impl-error")]
impl Error for PathError {}

#[cfg(feature = "impl-error")]
impl Error for QueryError {}

#[cfg(feature = "impl-error")]
impl Error for FragmentError {}

#[cfg(feature = "impl-error")]
impl Error for AuthorityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidUserinfo(e) => Some(e),
            Self::InvalidHost(_, e) => Some(e),
            Self::InvalidPort(_, e) => Some(e),
            Self::UnterminatedIpv6 | Self::InvalidCharactersAfterIpv6 { .. } => None,
        }
    }
}

#[cfg(feature = "impl-error")]
impl Error for ComponentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Scheme(e) => Some(e),
            Self::Authority(e) => Some(e),
            Self::Path(e) => Some(e),
            Self::Query(e) => Some(e),
            Self::Fragment(e) => Some(e),
        }
    }
}

#[cfg(feature = "impl-error")]
impl Error for UriError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidComponent(e) => Some(e),
            Self::InvalidUri { .. } | Self::ConversionFailed { .. } => None,
        }
    }
}
