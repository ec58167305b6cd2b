use crate::error::PortError;

/// A [port] subcomponent of an authority.
///
/// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
///
/// # Examples
///
/// ```
/// use rfc3986::{component::Port, error::PortError};
///
/// assert_eq!(Port::parse("8080")?.value(), 8080);
/// assert_eq!(Port::parse("65536"), Err(PortError::Overflow));
/// # Ok::<_, PortError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Port(u16);

impl Port {
    /// Creates a `Port` with the given value.
    #[inline]
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Parses a port from a string of decimal digits.
    ///
    /// Leading zeros are accepted.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is empty, contains a non-digit byte,
    /// or denotes a value greater than 65535.
    pub fn parse(s: &str) -> Result<Self, PortError> {
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        let mut acc: u32 = 0;
        for (index, &byte) in s.as_bytes().iter().enumerate() {
            if !byte.is_ascii_digit() {
                return Err(PortError::InvalidCharacter { index, byte });
            }
            acc = acc * 10 + u32::from(byte - b'0');
            if acc > u32::from(u16::MAX) {
                return Err(PortError::Overflow);
            }
        }
        // Bounded by the check above.
        Ok(Self(acc as u16))
    }

    /// Returns the port number.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl From<u16> for Port {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}
