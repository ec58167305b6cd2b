use super::{Host, Port, Userinfo};
use crate::error::AuthorityError;
use alloc::string::String;

/// An [authority] component.
///
/// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
///
/// # Examples
///
/// ```
/// use rfc3986::component::{Authority, Host, Port};
///
/// let auth = Authority::parse("user@[::1]:8080")?;
/// assert_eq!(auth.userinfo().unwrap().as_str(), "user");
/// assert!(auth.host().is_ip_literal());
/// assert_eq!(auth.port(), Some(Port::new(8080)));
/// assert_eq!(auth.to_string(), "user@[::1]:8080");
///
/// // An empty port is treated as absent.
/// let auth = Authority::parse("example.com:")?;
/// assert_eq!(auth.port(), None);
/// assert_eq!(auth.to_string(), "example.com");
/// # Ok::<_, rfc3986::error::AuthorityError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Authority {
    userinfo: Option<Userinfo>,
    host: Host,
    port: Option<Port>,
}

impl Authority {
    /// Creates an authority from its subcomponents.
    #[must_use]
    pub fn new(userinfo: Option<Userinfo>, host: Host, port: Option<Port>) -> Self {
        Self {
            userinfo,
            host,
            port,
        }
    }

    /// Parses an authority of the form `[userinfo "@"] host [":" port]`.
    ///
    /// The first `'@'` ends the userinfo. An IP literal ends at the first
    /// `']'`; any other host ends at the last `':'`. An empty host is
    /// accepted as an empty registered name.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a subcomponent is invalid, if an IP literal is not
    /// closed, or if anything but a port follows an IP literal.
    pub fn parse(s: &str) -> Result<Self, AuthorityError> {
        let (userinfo, rest, rest_start) = match s.split_once('@') {
            Some((userinfo, rest)) => {
                let userinfo = Userinfo::parse(userinfo).map_err(AuthorityError::InvalidUserinfo)?;
                (Some(userinfo), rest, s.len() - rest.len())
            }
            None => (None, s, 0),
        };

        let (host, port) = if rest.starts_with('[') {
            let close = rest.find(']').ok_or(AuthorityError::UnterminatedIpv6)?;
            let (host, after) = rest.split_at(close + 1);
            if after.is_empty() {
                (host, None)
            } else if let Some(port) = after.strip_prefix(':') {
                (host, Some(port))
            } else {
                return Err(AuthorityError::InvalidCharactersAfterIpv6 {
                    index: rest_start + close + 1,
                });
            }
        } else {
            match rest.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (rest, None),
            }
        };

        let host = if host.is_empty() {
            Host::EMPTY
        } else {
            Host::parse(host).map_err(|e| AuthorityError::InvalidHost(String::from(host), e))?
        };

        let port = match port {
            Some("") | None => None,
            Some(port) => Some(
                Port::parse(port).map_err(|e| AuthorityError::InvalidPort(String::from(port), e))?,
            ),
        };

        Ok(Self {
            userinfo,
            host,
            port,
        })
    }

    /// Returns the userinfo subcomponent.
    #[must_use]
    pub fn userinfo(&self) -> Option<&Userinfo> {
        self.userinfo.as_ref()
    }

    /// Returns the host subcomponent.
    #[must_use]
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the port subcomponent.
    #[must_use]
    pub fn port(&self) -> Option<Port> {
        self.port
    }

    /// Returns a new authority with the port replaced.
    #[must_use]
    pub fn with_port(&self, port: Option<Port>) -> Self {
        Self {
            userinfo: self.userinfo.clone(),
            host: self.host.clone(),
            port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{HostError, PortError, UserinfoError};
    use alloc::string::ToString;
    use core::net::Ipv4Addr;

    #[test]
    fn split() {
        let auth = Authority::parse("a:b@c@d").unwrap_err();
        assert_eq!(
            auth,
            AuthorityError::InvalidHost(
                "c@d".into(),
                HostError::InvalidCharacter {
                    index: 1,
                    byte: b'@'
                }
            )
        );

        let auth = Authority::parse("127.0.0.1:80").unwrap();
        assert_eq!(auth.host(), &Host::Ipv4(Ipv4Addr::LOCALHOST));
        assert_eq!(auth.port(), Some(Port::new(80)));

        let auth = Authority::parse("").unwrap();
        assert!(auth.host().is_empty());
        assert_eq!(auth.to_string(), "");

        let auth = Authority::parse("@:").unwrap();
        assert_eq!(auth.userinfo().unwrap().as_str(), "");
        assert_eq!(auth.to_string(), "@");
    }

    #[test]
    fn ip_literal() {
        assert_eq!(
            Authority::parse("[::1"),
            Err(AuthorityError::UnterminatedIpv6)
        );
        assert_eq!(
            Authority::parse("u@[::1]x"),
            Err(AuthorityError::InvalidCharactersAfterIpv6 { index: 7 })
        );
        assert_eq!(
            Authority::parse("[::1]:99999"),
            Err(AuthorityError::InvalidPort("99999".into(), PortError::Overflow))
        );
        assert_eq!(
            Authority::parse("[::g]"),
            Err(AuthorityError::InvalidHost("[::g]".into(), HostError::InvalidIpv6 { index: 1 }))
        );
    }

    #[test]
    fn invalid_userinfo() {
        assert_eq!(
            Authority::parse("a b@host"),
            Err(AuthorityError::InvalidUserinfo(
                UserinfoError::InvalidCharacter {
                    index: 1,
                    byte: b' '
                }
            ))
        );
    }
}
