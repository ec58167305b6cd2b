//! Module for normalization.

use crate::{
    component::{Host, Scheme},
    convert::UriRepresentable,
    pct_enc, resolve, Uri,
};
use alloc::string::String;
use borrow_or_share::Bos;
use core::fmt::{self, Write};

/// An error occurred when normalizing a URI reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NormalizeError {
    /// An underflow occurred in path normalization.
    ///
    /// Used only when [`Normalizer::allow_path_underflow`] is set to `false`.
    PathUnderflow,
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::PathUnderflow => "underflow occurred in path normalization",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "impl-error")]
impl core::error::Error for NormalizeError {}

/// A configurable URI reference normalizer.
///
/// See [`Uri::normalize`] for what normalization does.
#[derive(Clone, Copy)]
#[allow(missing_debug_implementations)]
#[must_use]
pub struct Normalizer {
    allow_path_underflow: bool,
    default_port_f: fn(&Scheme) -> Option<u16>,
}

impl Normalizer {
    /// Creates a new `Normalizer` with default configuration.
    pub fn new() -> Self {
        Self {
            allow_path_underflow: true,
            default_port_f: Scheme::default_port,
        }
    }

    /// Sets whether to allow underflow in path normalization.
    ///
    /// This defaults to `true`. A value of `false` is a deviation from the
    /// normalization methods described in
    /// [Section 6 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-6).
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3986::{normalize::{Normalizer, NormalizeError}, Uri};
    ///
    /// let normalizer = Normalizer::new().allow_path_underflow(false);
    /// let uri = Uri::parse("http://example.com/..")?;
    ///
    /// assert_eq!(normalizer.normalize(&uri).unwrap_err(), NormalizeError::PathUnderflow);
    /// # Ok::<_, rfc3986::UriError>(())
    /// ```
    pub fn allow_path_underflow(mut self, value: bool) -> Self {
        self.allow_path_underflow = value;
        self
    }

    /// Sets the function with which to get the default port of a scheme.
    ///
    /// This defaults to [`Scheme::default_port`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3986::{component::Scheme, normalize::Normalizer, Uri};
    ///
    /// let normalizer = Normalizer::new().default_port_with(|scheme| {
    ///     if scheme.as_str() == "foo" {
    ///         Some(4673)
    ///     } else {
    ///         scheme.default_port()
    ///     }
    /// });
    /// let uri = Uri::parse("foo://localhost:4673")?;
    ///
    /// assert_eq!(normalizer.normalize(&uri).unwrap(), "foo://localhost");
    /// # Ok::<_, rfc3986::UriError>(())
    /// ```
    pub fn default_port_with(mut self, f: fn(&Scheme) -> Option<u16>) -> Self {
        self.default_port_f = f;
        self
    }

    /// Normalizes the given URI reference.
    ///
    /// See [`Uri::normalize`] for the exact behavior of this method.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an underflow occurred in path normalization
    /// when [`allow_path_underflow`] is set to `false`.
    ///
    /// [`allow_path_underflow`]: Self::allow_path_underflow
    pub fn normalize<T: Bos<str>>(&self, uri: &Uri<T>) -> Result<Uri<String>, NormalizeError> {
        let (buf, underflow) = self.normalize_to_string(uri);
        if underflow && !self.allow_path_underflow {
            return Err(NormalizeError::PathUnderflow);
        }
        Ok(Uri::parse_lenient(buf))
    }

    /// Normalizes anything that can be represented as a URI.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the same conditions as [`normalize`](Self::normalize).
    pub fn normalize_any<R: UriRepresentable>(&self, r: &R) -> Result<Uri<String>, NormalizeError> {
        self.normalize(&r.uri())
    }

    /// Normalizes a URI reference, dropping any `".."` segment that
    /// would climb above the root.
    pub(crate) fn normalize_lossy<T: Bos<str>>(&self, uri: &Uri<T>) -> Uri<String> {
        Uri::parse_lenient(self.normalize_to_string(uri).0)
    }

    fn normalize_to_string<T: Bos<str>>(&self, uri: &Uri<T>) -> (String, bool) {
        let mut buf = String::with_capacity(uri.as_str().len());

        let scheme = uri.scheme();
        if let Some(raw) = uri.scheme_str() {
            match scheme {
                Some(scheme) => buf.push_str(scheme.as_str()),
                None => buf.push_str(&raw.to_ascii_lowercase()),
            }
            buf.push(':');
        }

        if let Some(raw) = uri.authority_str() {
            buf.push_str("//");
            match uri.authority() {
                Some(auth) => {
                    if let Some(userinfo) = auth.userinfo() {
                        pct_enc::normalize_to(&mut buf, userinfo.as_str(), false);
                        buf.push('@');
                    }
                    write_host(&mut buf, auth.host());
                    if let Some(port) = auth.port() {
                        let default = scheme.and_then(self.default_port_f);
                        if default != Some(port.value()) {
                            write!(buf, ":{}", port.value()).unwrap();
                        }
                    }
                }
                None => pct_enc::normalize_to(&mut buf, raw, false),
            }
        }

        let path_start = buf.len();
        pct_enc::normalize_to(&mut buf, uri.path_str(), false);
        let mut underflow = false;
        if uri.has_scheme() {
            let path = String::from(&buf[path_start..]);
            buf.truncate(path_start);
            underflow = resolve::remove_dot_segments_to(&mut buf, &path);

            // Popping the first segment of a rootless path leaves a '/' in front.
            if !path.starts_with('/')
                && buf[path_start..].starts_with('/')
                && !buf[path_start + 1..].starts_with('/')
            {
                buf.remove(path_start);
            }
        }
        if !uri.has_authority() && buf[path_start..].starts_with("//") {
            buf.insert_str(path_start, "/.");
        }

        if let Some(query) = uri.query_str() {
            buf.push('?');
            pct_enc::normalize_to(&mut buf, query, false);
        }
        if let Some(fragment) = uri.fragment_str() {
            buf.push('#');
            pct_enc::normalize_to(&mut buf, fragment, false);
        }

        (buf, underflow)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn write_host(buf: &mut String, host: &Host) {
    match host {
        Host::Ipv4(addr) => write!(buf, "{addr}").unwrap(),
        Host::Ipv6 { addr, zone_id } => {
            write!(buf, "[{addr}").unwrap();
            if let Some(zone_id) = zone_id {
                buf.push_str("%25");
                pct_enc::normalize_to(buf, zone_id, false);
            }
            buf.push(']');
        }
        Host::RegisteredName(name) => pct_enc::normalize_to(buf, name, true),
    }
}
