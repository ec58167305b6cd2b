//! Module for reference resolution.

use crate::{convert::UriRepresentable, error::UriError, Uri};
use alloc::string::{String, ToString};
use borrow_or_share::Bos;
use core::fmt;

/// An error occurred when resolving a URI reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResolveError {
    /// The base has no scheme.
    BaseWithoutScheme,
    /// The reference could not be parsed.
    InvalidReference(UriError),
    /// An underflow occurred in path resolution.
    ///
    /// Used only when [`Resolver::allow_path_underflow`] is set to `false`.
    PathUnderflow,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseWithoutScheme => f.write_str("resolving against a base without scheme"),
            Self::InvalidReference(e) => write!(f, "invalid reference: {e}"),
            Self::PathUnderflow => f.write_str("underflow occurred in path resolution"),
        }
    }
}

#[cfg(feature = "impl-error")]
impl core::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidReference(e) => Some(e),
            Self::BaseWithoutScheme | Self::PathUnderflow => None,
        }
    }
}

/// A configurable URI reference resolver against a fixed base.
///
/// This implements the algorithm of
/// [Section 5.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2),
/// with two differences: the fragment of the base is never inherited, and a
/// path starting with `"//"` in an output without authority is prefixed
/// with `"/."` so that it is not read as an authority.
///
/// # Examples
///
/// ```
/// use rfc3986::{Resolver, Uri};
///
/// let base = Uri::parse("http://example.com/foo/bar")?;
/// let resolver = Resolver::with_base(base);
///
/// assert_eq!(resolver.resolve("baz").unwrap(), "http://example.com/foo/baz");
/// assert_eq!(resolver.resolve("../baz").unwrap(), "http://example.com/baz");
/// assert_eq!(resolver.resolve("?baz").unwrap(), "http://example.com/foo/bar?baz");
/// # Ok::<_, rfc3986::UriError>(())
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct Resolver {
    base: Uri<String>,
    allow_path_underflow: bool,
}

impl Resolver {
    /// Creates a new `Resolver` with the given base.
    pub fn with_base<R: UriRepresentable>(base: R) -> Self {
        Self {
            base: base.uri(),
            allow_path_underflow: true,
        }
    }

    /// Sets whether to allow underflow in path resolution.
    ///
    /// This defaults to `true`, in which case `".."` segments that climb
    /// above the root are dropped. A value of `false` is a deviation from
    /// the reference resolution algorithm of RFC 3986.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3986::{resolve::{Resolver, ResolveError}, Uri};
    ///
    /// let base = Uri::parse("http://example.com/foo/bar")?;
    /// let resolver = Resolver::with_base(base).allow_path_underflow(false);
    ///
    /// assert_eq!(resolver.resolve("../../baz").unwrap_err(), ResolveError::PathUnderflow);
    /// assert_eq!(resolver.resolve("/../baz").unwrap_err(), ResolveError::PathUnderflow);
    /// assert_eq!(resolver.resolve("../baz").unwrap(), "http://example.com/baz");
    /// # Ok::<_, rfc3986::UriError>(())
    /// ```
    pub fn allow_path_underflow(mut self, value: bool) -> Self {
        self.allow_path_underflow = value;
        self
    }

    /// Returns the base.
    #[must_use]
    pub fn base(&self) -> &Uri<String> {
        &self.base
    }

    /// Parses a reference and resolves it against the base.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the base has no scheme, if the reference does not
    /// parse, or if an underflow occurred in path resolution when
    /// [`allow_path_underflow`](Self::allow_path_underflow) is set to `false`.
    pub fn resolve(&self, reference: &str) -> Result<Uri<String>, ResolveError> {
        let reference = Uri::parse(reference).map_err(ResolveError::InvalidReference)?;
        self.resolve_uri(&reference)
    }

    /// Resolves a parsed reference against the base.
    ///
    /// A reference with a scheme is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the base has no scheme, or if an underflow occurred
    /// in path resolution when
    /// [`allow_path_underflow`](Self::allow_path_underflow) is set to `false`.
    pub fn resolve_uri<T: Bos<str>>(&self, r: &Uri<T>) -> Result<Uri<String>, ResolveError> {
        let base = &self.base;
        let Some(scheme) = base.scheme_str() else {
            return Err(ResolveError::BaseWithoutScheme);
        };

        if r.has_scheme() {
            return Ok(r.to_owned());
        }

        let mut path = String::new();
        let mut underflow = false;
        let (authority, query);

        if let Some(r_authority) = r.authority_str() {
            authority = Some(r_authority);
            underflow = remove_dot_segments_to(&mut path, r.path_str());
            query = r.query_str();
        } else {
            authority = base.authority_str();
            let r_path = r.path_str();
            if r_path.is_empty() {
                path.push_str(base.path_str());
                query = r.query_str().or(base.query_str());
            } else {
                if r_path.starts_with('/') {
                    underflow = remove_dot_segments_to(&mut path, r_path);
                } else {
                    let merged = merge(base, r_path);
                    underflow = remove_dot_segments_to(&mut path, &merged);
                }
                query = r.query_str();
            }
        }

        if underflow && !self.allow_path_underflow {
            return Err(ResolveError::PathUnderflow);
        }

        let mut buf = String::with_capacity(scheme.len() + path.len() + 1);
        buf.push_str(scheme);
        buf.push(':');
        if let Some(authority) = authority {
            buf.push_str("//");
            buf.push_str(authority);
        } else if path.starts_with("//") {
            // Keep the path from being read as an authority.
            buf.push_str("/.");
        }
        buf.push_str(&path);
        if let Some(query) = query {
            buf.push('?');
            buf.push_str(query);
        }
        if let Some(fragment) = r.fragment_str() {
            buf.push('#');
            buf.push_str(fragment);
        }
        Ok(Uri::parse_lenient(buf))
    }
}

// Section 5.2.3.
fn merge(base: &Uri<String>, r_path: &str) -> String {
    let base_path = base.path_str();
    if base.has_authority() && base_path.is_empty() {
        let mut buf = String::with_capacity(r_path.len() + 1);
        buf.push('/');
        buf.push_str(r_path);
        return buf;
    }
    match base_path.rfind('/') {
        Some(i) => {
            let mut buf = base_path[..=i].to_string();
            buf.push_str(r_path);
            buf
        }
        None => r_path.to_string(),
    }
}

/// Removes dot segments from a path, following the algorithm of
/// [Section 5.2.4 of RFC 3986].
///
/// Only the literal segments `"."` and `".."` are dot segments; decode
/// percent-encoded periods beforehand if needed. A `".."` that would climb
/// above the root is dropped.
///
/// [Section 5.2.4 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.4
///
/// # Examples
///
/// ```
/// use rfc3986::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
/// assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
/// assert_eq!(remove_dot_segments("/../a"), "/a");
/// assert_eq!(remove_dot_segments(".."), "");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    remove_dot_segments_to(&mut out, path);
    out
}

/// Removes dot segments from `input`, appending the output to `out`.
///
/// Returns `true` if a `".."` segment had nothing to remove.
pub(crate) fn remove_dot_segments_to(out: &mut String, mut input: &str) -> bool {
    let base = out.len();
    let mut underflow = false;

    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../") {
            // A
            input = rest;
        } else if let Some(rest) = input.strip_prefix("./") {
            input = rest;
        } else if input.starts_with("/./") {
            // B
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            // C
            input = &input[3..];
            underflow |= pop_segment(out, base);
        } else if input == "/.." {
            input = "/";
            underflow |= pop_segment(out, base);
        } else if input == "." || input == ".." {
            // D
            input = "";
        } else {
            // E
            let start = usize::from(input.starts_with('/'));
            let end = input[start..].find('/').map_or(input.len(), |i| start + i);
            out.push_str(&input[..end]);
            input = &input[end..];
        }
    }
    underflow
}

/// Removes the last segment and its preceding `'/'` from the output,
/// not touching anything before `base`.
///
/// Returns `true` if there was nothing to remove.
fn pop_segment(out: &mut String, base: usize) -> bool {
    if out.len() == base {
        return true;
    }
    match out[base..].rfind('/') {
        Some(i) => out.truncate(base + i),
        None => out.truncate(base),
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_segments() {
        let cases = [
            ("/a/b/c/./../../g", "/a/g", false),
            ("mid/content=5/../6", "mid/6", false),
            ("", "", false),
            (".", "", false),
            ("..", "", false),
            ("./a", "a", false),
            ("../a", "a", false),
            ("/.", "/", false),
            ("/..", "/", true),
            ("/../a", "/a", true),
            ("/a/..", "/", false),
            ("/a/../..", "/", true),
            ("/a/./b/", "/a/b/", false),
            ("/a/b/..", "/a/", false),
            ("/a//../b", "/a/b", false),
            ("/.a/..b/", "/.a/..b/", false),
            ("//a/./b", "//a/b", false),
        ];
        for (input, expected, expected_underflow) in cases {
            let mut out = String::new();
            let underflow = remove_dot_segments_to(&mut out, input);
            assert_eq!(out, expected, "{input}");
            assert_eq!(underflow, expected_underflow, "{input}");
        }
    }

    #[test]
    fn appends_after_existing_output() {
        let mut out = String::from("http://a");
        let underflow = remove_dot_segments_to(&mut out, "/../b");
        assert!(underflow);
        assert_eq!(out, "http://a/b");
    }
}
