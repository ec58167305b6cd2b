use super::{scan, Violation};
use crate::{
    error::PathError,
    pct_enc::{self, table, EStr},
    resolve,
};
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::{iter::FusedIterator, slice};

/// A [path] component.
///
/// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
///
/// A path is a list of segments, each free of unencoded `'/'`, plus a flag
/// for whether it starts with `'/'`. The empty path has no segments, while
/// the path `"/"` has a single empty segment.
///
/// # Examples
///
/// ```
/// use rfc3986::component::Path;
///
/// let path = Path::parse("/foo/bar%2Fbaz/")?;
/// assert!(path.is_absolute());
/// assert!(path.segments().eq(["foo", "bar%2Fbaz", ""]));
/// assert_eq!(path.to_string(), "/foo/bar%2Fbaz/");
///
/// let path = path.appending("a b");
/// assert_eq!(path.to_string(), "/foo/bar%2Fbaz/a%20b");
/// # Ok::<_, rfc3986::error::PathError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Path {
    segments: Vec<String>,
    absolute: bool,
}

fn map_violation(v: Violation) -> PathError {
    match v {
        Violation::Char { index, byte } => PathError::InvalidCharacter { index, byte },
        Violation::PctEncoding { index } => PathError::InvalidPercentEncoding { index },
    }
}

impl Path {
    /// Parses a path.
    ///
    /// The string is validated as a whole before it is split on `'/'`,
    /// so an encoded `"%2F"` never separates segments.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string contains a byte not allowed in a path,
    /// such as `'\r'`, `'\n'`, `'?'` or `'#'`, or a malformed
    /// percent-encoded octet.
    pub fn parse(s: &str) -> Result<Self, PathError> {
        scan(s.as_bytes(), table::PATH).map_err(map_violation)?;
        Ok(Self::new_unchecked(s))
    }

    /// Splits a path assumed to be valid.
    pub(crate) fn new_unchecked(s: &str) -> Self {
        if s.is_empty() {
            return Self::default();
        }
        let (absolute, body) = match s.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, s),
        };
        Self {
            segments: body.split('/').map(String::from).collect(),
            absolute,
        }
    }

    /// Creates a path from percent-encoded segments.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a segment contains a byte not allowed in a segment,
    /// including `'/'`, or a malformed percent-encoded octet. The index in
    /// the error is relative to the assembled path.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3986::component::Path;
    ///
    /// let path = Path::from_segments(["a", "b%20c"], true)?;
    /// assert_eq!(path.to_string(), "/a/b%20c");
    /// assert!(Path::from_segments(["a/b"], false).is_err());
    /// # Ok::<_, rfc3986::error::PathError>(())
    /// ```
    pub fn from_segments<I, S>(segments: I, absolute: bool) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut offset = usize::from(absolute);
        let mut out = Vec::new();
        for segment in segments {
            let segment = segment.as_ref();
            scan(segment.as_bytes(), table::PCHAR).map_err(|v| {
                map_violation(match v {
                    Violation::Char { index, byte } => Violation::Char {
                        index: offset + index,
                        byte,
                    },
                    Violation::PctEncoding { index } => Violation::PctEncoding {
                        index: offset + index,
                    },
                })
            })?;
            offset += segment.len() + 1;
            out.push(String::from(segment));
        }
        Ok(Self {
            segments: out,
            absolute,
        })
    }

    /// Returns an iterator over the percent-encoded segments.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            inner: self.segments.iter(),
        }
    }

    /// Checks whether the path starts with `'/'`.
    #[inline]
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Checks whether the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.absolute && self.segments.iter().all(String::is_empty) && self.segments.len() < 2
    }

    /// Returns a new path with a segment appended.
    ///
    /// The segment is taken unencoded and is percent-encoded so that it
    /// forms exactly one segment. If the path ends with `'/'`, the segment
    /// takes the place of the trailing empty segment.
    #[must_use]
    pub fn appending(&self, segment: &str) -> Self {
        let encoded = pct_enc::encode(segment.as_bytes(), table::PCHAR);
        let mut segments = self.segments.clone();
        match segments.last_mut() {
            Some(last) if last.is_empty() => *last = encoded,
            _ => segments.push(encoded),
        }
        Self {
            segments,
            absolute: self.absolute,
        }
    }

    /// Returns a new path with dot segments removed.
    ///
    /// See [`remove_dot_segments`](crate::remove_dot_segments).
    #[must_use]
    pub fn removing_dot_segments(&self) -> Self {
        Self::new_unchecked(&resolve::remove_dot_segments(&self.to_string()))
    }
}

/// An iterator over the segments of a [`Path`].
///
/// This struct is created by [`Path::segments`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Segments<'a> {
    inner: slice::Iter<'a, String>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a EStr;

    fn next(&mut self) -> Option<&'a EStr> {
        self.inner.next().map(|s| EStr::new_validated(s))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Segments<'a> {
    fn next_back(&mut self) -> Option<&'a EStr> {
        self.inner.next_back().map(|s| EStr::new_validated(s))
    }
}

impl ExactSizeIterator for Segments<'_> {}

impl FusedIterator for Segments<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_and_join() {
        for s in ["", "/", "a", "a/", "/a/b", "//a", "a//b/", "/./../"] {
            let path = Path::parse(s).unwrap();
            assert_eq!(path.to_string(), s);
        }
        assert_eq!(Path::parse("").unwrap().segments().len(), 0);
        assert!(Path::parse("/").unwrap().segments().eq([""]));
        assert!(Path::parse("").unwrap().is_empty());
        assert!(!Path::parse("/").unwrap().is_empty());
    }

    #[test]
    fn invalid() {
        assert_eq!(
            Path::parse("/a b"),
            Err(PathError::InvalidCharacter {
                index: 2,
                byte: b' '
            })
        );
        assert_eq!(
            Path::parse("/a?b"),
            Err(PathError::InvalidCharacter {
                index: 2,
                byte: b'?'
            })
        );
        assert_eq!(
            Path::parse("/a%2"),
            Err(PathError::InvalidPercentEncoding { index: 2 })
        );
        assert_eq!(
            Path::from_segments(["ok", "a/b"], true),
            Err(PathError::InvalidCharacter {
                index: 5,
                byte: b'/'
            })
        );
    }

    #[test]
    fn appending() {
        let root = Path::parse("/").unwrap();
        assert_eq!(root.appending("a").to_string(), "/a");
        let dir = Path::parse("/a/").unwrap();
        assert_eq!(dir.appending("b/c").to_string(), "/a/b%2Fc");
        let file = Path::parse("/a/b").unwrap();
        assert_eq!(file.appending("c").to_string(), "/a/b/c");
        assert_eq!(Path::default().appending("x").to_string(), "x");
    }

    #[test]
    fn dot_segments() {
        let path = Path::parse("/a/b/c/./../../g").unwrap();
        assert_eq!(path.removing_dot_segments().to_string(), "/a/g");
    }
}
