//! Splitting of a URI reference into its five groups.

use crate::{error::UriError, pct_enc::table::URI_CHAR};
use core::num::NonZeroUsize;

/// Bounds of the groups of a URI reference.
///
/// All indexes are byte offsets into the text, excluding delimiters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Meta {
    // The index of the colon after the scheme.
    pub scheme_end: Option<NonZeroUsize>,
    pub auth_bounds: Option<(usize, usize)>,
    pub path_bounds: (usize, usize),
    pub query_bounds: Option<(usize, usize)>,
    // One byte past the '#'.
    pub fragment_start: Option<usize>,
}

/// Splits a URI reference the way the regular expression of
/// [RFC 3986 Appendix B] does.
///
/// The fragment starts after the first `'#'`, the query after the first
/// `'?'` before it. A scheme is the non-empty text before a `':'` that
/// precedes any `'/'`, `'?'` or `'#'`. An authority follows a `"//"` and
/// runs up to the next `'/'`.
///
/// [RFC 3986 Appendix B]: https://datatracker.ietf.org/doc/html/rfc3986#appendix-B
pub(crate) fn split(s: &str) -> Meta {
    let bytes = s.as_bytes();
    let mut meta = Meta::default();

    let end = match bytes.iter().position(|&x| x == b'#') {
        Some(i) => {
            meta.fragment_start = Some(i + 1);
            i
        }
        None => bytes.len(),
    };

    let pre_query_end = match bytes[..end].iter().position(|&x| x == b'?') {
        Some(i) => {
            meta.query_bounds = Some((i + 1, end));
            i
        }
        None => end,
    };

    let mut pos = 0;
    if let Some(i) = bytes[..pre_query_end]
        .iter()
        .position(|&x| x == b':' || x == b'/')
    {
        if bytes[i] == b':' {
            if let Some(scheme_end) = NonZeroUsize::new(i) {
                meta.scheme_end = Some(scheme_end);
                pos = i + 1;
            }
        }
    }

    let rest = &bytes[pos..pre_query_end];
    if rest.starts_with(b"//") {
        let start = pos + 2;
        let auth_end = bytes[start..pre_query_end]
            .iter()
            .position(|&x| x == b'/')
            .map_or(pre_query_end, |i| start + i);
        meta.auth_bounds = Some((start, auth_end));
        pos = auth_end;
    }

    meta.path_bounds = (pos, pre_query_end);
    meta
}

/// Rejects any byte that may never appear unencoded in a URI.
pub(crate) fn check_chars(s: &str) -> Result<(), UriError> {
    match s
        .bytes()
        .position(|x| x != b'%' && !URI_CHAR.allows(x))
    {
        Some(index) => Err(UriError::InvalidUri {
            index,
            byte: s.as_bytes()[index],
        }),
        None => Ok(()),
    }
}
