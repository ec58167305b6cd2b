use super::{scan, Violation};
use crate::{
    error::QueryError,
    pct_enc::{self, table, EStr, Table},
};
use alloc::{string::String, vec::Vec};
use core::{iter::FusedIterator, slice};

/// Bytes allowed unencoded in a query key or value.
const PAIR_PART: Table = table::QUERY.sub(Table::new(b"&="));

/// A [query] component, read as `'&'`-separated key-value pairs.
///
/// [query]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
///
/// A field without `'='` has no value, while a field `"key="` has an empty
/// value. Duplicate keys are kept in order.
///
/// # Examples
///
/// ```
/// use rfc3986::component::Query;
///
/// let query = Query::parse("lang=en&debug&tag=a&tag=b")?;
/// assert_eq!(query.len(), 4);
/// assert_eq!(query.get("lang").unwrap().unwrap(), "en");
/// assert_eq!(query.get("debug"), Some(None));
/// assert_eq!(query.get("missing"), None);
/// assert_eq!(query.to_string(), "lang=en&debug&tag=a&tag=b");
/// # Ok::<_, rfc3986::error::QueryError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Query {
    pairs: Vec<(String, Option<String>)>,
}

impl Query {
    /// Parses a query.
    ///
    /// The empty string yields a query with no pairs.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string contains a byte not allowed in a query,
    /// such as `'\r'`, `'\n'` or `'#'`, a malformed percent-encoded octet,
    /// or a field with an empty key.
    pub fn parse(s: &str) -> Result<Self, QueryError> {
        scan(s.as_bytes(), table::QUERY).map_err(|v| match v {
            Violation::Char { index, byte } => QueryError::InvalidCharacter { index, byte },
            Violation::PctEncoding { index } => QueryError::InvalidPercentEncoding { index },
        })?;
        if s.is_empty() {
            return Ok(Self::default());
        }

        let mut pairs = Vec::new();
        let mut index = 0;
        for field in s.split('&') {
            let (key, value) = match field.split_once('=') {
                Some((key, value)) => (key, Some(String::from(value))),
                None => (field, None),
            };
            if key.is_empty() {
                return Err(QueryError::EmptyKey { index });
            }
            pairs.push((String::from(key), value));
            index += field.len() + 1;
        }
        Ok(Self { pairs })
    }

    /// Returns an iterator over the percent-encoded key-value pairs.
    pub fn pairs(&self) -> Pairs<'_> {
        Pairs {
            inner: self.pairs.iter(),
        }
    }

    /// Returns the value of the first pair with the given percent-encoded key.
    ///
    /// The outer `Option` is `None` if no pair has the key; the inner one
    /// is `None` if the pair has no `'='`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Option<&EStr>> {
        self.pairs()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    /// Returns a new query with a pair appended.
    ///
    /// The key and value are taken unencoded and are percent-encoded so
    /// that `'&'`, `'='` and `'#'` cannot break the pair structure.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the key is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3986::component::Query;
    ///
    /// let query = Query::parse("a=1")?.appending("b&c", Some("x=y"))?;
    /// assert_eq!(query.to_string(), "a=1&b%26c=x%3Dy");
    /// # Ok::<_, rfc3986::error::QueryError>(())
    /// ```
    pub fn appending(&self, key: &str, value: Option<&str>) -> Result<Self, QueryError> {
        if key.is_empty() {
            return Err(QueryError::EmptyKey {
                index: self.encoded_len() + usize::from(!self.pairs.is_empty()),
            });
        }
        let mut pairs = self.pairs.clone();
        pairs.push((
            pct_enc::encode(key.as_bytes(), PAIR_PART),
            value.map(|v| pct_enc::encode(v.as_bytes(), PAIR_PART)),
        ));
        Ok(Self { pairs })
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Checks whether the query has no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        for (i, (k, v)) in self.pairs.iter().enumerate() {
            len += usize::from(i > 0) + k.len();
            if let Some(v) = v {
                len += 1 + v.len();
            }
        }
        len
    }
}

/// An iterator over the key-value pairs of a [`Query`].
///
/// This struct is created by [`Query::pairs`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Pairs<'a> {
    inner: slice::Iter<'a, (String, Option<String>)>,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a EStr, Option<&'a EStr>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| {
            (
                EStr::new_validated(k),
                v.as_deref().map(EStr::new_validated),
            )
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Pairs<'_> {}

impl FusedIterator for Pairs<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn parse() {
        assert!(Query::parse("").unwrap().is_empty());

        let query = Query::parse("a=1&b=&c&a=2").unwrap();
        let pairs: Vec<_> = query
            .pairs()
            .map(|(k, v)| (k.as_str(), v.map(EStr::as_str)))
            .collect();
        assert_eq!(
            pairs,
            [("a", Some("1")), ("b", Some("")), ("c", None), ("a", Some("2"))]
        );
        assert_eq!(query.get("a").unwrap().unwrap(), "1");
        assert_eq!(query.to_string(), "a=1&b=&c&a=2");

        // Only the first '=' separates key and value.
        let query = Query::parse("k=v=w").unwrap();
        assert_eq!(query.get("k").unwrap().unwrap(), "v=w");
    }

    #[test]
    fn invalid() {
        assert_eq!(Query::parse("=1"), Err(QueryError::EmptyKey { index: 0 }));
        assert_eq!(Query::parse("a=1&"), Err(QueryError::EmptyKey { index: 4 }));
        assert_eq!(Query::parse("a&&b"), Err(QueryError::EmptyKey { index: 2 }));
        assert_eq!(
            Query::parse("a#b"),
            Err(QueryError::InvalidCharacter {
                index: 1,
                byte: b'#'
            })
        );
        assert_eq!(
            Query::parse("a=%4"),
            Err(QueryError::InvalidPercentEncoding { index: 2 })
        );
        assert_eq!(
            Query::parse("a=1").unwrap().appending("", None),
            Err(QueryError::EmptyKey { index: 4 })
        );
    }
}
