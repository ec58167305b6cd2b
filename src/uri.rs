use crate::{
    component::{Authority, Fragment, Path, Query, Scheme},
    error::{ComponentError, PathError, UriError},
    normalize::Normalizer,
    resolve::{ResolveError, Resolver},
    split::{self, Meta},
};
use alloc::string::{String, ToString};
use borrow_or_share::{BorrowOrShare, Bos};
use core::{
    borrow::Borrow,
    cmp::Ordering,
    hash,
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A [URI reference], i.e., either a URI or a relative reference.
///
/// [URI reference]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.1
///
/// # Variants
///
/// Two variants of `Uri` are available: `Uri<&str>` (borrowed) and
/// `Uri<String>` (owned).
///
/// `Uri<&'a str>` outputs references with lifetime `'a` where possible
/// (thanks to [`borrow-or-share`](borrow_or_share)):
///
/// ```
/// use rfc3986::Uri;
///
/// // Keep a reference to the path after dropping the `Uri`.
/// let path = Uri::parse("foo:bar")?.path_str();
/// assert_eq!(path, "bar");
/// # Ok::<_, rfc3986::UriError>(())
/// ```
///
/// # Components
///
/// The text is split into five groups when the `Uri` is created, and every
/// present group is parsed into its typed component right away. Raw groups
/// are available through the `*_str` methods and typed components through
/// the methods named after them.
///
/// # Comparison
///
/// `Uri`s are compared, ordered and hashed by their text only.
/// Normalization is **not** performed prior to comparison; call
/// [`normalize`](Self::normalize) on both sides first if you need it.
///
/// # Examples
///
/// ```
/// use rfc3986::{component::{Host, Scheme}, Uri};
///
/// let uri = Uri::parse("https://user@Example.com:8443/a/b?x=1#frag")?;
/// assert_eq!(uri.scheme(), Some(&Scheme::HTTPS));
/// assert_eq!(uri.authority_str(), Some("user@Example.com:8443"));
/// assert_eq!(
///     uri.authority().unwrap().host(),
///     &Host::RegisteredName("example.com".into()),
/// );
/// assert!(uri.path().unwrap().segments().eq(["a", "b"]));
/// assert_eq!(uri.query().unwrap().get("x").unwrap().unwrap(), "1");
/// assert_eq!(uri.fragment_str(), Some("frag"));
/// # Ok::<_, rfc3986::UriError>(())
/// ```
#[derive(Clone)]
pub struct Uri<T> {
    val: T,
    meta: Meta,
    parts: Parts,
}

#[derive(Clone, Default)]
struct Parts {
    scheme: Option<Scheme>,
    authority: Option<Authority>,
    path: Option<Path>,
    query: Option<Query>,
    fragment: Option<Fragment>,
}

impl Parts {
    fn parse(s: &str, meta: &Meta) -> Result<Self, ComponentError> {
        let scheme = meta
            .scheme_end
            .map(|end| Scheme::parse(&s[..end.get()]))
            .transpose()?;
        let authority = meta
            .auth_bounds
            .map(|(start, end)| Authority::parse(&s[start..end]))
            .transpose()?;

        let path_str = &s[meta.path_bounds.0..meta.path_bounds.1];
        let path = Path::parse(path_str)?;
        // A relative reference may not have a colon in its first segment,
        // or it would read as a scheme.
        if scheme.is_none() && authority.is_none() {
            let first = path_str.split('/').next().unwrap_or_default();
            if let Some(index) = first.find(':') {
                return Err(PathError::InvalidCharacter { index, byte: b':' }.into());
            }
        }

        let query = meta
            .query_bounds
            .map(|(start, end)| Query::parse(&s[start..end]))
            .transpose()?;
        let fragment = meta
            .fragment_start
            .map(|start| Fragment::parse(&s[start..]))
            .transpose()?;

        Ok(Self {
            scheme,
            authority,
            path: Some(path),
            query,
            fragment,
        })
    }

    fn parse_lenient(s: &str, meta: &Meta) -> Self {
        Self {
            scheme: meta
                .scheme_end
                .and_then(|end| Scheme::parse(&s[..end.get()]).ok()),
            authority: meta
                .auth_bounds
                .and_then(|(start, end)| Authority::parse(&s[start..end]).ok()),
            path: Path::parse(&s[meta.path_bounds.0..meta.path_bounds.1]).ok(),
            query: meta
                .query_bounds
                .and_then(|(start, end)| Query::parse(&s[start..end]).ok()),
            fragment: meta
                .fragment_start
                .and_then(|start| Fragment::parse(&s[start..]).ok()),
        }
    }
}

impl<T: Bos<str>> Uri<T> {
    /// Parses a URI reference from a string into a `Uri`.
    ///
    /// Parsing is atomic: either every present component is valid and a
    /// `Uri` is returned, or nothing is.
    ///
    /// # Errors
    ///
    /// Returns [`UriError::InvalidUri`] if the string contains a byte that may
    /// never appear unencoded in a URI, such as a non-ASCII byte or a space,
    /// and [`UriError::InvalidComponent`] if any component is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3986::{error::{ComponentError, PortError, AuthorityError}, Uri, UriError};
    ///
    /// assert!(Uri::parse("http://example.com/").is_ok());
    /// assert!(Uri::parse("example.com").unwrap().is_relative_reference());
    /// assert!(matches!(Uri::parse("http://exämple.com"), Err(UriError::InvalidUri { .. })));
    /// assert_eq!(
    ///     Uri::parse("http://example.com:65536/").unwrap_err(),
    ///     UriError::InvalidComponent(ComponentError::Authority(
    ///         AuthorityError::InvalidPort("65536".into(), PortError::Overflow),
    ///     )),
    /// );
    /// ```
    pub fn parse(val: T) -> Result<Self, UriError> {
        let s = val.borrow_or_share();
        split::check_chars(s)?;
        let meta = split::split(s);
        let parts = Parts::parse(s, &meta)?;
        Ok(Self { val, meta, parts })
    }

    /// Splits a string into a `Uri` without rejecting anything.
    ///
    /// Groups that fail to parse are still available as raw text, while
    /// their typed accessors return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3986::Uri;
    ///
    /// let uri = Uri::parse_lenient("http://a b/c?d=1");
    /// assert_eq!(uri.authority_str(), Some("a b"));
    /// assert!(uri.authority().is_none());
    /// assert_eq!(uri.path().unwrap().to_string(), "/c");
    /// ```
    pub fn parse_lenient(val: T) -> Self {
        let s = val.borrow_or_share();
        let meta = split::split(s);
        let parts = Parts::parse_lenient(s, &meta);
        Self { val, meta, parts }
    }

    /// Returns the parsed scheme component, if present and valid.
    #[must_use]
    pub fn scheme(&self) -> Option<&Scheme> {
        self.parts.scheme.as_ref()
    }

    /// Returns the parsed authority component, if present and valid.
    #[must_use]
    pub fn authority(&self) -> Option<&Authority> {
        self.parts.authority.as_ref()
    }

    /// Returns the parsed path component, if valid.
    ///
    /// This is always `Some` for a `Uri` created by [`parse`](Self::parse).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.parts.path.as_ref()
    }

    /// Returns the parsed query component, if present and valid.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.parts.query.as_ref()
    }

    /// Returns the parsed fragment component, if present and valid.
    #[must_use]
    pub fn fragment(&self) -> Option<&Fragment> {
        self.parts.fragment.as_ref()
    }

    /// Creates a new `Uri<String>` by cloning the contents of this `Uri`.
    #[must_use]
    pub fn to_owned(&self) -> Uri<String> {
        Uri {
            val: self.as_str().into(),
            meta: self.meta,
            parts: self.parts.clone(),
        }
    }

    /// Normalizes the URI reference with the default [`Normalizer`].
    ///
    /// This method applies syntax-based normalization described in
    /// [Section 6.2.2 of RFC 3986] and scheme-based normalization
    /// of default ports described in [Section 6.2.3]:
    ///
    /// - The scheme and a registered name are lowercased.
    /// - An IPv6 address is written in its canonical form.
    /// - A port equal to the default port of the scheme is removed.
    /// - Percent-encoded octets are normalized, see [`pct_enc::normalize`].
    /// - Dot segments are removed from the path when a scheme is present.
    ///   A rootless path stays rootless.
    ///
    /// The output parses into a `Uri` equal to itself when normalized again.
    ///
    /// [Section 6.2.2 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986#section-6.2.2
    /// [Section 6.2.3]: https://datatracker.ietf.org/doc/html/rfc3986#section-6.2.3
    /// [`pct_enc::normalize`]: crate::pct_enc::normalize
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3986::Uri;
    ///
    /// let uri = Uri::parse("HTTPS://EXAMPLE.COM:443/a/./b/../c/%7euser")?;
    /// assert_eq!(uri.normalize(), "https://example.com/a/c/~user");
    /// # Ok::<_, rfc3986::UriError>(())
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Uri<String> {
        Normalizer::new().normalize_lossy(self)
    }

    /// Resolves a reference against this URI as the base.
    ///
    /// See [`Resolver::resolve`] for the exact behavior of this method.
    ///
    /// # Errors
    ///
    /// Returns `Err` if this URI has no scheme or if the reference is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3986::Uri;
    ///
    /// let base = Uri::parse("http://a/b/c/d;p?q")?;
    /// assert_eq!(base.resolve("../g").unwrap(), "http://a/b/g");
    /// # Ok::<_, rfc3986::UriError>(())
    /// ```
    pub fn resolve(&self, reference: &str) -> Result<Uri<String>, ResolveError> {
        Resolver::with_base(self).resolve(reference)
    }

    /// Returns a new `Uri` with the scheme replaced.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the assembled text does not parse back into the same
    /// groups, or if any of them is invalid.
    pub fn with_scheme(&self, scheme: Option<&Scheme>) -> Result<Uri<String>, UriError> {
        assemble(
            scheme.map(Scheme::as_str),
            self.authority_str(),
            self.path_str(),
            self.query_str(),
            self.fragment_str(),
        )
    }

    /// Returns a new `Uri` with the authority replaced.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the same conditions as [`with_scheme`](Self::with_scheme),
    /// e.g. when an authority is added in front of a relative path.
    pub fn with_authority(&self, authority: Option<&Authority>) -> Result<Uri<String>, UriError> {
        let authority = authority.map(ToString::to_string);
        assemble(
            self.scheme_str(),
            authority.as_deref(),
            self.path_str(),
            self.query_str(),
            self.fragment_str(),
        )
    }

    /// Returns a new `Uri` with the path replaced.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the same conditions as [`with_scheme`](Self::with_scheme),
    /// e.g. when the path starts with `"//"` and there is no authority.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3986::{component::Path, Uri, UriError};
    ///
    /// let uri = Uri::parse("http://example.com/a?x")?;
    /// let path = uri.path().unwrap().appending("b c");
    /// assert_eq!(uri.with_path(&path)?, "http://example.com/a/b%20c?x");
    ///
    /// let uri = Uri::parse("foo:bar")?;
    /// let path = Path::parse("//baz")?;
    /// assert!(matches!(uri.with_path(&path), Err(UriError::ConversionFailed { .. })));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_path(&self, path: &Path) -> Result<Uri<String>, UriError> {
        let path = path.to_string();
        assemble(
            self.scheme_str(),
            self.authority_str(),
            &path,
            self.query_str(),
            self.fragment_str(),
        )
    }

    /// Returns a new `Uri` with the query replaced.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the same conditions as [`with_scheme`](Self::with_scheme).
    pub fn with_query(&self, query: Option<&Query>) -> Result<Uri<String>, UriError> {
        let query = query.map(ToString::to_string);
        assemble(
            self.scheme_str(),
            self.authority_str(),
            self.path_str(),
            query.as_deref(),
            self.fragment_str(),
        )
    }

    /// Returns a new `Uri` with the fragment replaced.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the same conditions as [`with_scheme`](Self::with_scheme).
    pub fn with_fragment(&self, fragment: Option<&Fragment>) -> Result<Uri<String>, UriError> {
        assemble(
            self.scheme_str(),
            self.authority_str(),
            self.path_str(),
            self.query_str(),
            fragment.map(Fragment::as_str),
        )
    }
}

impl<T> Uri<T> {
    /// Checks whether a scheme component is present.
    #[inline]
    #[must_use]
    pub fn has_scheme(&self) -> bool {
        self.meta.scheme_end.is_some()
    }

    /// Checks whether an authority component is present.
    #[inline]
    #[must_use]
    pub fn has_authority(&self) -> bool {
        self.meta.auth_bounds.is_some()
    }

    /// Checks whether a query component is present.
    #[inline]
    #[must_use]
    pub fn has_query(&self) -> bool {
        self.meta.query_bounds.is_some()
    }

    /// Checks whether a fragment component is present.
    #[inline]
    #[must_use]
    pub fn has_fragment(&self) -> bool {
        self.meta.fragment_start.is_some()
    }

    /// Checks whether this is a [relative reference], i.e., has no scheme.
    ///
    /// [relative reference]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.2
    #[inline]
    #[must_use]
    pub fn is_relative_reference(&self) -> bool {
        !self.has_scheme()
    }

    /// Checks whether this is an [absolute URI], i.e., has a scheme
    /// but no fragment.
    ///
    /// [absolute URI]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.3
    #[inline]
    #[must_use]
    pub fn is_absolute_uri(&self) -> bool {
        self.has_scheme() && !self.has_fragment()
    }
}

impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> Uri<T> {
    /// Returns the URI reference as a string slice.
    #[must_use]
    pub fn as_str(&'i self) -> &'o str {
        self.val.borrow_or_share()
    }

    /// Returns the raw scheme group.
    #[must_use]
    pub fn scheme_str(&'i self) -> Option<&'o str> {
        let end = self.meta.scheme_end?.get();
        Some(&self.as_str()[..end])
    }

    /// Returns the raw authority group, without the leading `"//"`.
    #[must_use]
    pub fn authority_str(&'i self) -> Option<&'o str> {
        let (start, end) = self.meta.auth_bounds?;
        Some(&self.as_str()[start..end])
    }

    /// Returns the raw path group, which is always present but may be empty.
    #[must_use]
    pub fn path_str(&'i self) -> &'o str {
        let (start, end) = self.meta.path_bounds;
        &self.as_str()[start..end]
    }

    /// Returns the raw query group, without the leading `'?'`.
    #[must_use]
    pub fn query_str(&'i self) -> Option<&'o str> {
        let (start, end) = self.meta.query_bounds?;
        Some(&self.as_str()[start..end])
    }

    /// Returns the raw fragment group, without the leading `'#'`.
    #[must_use]
    pub fn fragment_str(&'i self) -> Option<&'o str> {
        let start = self.meta.fragment_start?;
        Some(&self.as_str()[start..])
    }
}

impl Uri<String> {
    /// Assembles a `Uri` from typed components.
    ///
    /// # Errors
    ///
    /// Returns [`UriError::ConversionFailed`] if the assembled text does not
    /// split back into the same groups, e.g. when an authority is followed
    /// by a relative path, and [`UriError::InvalidComponent`] if it splits
    /// correctly but does not parse, e.g. a relative path starting with `':'`
    /// and no scheme.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3986::{component::{Authority, Path, Query, Scheme}, Uri};
    ///
    /// let uri = Uri::from_parts(
    ///     Some(&Scheme::HTTPS),
    ///     Some(&Authority::parse("example.com")?),
    ///     &Path::parse("/search")?,
    ///     Some(&Query::parse("q=rust")?),
    ///     None,
    /// )?;
    /// assert_eq!(uri, "https://example.com/search?q=rust");
    ///
    /// let relative = Path::parse("search")?;
    /// let auth = Authority::parse("example.com")?;
    /// assert!(Uri::from_parts(None, Some(&auth), &relative, None, None).is_err());
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_parts(
        scheme: Option<&Scheme>,
        authority: Option<&Authority>,
        path: &Path,
        query: Option<&Query>,
        fragment: Option<&Fragment>,
    ) -> Result<Self, UriError> {
        let authority = authority.map(ToString::to_string);
        let path = path.to_string();
        let query = query.map(ToString::to_string);
        assemble(
            scheme.map(Scheme::as_str),
            authority.as_deref(),
            &path,
            query.as_deref(),
            fragment.map(Fragment::as_str),
        )
    }

    /// Consumes this `Uri<String>` and yields the underlying [`String`].
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.val
    }
}

fn assemble(
    scheme: Option<&str>,
    authority: Option<&str>,
    path: &str,
    query: Option<&str>,
    fragment: Option<&str>,
) -> Result<Uri<String>, UriError> {
    let mut text = String::new();
    if let Some(scheme) = scheme {
        text.push_str(scheme);
        text.push(':');
    }
    if let Some(authority) = authority {
        text.push_str("//");
        text.push_str(authority);
    }
    text.push_str(path);
    if let Some(query) = query {
        text.push('?');
        text.push_str(query);
    }
    if let Some(fragment) = fragment {
        text.push('#');
        text.push_str(fragment);
    }

    let meta = split::split(&text);
    let same = meta.scheme_end.map(|end| &text[..end.get()]) == scheme
        && meta.auth_bounds.map(|(start, end)| &text[start..end]) == authority
        && &text[meta.path_bounds.0..meta.path_bounds.1] == path
        && meta.query_bounds.map(|(start, end)| &text[start..end]) == query
        && meta.fragment_start.map(|start| &text[start..]) == fragment;
    if !same {
        return Err(UriError::ConversionFailed { text });
    }
    Uri::parse(text)
}

impl<T: Bos<str>, U: Bos<str>> PartialEq<Uri<U>> for Uri<T> {
    fn eq(&self, other: &Uri<U>) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<T: Bos<str>> PartialEq<str> for Uri<T> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for str {
    fn eq(&self, other: &Uri<T>) -> bool {
        self == other.as_str()
    }
}

impl<T: Bos<str>> PartialEq<&str> for Uri<T> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for &str {
    fn eq(&self, other: &Uri<T>) -> bool {
        *self == other.as_str()
    }
}

impl<T: Bos<str>> Eq for Uri<T> {}

impl<T: Bos<str>> hash::Hash for Uri<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl<T: Bos<str>> PartialOrd for Uri<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Bos<str>> Ord for Uri<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl<T: Bos<str>> AsRef<str> for Uri<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T: Bos<str>> Borrow<str> for Uri<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<'a> TryFrom<&'a str> for Uri<&'a str> {
    type Error = UriError;

    /// Equivalent to [`parse`](Self::parse).
    #[inline]
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl TryFrom<String> for Uri<String> {
    type Error = UriError;

    /// Equivalent to [`parse`](Self::parse).
    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl From<Uri<String>> for String {
    /// Equivalent to [`into_string`](Uri::into_string).
    #[inline]
    fn from(value: Uri<String>) -> String {
        value.val
    }
}

impl From<Uri<&str>> for Uri<String> {
    /// Equivalent to [`to_owned`](Uri::to_owned).
    #[inline]
    fn from(value: Uri<&str>) -> Self {
        value.to_owned()
    }
}

impl FromStr for Uri<String> {
    type Err = UriError;

    /// Equivalent to `Uri::parse(s).map(|r| r.to_owned())`.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s).map(|r| r.to_owned())
    }
}

#[cfg(feature = "serde")]
impl<T: Bos<str>> Serialize for Uri<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri<&'de str> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        Uri::parse(s).map_err(de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri<String> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uri::parse(s).map_err(de::Error::custom)
    }
}
