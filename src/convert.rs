use crate::Uri;
use alloc::string::String;
use borrow_or_share::Bos;

/// Types that can be represented as a [`Uri`].
///
/// Implement this for your own type to pass it to [`Resolver::with_base`]
/// and [`Normalizer::normalize_any`].
///
/// [`Resolver::with_base`]: crate::Resolver::with_base
/// [`Normalizer::normalize_any`]: crate::Normalizer::normalize_any
///
/// # Examples
///
/// ```
/// use rfc3986::{Resolver, Uri, UriRepresentable};
///
/// struct Endpoint {
///     host: &'static str,
///     path: &'static str,
/// }
///
/// impl UriRepresentable for Endpoint {
///     fn uri(&self) -> Uri<String> {
///         Uri::parse_lenient(format!("https://{}{}", self.host, self.path))
///     }
/// }
///
/// let endpoint = Endpoint { host: "api.example.com", path: "/v1/users/" };
/// let resolver = Resolver::with_base(&endpoint);
/// assert_eq!(resolver.resolve("42").unwrap(), "https://api.example.com/v1/users/42");
/// ```
pub trait UriRepresentable {
    /// Returns the URI representation of `self`.
    fn uri(&self) -> Uri<String>;
}

impl<T: Bos<str>> UriRepresentable for Uri<T> {
    fn uri(&self) -> Uri<String> {
        self.to_owned()
    }
}

impl<R: UriRepresentable + ?Sized> UriRepresentable for &R {
    fn uri(&self) -> Uri<String> {
        (**self).uri()
    }
}
