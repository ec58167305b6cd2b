#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![cfg_attr(not(feature = "std"), no_std)]

//! A URI parser, validator, normalizer and resolver that strictly adheres
//! to IETF [RFC 3986].
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! See the documentation of [`Uri`] for more details.
//!
//! # Overview
//!
//! - [`Uri::parse`] validates a URI reference as a whole and splits it into
//!   typed [components](component), each of which can also be parsed on its
//!   own.
//! - [`pct_enc`] percent-encodes and decodes bytes against the character
//!   classes of the RFC, found in [`pct_enc::table`].
//! - [`Normalizer`] and [`Uri::normalize`] perform syntax-based and
//!   default-port normalization.
//! - [`Resolver`] and [`Uri::resolve`] resolve references against a base,
//!   and [`remove_dot_segments`] exposes the path algorithm they share.
//!
//! # Examples
//!
//! ```
//! use rfc3986::Uri;
//!
//! let uri = Uri::parse("HTTPS://EXAMPLE.COM:443/a/./b/../c?q=1")?;
//! assert_eq!(uri.scheme_str(), Some("HTTPS"));
//!
//! let base = uri.normalize();
//! assert_eq!(base, "https://example.com/a/c?q=1");
//! assert_eq!(base.resolve("d#top").unwrap(), "https://example.com/a/d#top");
//! # Ok::<_, rfc3986::UriError>(())
//! ```
//!
//! # Feature flags
//!
//! - `std` (default): Enables `std` support. This includes [`Error`]
//!   implementations on the error types through `impl-error`.
//!
//! - `impl-error`: Implements [`Error`] for the error types. Requires
//!   Rust 1.81 when used without `std`.
//!
//! - `serde`: Enables [`serde`] support for [`Uri`] and [`Scheme`].
//!
//! [`Error`]: core::error::Error
//! [`serde`]: https://docs.rs/serde
//! [`Scheme`]: component::Scheme

extern crate alloc;

pub mod component;
pub mod error;
pub mod normalize;
pub mod pct_enc;
pub mod resolve;

mod convert;
mod fmt;
mod ip;
mod split;
mod uri;

pub use convert::UriRepresentable;
pub use error::UriError;
pub use normalize::Normalizer;
pub use resolve::{remove_dot_segments, Resolver};
pub use uri::Uri;
