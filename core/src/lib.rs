//! Core of the OAuth 1.0a request signature engine.
//!
//! This crate implements the signature part of [RFC 5849](https://tools.ietf.org/html/rfc5849):
//! it builds the signature base string of a request, computes its signature
//! and verifies incoming signatures. It doesn't do any IO, hold any state or
//! generate nonces and timestamps.
//!
//! ## Overview
//!
//! - [`collect_parameters`] gathers request parameters from the query, the
//!   `Authorization` header and a form-encoded body.
//! - [`build_base_string`] normalizes the parameters and the URI into the
//!   signature base string.
//! - [`sign`] and [`verify`] compute and check signatures with one of the
//!   [`SignatureMethod`]s.
//!
//! RSA-SHA1 isn't implemented here. Callers inject an [`RsaSign`] or
//! [`RsaVerify`] implementation through [`KeyMaterial`].
//!
//! ## Example
//!
//! ```
//! use oauth1_signature_core::{build_base_string, sign, verify, KeyMaterial, Request, SignatureMethod};
//!
//! # fn main() -> oauth1_signature_core::Result<()> {
//! let params = vec![
//!     ("oauth_consumer_key".to_string(), "dpf43f3p2l4k3l03".to_string()),
//!     ("oauth_nonce".to_string(), "kllo9940pd9333jh".to_string()),
//!     ("file".to_string(), "vacation.jpg".to_string()),
//! ];
//! let key = KeyMaterial::shared("kd94hf93k423kf44", "pfkkdhi9sl3r4s00");
//!
//! let base_string = build_base_string("GET", "http://photos.example.net/photos", &params, None)?;
//! let signature = sign(SignatureMethod::HmacSha1, &base_string, key)?;
//!
//! let request = Request::new("GET", "http://photos.example.net/photos", params, signature);
//! assert!(verify(SignatureMethod::HmacSha1, &request, key)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`encode`]: RFC 3986 percent encoding
//! - [`hash`]: HMAC, base64 and constant-time helpers
//! - [`params`]: parameter sources and collection
//! - [`utils`]: general utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod encode;
pub mod hash;
pub mod params;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod uri;
pub use uri::base_string_uri;
mod base_string;
pub use base_string::{build_base_string, signature_base_string};
mod key;
pub use key::{hmac_key, KeyMaterial, RsaSign, RsaVerify};
mod method;
pub use method::SignatureMethod;
mod request;
pub use request::Request;
mod sign;
pub use sign::{sign, verify};
mod config;
pub use config::{Config, Env, OsEnv, StaticEnv};
pub use config::{OAUTH1_CLIENT_SECRET, OAUTH1_SIGNATURE_METHOD, OAUTH1_TOKEN_SECRET};

pub use encode::{escape, unescape};
pub use params::{
    collect_parameters, normalize_parameters, parse_authorization_header, BodySource,
    ParameterCollector,
};
