use http::header::CONTENT_TYPE;
use http::header::HOST;
use http::uri::Scheme;

use crate::params::BodySource;
use crate::params::ParameterCollector;
use crate::params::OAUTH_SIGNATURE;
use crate::Error;
use crate::Result;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// A signed request to verify.
///
/// The engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// HTTP method.
    pub http_method: String,
    /// Absolute request URI.
    pub uri: String,
    /// Collected request parameters.
    ///
    /// `oauth_signature` is ignored if present.
    pub params: Vec<(String, String)>,
    /// The `oauth_signature` sent with the request, percent decoded.
    pub signature: String,
}

impl Request {
    /// Create a new request.
    pub fn new(
        http_method: impl Into<String>,
        uri: impl Into<String>,
        params: Vec<(String, String)>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            http_method: http_method.into(),
            uri: uri.into(),
            params,
            signature: signature.into(),
        }
    }

    /// Build a request from `http::request::Parts` as received by a server.
    ///
    /// - Parameters are collected from the query, the `Authorization` header
    ///   and `body`.
    /// - `body` is only used if `Content-Type` is
    ///   `application/x-www-form-urlencoded`.
    /// - An origin-form URI is completed with the `Host` header and `http`.
    /// - `oauth_signature` is moved out of the parameters into `signature`.
    ///
    /// Servers behind TLS receive origin-form URIs too, they must use
    /// [`Request::from_parts_with_scheme`] with `https` instead, or every
    /// signature will fail to verify.
    pub fn from_parts(parts: &http::request::Parts, body: BodySource) -> Result<Self> {
        Self::from_parts_with_scheme(parts, Scheme::HTTP, body)
    }

    /// Build a request from `http::request::Parts`, using `default_scheme`
    /// for origin-form URIs.
    ///
    /// The scheme of an absolute-form URI always wins over `default_scheme`.
    pub fn from_parts_with_scheme(
        parts: &http::request::Parts,
        default_scheme: Scheme,
        body: BodySource,
    ) -> Result<Self> {
        let body = if is_form_urlencoded(parts) {
            body
        } else {
            BodySource::Empty
        };

        let mut params = ParameterCollector::new().with_oauth_signature(true).collect(
            parts.uri.query().unwrap_or_default(),
            &body,
            &parts.headers,
        );

        let signature = params
            .iter()
            .find(|(k, _)| k == OAUTH_SIGNATURE)
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        params.retain(|(k, _)| k != OAUTH_SIGNATURE);

        let authority = match parts.uri.authority() {
            Some(authority) => authority.as_str(),
            None => parts
                .headers
                .get(HOST)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    Error::invalid_argument("request without authority or host header")
                })?,
        };
        let scheme = parts.uri.scheme().cloned().unwrap_or(default_scheme);

        Ok(Self {
            http_method: parts.method.to_string(),
            uri: format!("{scheme}://{authority}{}", parts.uri.path()),
            params,
            signature,
        })
    }
}

fn is_form_urlencoded(parts: &http::request::Parts) -> bool {
    parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}
