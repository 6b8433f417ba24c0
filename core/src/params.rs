// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Request parameters as defined by [RFC 5849 Section 3.4.1.3](https://tools.ietf.org/html/rfc5849#section-3.4.1.3).

use std::collections::BTreeMap;
use std::collections::HashMap;

use http::header::AUTHORIZATION;
use http::HeaderMap;
use log::trace;

use crate::encode::escape;
use crate::encode::unescape;

/// Name of the parameter carrying the signature itself.
pub const OAUTH_SIGNATURE: &str = "oauth_signature";
/// Name of the protection space parameter of the `Authorization` header.
pub const REALM: &str = "realm";

const OAUTH_PARAM_PREFIX: &str = "oauth_";

/// Entity-body of a request as seen by the parameter collector.
///
/// The body only carries parameters when its content type is
/// `application/x-www-form-urlencoded`. Checking that is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BodySource {
    /// No body, or a body that doesn't carry parameters.
    #[default]
    Empty,
    /// Already decoded name/value pairs.
    Pairs(Vec<(String, String)>),
    /// A form encoded string like `c2&a3=2+q`.
    Form(String),
}

impl BodySource {
    /// Decode the body into name/value pairs.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        match self {
            BodySource::Empty => Vec::new(),
            BodySource::Pairs(pairs) => pairs.clone(),
            BodySource::Form(s) => form_decode(s),
        }
    }
}

impl From<&str> for BodySource {
    fn from(value: &str) -> Self {
        BodySource::Form(value.to_string())
    }
}

impl From<String> for BodySource {
    fn from(value: String) -> Self {
        BodySource::Form(value)
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for BodySource {
    fn from(value: Vec<(K, V)>) -> Self {
        BodySource::Pairs(
            value
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> From<HashMap<K, V>> for BodySource {
    fn from(value: HashMap<K, V>) -> Self {
        BodySource::Pairs(
            value
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for BodySource {
    fn from(value: BTreeMap<K, V>) -> Self {
        BodySource::Pairs(
            value
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Collects the request parameters from the query, the `Authorization`
/// header and the entity-body.
///
/// By default `oauth_signature` is excluded and `realm` is dropped from the
/// header parameters.
#[derive(Debug, Clone, Copy)]
pub struct ParameterCollector {
    exclude_oauth_signature: bool,
    with_realm: bool,
}

impl Default for ParameterCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterCollector {
    /// Create a collector with the default settings.
    pub fn new() -> Self {
        Self {
            exclude_oauth_signature: true,
            with_realm: false,
        }
    }

    /// Keep the `realm` parameter of the `Authorization` header.
    pub fn with_realm(mut self, with_realm: bool) -> Self {
        self.with_realm = with_realm;
        self
    }

    /// Keep the `oauth_signature` parameter.
    ///
    /// Servers need it to learn which signature to verify, it must never be
    /// part of a base string though.
    pub fn with_oauth_signature(mut self, with_oauth_signature: bool) -> Self {
        self.exclude_oauth_signature = !with_oauth_signature;
        self
    }

    /// Collect parameters, in query, header, body order.
    ///
    /// Malformed or missing sources contribute nothing.
    pub fn collect(
        &self,
        uri_query: &str,
        body: &BodySource,
        headers: &HeaderMap,
    ) -> Vec<(String, String)> {
        let mut params = Vec::new();

        params.extend(form_decode(uri_query).into_iter().map(unescape_oauth_value));

        if let Some(value) = headers.get(AUTHORIZATION) {
            match std::str::from_utf8(value.as_bytes())
                .ok()
                .and_then(parse_authorization_header)
            {
                Some(pairs) => params.extend(
                    pairs
                        .into_iter()
                        .filter(|(k, _)| self.with_realm || k != REALM),
                ),
                None => trace!("authorization header is not an OAuth header, ignored"),
            }
        }

        params.extend(body.to_pairs().into_iter().map(unescape_oauth_value));

        if self.exclude_oauth_signature {
            params.retain(|(k, _)| k != OAUTH_SIGNATURE);
        }

        params
    }
}

/// Collect parameters with the default [`ParameterCollector`].
pub fn collect_parameters(
    uri_query: &str,
    body: &BodySource,
    headers: &HeaderMap,
) -> Vec<(String, String)> {
    ParameterCollector::new().collect(uri_query, body, headers)
}

/// Parse an `Authorization: OAuth ...` header value into decoded pairs.
///
/// The `realm` parameter is kept. Returns `None` if the scheme is not
/// `OAuth` or any item is not a `key="value"` pair.
///
/// ```text
/// OAuth realm="Example", oauth_consumer_key="9djdj82h48djs9d2"
///   => [(realm, Example), (oauth_consumer_key, 9djdj82h48djs9d2)]
/// ```
pub fn parse_authorization_header(value: &str) -> Option<Vec<(String, String)>> {
    let value = value.trim_start();
    let (scheme, rest) = value.split_once(|c: char| c.is_ascii_whitespace())?;
    if !scheme.eq_ignore_ascii_case("OAuth") {
        return None;
    }

    let mut pairs = Vec::new();
    for item in split_header_list(rest) {
        let (k, v) = item.split_once('=')?;
        let v = v.trim();
        let v = v
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(v);
        pairs.push((k.trim().to_string(), unescape(v)));
    }

    Some(pairs)
}

/// Normalize parameters as defined by [RFC 5849 Section 3.4.1.3.2](https://tools.ietf.org/html/rfc5849#section-3.4.1.3.2).
///
/// ```text
/// [(b5, =%3D), (a3, a), (c@, )] => "a3=a&b5=%3D%253D&c%40="
/// ```
pub fn normalize_parameters(params: &[(String, String)]) -> String {
    let mut encoded = params
        .iter()
        .map(|(k, v)| (escape(k), escape(v)))
        .collect::<Vec<_>>();

    // Sort by encoded name, then by encoded value.
    encoded.sort();

    let mut s = String::with_capacity(encoded.iter().map(|(k, v)| k.len() + v.len() + 2).sum());
    for (idx, (k, v)) in encoded.into_iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.push_str(&k);
        s.push('=');
        s.push_str(&v);
    }

    s
}

fn form_decode(s: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(s.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Values of `oauth_*` parameters taken from the query or the body may be
/// escaped once more than they appear in the base string.
fn unescape_oauth_value((k, v): (String, String)) -> (String, String) {
    if k.starts_with(OAUTH_PARAM_PREFIX) {
        let v = unescape(&v);
        (k, v)
    } else {
        (k, v)
    }
}

/// Split a comma separated header list, ignoring commas inside quoted
/// strings.
fn split_header_list(s: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;

    for (idx, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ',' if !quoted => {
                items.push(&s[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    items.push(&s[start..]);

    items
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect()
}
