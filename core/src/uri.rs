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

use crate::Error;
use crate::Result;

/// Build the base string URI as defined by [RFC 5849 Section 3.4.1.2](https://tools.ietf.org/html/rfc5849#section-3.4.1.2).
///
/// ```text
/// GET /r%20v/X?id=123 HTTP/1.1
/// Host: EXAMPLE.COM:80
///
/// => http://example.com/r%20v/X
/// ```
///
/// - scheme and authority are lower-cased
/// - `host` replaces the authority of `uri`, use it to trust the `Host` header
/// - the default port of `http` (80) and `https` (443) is removed
/// - query and fragment are dropped, an empty path becomes `/`
///
/// RFC 5849 doesn't say which characters of the base string URI must be
/// encoded. Only spaces are, as `%20`, over the whole result. Nothing else is
/// touched since the result is percent encoded again in the base string.
/// Characters a strict URI parser would refuse, like a backtick in the path
/// or a non-ASCII host, are passed through as is.
pub fn base_string_uri(uri: &str, host: Option<&str>) -> Result<String> {
    let uri = uri.replace(' ', "%20");

    let Some((scheme, authority, path)) = split_uri(&uri) else {
        return Err(Error::invalid_argument(format!(
            "uri {uri} must include a scheme and an authority"
        )));
    };

    let scheme = scheme.to_ascii_lowercase();
    let authority = match host {
        Some(host) => host.to_lowercase(),
        None => authority.to_lowercase(),
    };
    let authority = strip_default_port(&scheme, &authority);

    let path = match path {
        "" => "/",
        path => path,
    };

    Ok(format!("{scheme}://{authority}{path}").replace(' ', "%20"))
}

/// Split `scheme://authority/path?query#fragment` into scheme, authority
/// and path.
///
/// The authority ends at the first `/`, `?` or `#`, the path at the first
/// `?` or `#`. Returns `None` if the scheme or the authority is empty.
fn split_uri(uri: &str) -> Option<(&str, &str, &str)> {
    let (scheme, rest) = uri.split_once("://")?;
    if !is_scheme(scheme) {
        return None;
    }

    let end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let (authority, rest) = rest.split_at(end);
    if authority.is_empty() {
        return None;
    }

    let end = rest.find(|c: char| matches!(c, '?' | '#')).unwrap_or(rest.len());
    Some((scheme, authority, &rest[..end]))
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn strip_default_port<'a>(scheme: &str, authority: &'a str) -> &'a str {
    match authority.rsplit_once(':') {
        Some((host, "80")) if scheme == "http" => host,
        Some((host, "443")) if scheme == "https" => host,
        _ => authority,
    }
}
