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

use crate::encode::escape;
use crate::params::normalize_parameters;
use crate::uri::base_string_uri;
use crate::Result;

/// Construct the signature base string as defined by [RFC 5849 Section 3.4.1.1](https://tools.ietf.org/html/rfc5849#section-3.4.1.1).
///
/// ## Format
///
/// ```text
/// escape(HTTP method in uppercase) + "&" +
/// escape(base string URI) + "&" +
/// escape(normalized parameters)
/// ```
pub fn signature_base_string(
    http_method: &str,
    base_string_uri: &str,
    normalized_params: &str,
) -> String {
    let mut s = escape(&http_method.to_uppercase());
    s.push('&');
    s.push_str(&escape(base_string_uri));
    s.push('&');
    s.push_str(&escape(normalized_params));
    s
}

/// Build the signature base string of a request.
///
/// `params` are the collected request parameters, without
/// `oauth_signature`. `host` overrides the authority of `uri`, see
/// [`base_string_uri`].
pub fn build_base_string(
    http_method: &str,
    uri: &str,
    params: &[(String, String)],
    host: Option<&str>,
) -> Result<String> {
    let bs_uri = base_string_uri(uri, host)?;
    let normalized = normalize_parameters(params);

    Ok(signature_base_string(http_method, &bs_uri, &normalized))
}
