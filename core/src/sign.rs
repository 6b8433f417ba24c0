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

//! Signing and verification as defined by [RFC 5849 Section 3.4](https://tools.ietf.org/html/rfc5849#section-3.4).

use log::debug;

use crate::base_string::build_base_string;
use crate::hash::base64_decode;
use crate::hash::base64_encode;
use crate::hash::base64_hmac_sha1;
use crate::hash::base64_hmac_sha256;
use crate::hash::constant_time_eq;
use crate::key::hmac_key;
use crate::params::OAUTH_SIGNATURE;
use crate::Error;
use crate::KeyMaterial;
use crate::Request;
use crate::Result;
use crate::SignatureMethod;

/// Sign a signature base string.
///
/// PLAINTEXT doesn't use `base_string` at all.
///
/// # Errors
///
/// Returns [`ErrorKind::ConfigInvalid`](crate::ErrorKind::ConfigInvalid) if
/// `key` doesn't fit `method`, for example RSA-SHA1 without an RSA private key.
pub fn sign(method: SignatureMethod, base_string: &str, key: KeyMaterial<'_>) -> Result<String> {
    match (method, key) {
        (
            SignatureMethod::HmacSha1,
            KeyMaterial::Shared {
                client_secret,
                token_secret,
            },
        ) => Ok(base64_hmac_sha1(
            hmac_key(client_secret, token_secret).as_bytes(),
            base_string.as_bytes(),
        )),
        (
            SignatureMethod::HmacSha256,
            KeyMaterial::Shared {
                client_secret,
                token_secret,
            },
        ) => Ok(base64_hmac_sha256(
            hmac_key(client_secret, token_secret).as_bytes(),
            base_string.as_bytes(),
        )),
        (SignatureMethod::RsaSha1, KeyMaterial::RsaPrivateKey(signer)) => {
            let signature = signer.sign_sha1(base_string.as_bytes())?;
            Ok(base64_encode(&signature))
        }
        (
            SignatureMethod::Plaintext,
            KeyMaterial::Shared {
                client_secret,
                token_secret,
            },
        ) => Ok(hmac_key(client_secret, token_secret)),
        (SignatureMethod::RsaSha1, _) => Err(Error::config_invalid(
            "rsa private key is required when using RSA-SHA1 to sign",
        )),
        (method, _) => Err(Error::config_invalid(format!(
            "client and token secrets are required when using {method}"
        ))),
    }
}

/// Verify the signature of a request.
///
/// The base string is rebuilt from `request.params` without
/// `oauth_signature`, and from `request.uri` which must be absolute. Any
/// `Host` header is not taken into account.
///
/// Returns `Ok(false)` if the signature doesn't match.
///
/// # Errors
///
/// - [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument) if
///   `request.uri` is not absolute.
/// - [`ErrorKind::ConfigInvalid`](crate::ErrorKind::ConfigInvalid) if `key`
///   doesn't fit `method`.
/// - [`ErrorKind::DecodeFailed`](crate::ErrorKind::DecodeFailed) if the
///   signature of an HMAC or RSA request is not base64.
pub fn verify(method: SignatureMethod, request: &Request, key: KeyMaterial<'_>) -> Result<bool> {
    if method == SignatureMethod::Plaintext {
        let expected = sign(method, "", key)?;
        let matched = constant_time_eq(expected.as_bytes(), request.signature.as_bytes());
        if !matched {
            debug!("verify {method} failed");
        }
        return Ok(matched);
    }

    match (method, key) {
        (SignatureMethod::RsaSha1, KeyMaterial::RsaPublicKey(_)) => {}
        (SignatureMethod::RsaSha1, _) => {
            return Err(Error::config_invalid(
                "rsa public key is required when using RSA-SHA1 to verify",
            ))
        }
        (_, KeyMaterial::Shared { .. }) => {}
        (method, _) => {
            return Err(Error::config_invalid(format!(
                "client and token secrets are required when using {method}"
            )))
        }
    }

    let params = request
        .params
        .iter()
        .filter(|(k, _)| k != OAUTH_SIGNATURE)
        .cloned()
        .collect::<Vec<_>>();
    let base_string = build_base_string(&request.http_method, &request.uri, &params, None)?;
    let signature = base64_decode(&request.signature)?;

    let matched = match (method, key) {
        (SignatureMethod::RsaSha1, KeyMaterial::RsaPublicKey(verifier)) => {
            verifier.verify_sha1(base_string.as_bytes(), &signature)
        }
        (method, key) => {
            let expected = base64_decode(&sign(method, &base_string, key)?)?;
            constant_time_eq(&expected, &signature)
        }
    };

    if !matched {
        debug!("verify {method} failed: signature base string: {base_string}");
    }
    Ok(matched)
}
