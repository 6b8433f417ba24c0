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

use std::fmt::{self, Debug};

use crate::encode::escape;
use crate::utils::Redact;
use crate::Result;

/// RsaSign produces RSASSA-PKCS1-v1_5 signatures with SHA-1.
///
/// The engine doesn't link against any RSA implementation, callers inject
/// one. Implementations are expected to hold a prepared key and be reused
/// across calls.
pub trait RsaSign: Debug + Send + Sync {
    /// Sign `message` and return the raw signature bytes.
    fn sign_sha1(&self, message: &[u8]) -> Result<Vec<u8>>;
}

/// RsaVerify checks RSASSA-PKCS1-v1_5 signatures with SHA-1.
pub trait RsaVerify: Debug + Send + Sync {
    /// Returns `true` only if `signature` is valid for `message`.
    fn verify_sha1(&self, message: &[u8], signature: &[u8]) -> bool;
}

/// Key material used to sign or verify one request.
///
/// It's borrowed for the duration of a call and never retained.
#[derive(Clone, Copy)]
pub enum KeyMaterial<'a> {
    /// Shared secrets used by HMAC-SHA1, HMAC-SHA256 and PLAINTEXT.
    ///
    /// An absent secret is the empty string.
    Shared {
        /// The client shared-secret.
        client_secret: &'a str,
        /// The token shared-secret.
        token_secret: &'a str,
    },
    /// RSA private key used to sign with RSA-SHA1.
    RsaPrivateKey(&'a dyn RsaSign),
    /// RSA public key used to verify RSA-SHA1.
    RsaPublicKey(&'a dyn RsaVerify),
}

impl<'a> KeyMaterial<'a> {
    /// Create shared key material from client and token secrets.
    pub fn shared(client_secret: &'a str, token_secret: &'a str) -> Self {
        KeyMaterial::Shared {
            client_secret,
            token_secret,
        }
    }

    /// Create shared key material with only a client secret, used before a
    /// token has been issued.
    pub fn client_only(client_secret: &'a str) -> Self {
        Self::shared(client_secret, "")
    }
}

impl Debug for KeyMaterial<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::Shared {
                client_secret,
                token_secret,
            } => f
                .debug_struct("Shared")
                .field("client_secret", &Redact::from(*client_secret))
                .field("token_secret", &Redact::from(*token_secret))
                .finish(),
            KeyMaterial::RsaPrivateKey(_) => f.write_str("RsaPrivateKey(<redacted>)"),
            KeyMaterial::RsaPublicKey(key) => f.debug_tuple("RsaPublicKey").field(key).finish(),
        }
    }
}

/// Concatenate the encoded client and token secrets with `&`.
///
/// This is the HMAC key and the PLAINTEXT signature. The `&` is present even
/// when both secrets are empty.
pub fn hmac_key(client_secret: &str, token_secret: &str) -> String {
    let mut key = escape(client_secret);
    key.push('&');
    key.push_str(&escape(token_secret));
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hmac_key() {
        assert_eq!(hmac_key("", ""), "&");
        assert_eq!(hmac_key("abc", "def"), "abc&def");
        assert_eq!(hmac_key("kd94hf93k423kf44", ""), "kd94hf93k423kf44&");
        assert_eq!(hmac_key("a b", "c&d"), "a%20b&c%26d");
    }

    #[test]
    fn test_key_material_debug_is_redacted() {
        let key = KeyMaterial::shared("kd94hf93k423kf44", "");
        let output = format!("{key:?}");

        assert!(!output.contains("kd94hf93k423kf44"));
        assert_eq!(
            output,
            "Shared { client_secret: ***(16 bytes), token_secret: EMPTY }"
        );
    }
}
