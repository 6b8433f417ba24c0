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

//! RSA-SHA1 for oauth1-signature, built on the RustCrypto `rsa` crate.
//!
//! This crate provides `RsaSha1Signer` and `RsaSha1Verifier`, which implement
//! the `RsaSign` and `RsaVerify` traits from `oauth1_signature_core` with
//! RSASSA-PKCS1-v1_5 over SHA-1.
//!
//! ## Overview
//!
//! Keys are parsed once when the signer or verifier is created. Both types
//! are `Send + Sync` and can be shared across threads for any number of
//! requests.
//!
//! ## Example
//!
//! ```no_run
//! use oauth1_signature_core::{build_base_string, sign, verify, KeyMaterial, Request, SignatureMethod};
//! use oauth1_signature_rsa::RsaSha1Signer;
//!
//! # fn main() -> anyhow::Result<()> {
//! let pem = std::fs::read_to_string("/path/to/private_key.pem")?;
//! let signer = RsaSha1Signer::from_pem(&pem)?;
//! let verifier = signer.verifier();
//!
//! let params = vec![("oauth_consumer_key".to_string(), "dpf43f3p2l4k3l03".to_string())];
//! let base_string = build_base_string("GET", "http://photos.example.net/photos", &params, None)?;
//! let signature = sign(SignatureMethod::RsaSha1, &base_string, KeyMaterial::RsaPrivateKey(&signer))?;
//!
//! let request = Request::new("GET", "http://photos.example.net/photos", params, signature);
//! assert!(verify(SignatureMethod::RsaSha1, &request, KeyMaterial::RsaPublicKey(&verifier))?);
//! # Ok(())
//! # }
//! ```

use std::fmt::{Debug, Formatter};

use log::trace;
use oauth1_signature_core::{Error, Result, RsaSign, RsaVerify};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;

/// RustCrypto implementation of the `RsaSign` trait.
///
/// Signs with RSASSA-PKCS1-v1_5 and SHA-1.
#[derive(Clone)]
pub struct RsaSha1Signer {
    key: SigningKey<Sha1>,
    public_key: RsaPublicKey,
}

impl Debug for RsaSha1Signer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaSha1Signer")
            .field("bits", &(self.public_key.size() * 8))
            .finish_non_exhaustive()
    }
}

impl RsaSha1Signer {
    /// Create a signer from a parsed private key.
    pub fn new(private_key: RsaPrivateKey) -> Self {
        let public_key = private_key.to_public_key();
        Self {
            key: SigningKey::<Sha1>::new(private_key),
            public_key,
        }
    }

    /// Load a private key in PKCS#1 PEM (`BEGIN RSA PRIVATE KEY`).
    pub fn from_pkcs1_pem(pem: &str) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs1_pem(pem).map_err(|e| {
            Error::config_invalid("failed to read pkcs1 rsa private key")
                .with_source(anyhow::Error::msg(e))
        })?;
        Ok(Self::new(private_key))
    }

    /// Load a private key in PKCS#8 PEM (`BEGIN PRIVATE KEY`).
    pub fn from_pkcs8_pem(pem: &str) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs8_pem(pem).map_err(|e| {
            Error::config_invalid("failed to read pkcs8 rsa private key")
                .with_source(anyhow::Error::msg(e))
        })?;
        Ok(Self::new(private_key))
    }

    /// Load a private key in either PKCS#8 or PKCS#1 PEM.
    pub fn from_pem(pem: &str) -> Result<Self> {
        Self::from_pkcs8_pem(pem).or_else(|_| {
            trace!("private key is not pkcs8, trying pkcs1");
            Self::from_pkcs1_pem(pem)
        })
    }

    /// Build the verifier of the public half of this key.
    pub fn verifier(&self) -> RsaSha1Verifier {
        RsaSha1Verifier::new(self.public_key.clone())
    }
}

impl RsaSign for RsaSha1Signer {
    fn sign_sha1(&self, message: &[u8]) -> Result<Vec<u8>> {
        let signature = self.key.try_sign(message).map_err(|e| {
            Error::unexpected("failed to sign with rsa-sha1").with_source(anyhow::Error::msg(e))
        })?;
        Ok(signature.to_vec())
    }
}

/// RustCrypto implementation of the `RsaVerify` trait.
#[derive(Debug, Clone)]
pub struct RsaSha1Verifier {
    key: VerifyingKey<Sha1>,
}

impl RsaSha1Verifier {
    /// Create a verifier from a parsed public key.
    pub fn new(public_key: RsaPublicKey) -> Self {
        Self {
            key: VerifyingKey::<Sha1>::new(public_key),
        }
    }

    /// Load a public key in PKCS#1 PEM (`BEGIN RSA PUBLIC KEY`).
    pub fn from_pkcs1_pem(pem: &str) -> Result<Self> {
        let public_key = RsaPublicKey::from_pkcs1_pem(pem).map_err(|e| {
            Error::config_invalid("failed to read pkcs1 rsa public key")
                .with_source(anyhow::Error::msg(e))
        })?;
        Ok(Self::new(public_key))
    }

    /// Load a public key in SubjectPublicKeyInfo PEM (`BEGIN PUBLIC KEY`).
    pub fn from_public_key_pem(pem: &str) -> Result<Self> {
        let public_key = RsaPublicKey::from_public_key_pem(pem).map_err(|e| {
            Error::config_invalid("failed to read rsa public key")
                .with_source(anyhow::Error::msg(e))
        })?;
        Ok(Self::new(public_key))
    }

    /// Load a public key in either SubjectPublicKeyInfo or PKCS#1 PEM.
    pub fn from_pem(pem: &str) -> Result<Self> {
        Self::from_public_key_pem(pem).or_else(|_| {
            trace!("public key is not spki, trying pkcs1");
            Self::from_pkcs1_pem(pem)
        })
    }
}

impl RsaVerify for RsaSha1Verifier {
    fn verify_sha1(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = Signature::try_from(signature) else {
            trace!("rsa-sha1 signature is malformed");
            return false;
        };

        match self.key.verify(message, &signature) {
            Ok(()) => true,
            Err(e) => {
                trace!("rsa-sha1 signature mismatch: {e}");
                false
            }
        }
    }
}
