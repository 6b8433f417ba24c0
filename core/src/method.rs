use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The signature methods defined by [RFC 5849 Section 3.4](https://tools.ietf.org/html/rfc5849#section-3.4),
/// plus HMAC-SHA256.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureMethod {
    /// HMAC-SHA1 over the signature base string.
    HmacSha1,
    /// HMAC-SHA256 over the signature base string.
    HmacSha256,
    /// RSASSA-PKCS1-v1_5 with SHA-1 over the signature base string.
    RsaSha1,
    /// The concatenated secrets, only safe over a secure transport.
    Plaintext,
}

impl SignatureMethod {
    /// The value used in the `oauth_signature_method` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMethod::HmacSha1 => "HMAC-SHA1",
            SignatureMethod::HmacSha256 => "HMAC-SHA256",
            SignatureMethod::RsaSha1 => "RSA-SHA1",
            SignatureMethod::Plaintext => "PLAINTEXT",
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HMAC-SHA1" => Ok(SignatureMethod::HmacSha1),
            "HMAC-SHA256" => Ok(SignatureMethod::HmacSha256),
            "RSA-SHA1" => Ok(SignatureMethod::RsaSha1),
            "PLAINTEXT" => Ok(SignatureMethod::Plaintext),
            v => Err(Error::config_invalid(format!(
                "signature method {v} is not supported"
            ))),
        }
    }
}
