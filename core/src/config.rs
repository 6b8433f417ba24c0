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

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use log::debug;

use crate::utils::Redact;
use crate::KeyMaterial;
use crate::Result;
use crate::SignatureMethod;

/// Env var for the signature method, e.g. `HMAC-SHA1`.
pub const OAUTH1_SIGNATURE_METHOD: &str = "OAUTH1_SIGNATURE_METHOD";
/// Env var for the client shared-secret.
pub const OAUTH1_CLIENT_SECRET: &str = "OAUTH1_CLIENT_SECRET";
/// Env var for the token shared-secret.
pub const OAUTH1_TOKEN_SECRET: &str = "OAUTH1_TOKEN_SECRET";

/// Env provides access to environment variables.
pub trait Env: Debug + Send + Sync + 'static {
    /// Get an environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns an hashmap of (variable, value) pairs of strings, for all the
    /// environment variables of the current process.
    fn vars(&self) -> HashMap<String, String>;
}

/// Implements Env for the OS context.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }

    fn vars(&self) -> HashMap<String, String> {
        std::env::vars().collect()
    }
}

/// StaticEnv provides a static env environment.
///
/// This is useful for testing or for providing a fixed environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The environment variables to use.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }

    fn vars(&self) -> HashMap<String, String> {
        self.envs.clone()
    }
}

/// Config carries the shared secrets and signature method of a client or
/// server.
///
/// Secrets are redacted in `Debug` output.
#[derive(Clone, Default)]
pub struct Config {
    /// Name of the signature method, `HMAC-SHA1` if unset.
    pub signature_method: Option<String>,
    /// The client shared-secret.
    pub client_secret: Option<String>,
    /// The token shared-secret.
    pub token_secret: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("signature_method", &self.signature_method)
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("token_secret", &Redact::from(&self.token_secret))
            .finish()
    }
}

impl Config {
    /// Load config from env.
    pub fn from_env(env: &impl Env) -> Self {
        let config = Self {
            signature_method: env.var(OAUTH1_SIGNATURE_METHOD),
            client_secret: env.var(OAUTH1_CLIENT_SECRET),
            token_secret: env.var(OAUTH1_TOKEN_SECRET),
        };
        debug!("oauth1 config loaded from env: {config:?}");
        config
    }

    /// Parse the configured signature method.
    pub fn signature_method(&self) -> Result<SignatureMethod> {
        match &self.signature_method {
            Some(v) => v.parse(),
            None => Ok(SignatureMethod::HmacSha1),
        }
    }

    /// Borrow the configured secrets as shared key material.
    ///
    /// Absent secrets are used as empty strings.
    pub fn key_material(&self) -> KeyMaterial<'_> {
        KeyMaterial::shared(
            self.client_secret.as_deref().unwrap_or_default(),
            self.token_secret.as_deref().unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    fn static_env(envs: &[(&str, &str)]) -> StaticEnv {
        StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_config_from_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let env = static_env(&[
            (OAUTH1_SIGNATURE_METHOD, "PLAINTEXT"),
            (OAUTH1_CLIENT_SECRET, "kd94hf93k423kf44"),
            (OAUTH1_TOKEN_SECRET, "pfkkdhi9sl3r4s00"),
        ]);
        let config = Config::from_env(&env);

        assert_eq!(config.signature_method().unwrap(), SignatureMethod::Plaintext);
        let KeyMaterial::Shared {
            client_secret,
            token_secret,
        } = config.key_material()
        else {
            panic!("expected shared key material");
        };
        assert_eq!(client_secret, "kd94hf93k423kf44");
        assert_eq!(token_secret, "pfkkdhi9sl3r4s00");
    }

    /// Only answers lookups of single variables.
    #[derive(Debug)]
    struct LookupOnlyEnv(StaticEnv);

    impl Env for LookupOnlyEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.var(key)
        }

        fn vars(&self) -> HashMap<String, String> {
            HashMap::new()
        }
    }

    #[test]
    fn test_config_from_env_reads_each_var() {
        let env = LookupOnlyEnv(static_env(&[
            (OAUTH1_SIGNATURE_METHOD, "HMAC-SHA256"),
            (OAUTH1_CLIENT_SECRET, "kd94hf93k423kf44"),
        ]));
        let config = Config::from_env(&env);

        assert_eq!(config.signature_method.as_deref(), Some("HMAC-SHA256"));
        assert_eq!(config.client_secret.as_deref(), Some("kd94hf93k423kf44"));
        assert_eq!(config.token_secret, None);
    }

    #[test]
    fn test_config_from_empty_env() {
        let config = Config::from_env(&StaticEnv::default());

        assert_eq!(config.signature_method().unwrap(), SignatureMethod::HmacSha1);
        let KeyMaterial::Shared {
            client_secret,
            token_secret,
        } = config.key_material()
        else {
            panic!("expected shared key material");
        };
        assert_eq!(client_secret, "");
        assert_eq!(token_secret, "");
    }

    #[test]
    fn test_config_unknown_signature_method() {
        let config = Config::from_env(&static_env(&[(OAUTH1_SIGNATURE_METHOD, "HMAC-MD5")]));

        let err = config.signature_method().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_config_debug_is_redacted() {
        let config = Config {
            signature_method: None,
            client_secret: Some("kd94hf93k423kf44".to_string()),
            token_secret: None,
        };

        assert_eq!(
            format!("{config:?}"),
            "Config { signature_method: None, client_secret: ***(16 bytes), token_secret: EMPTY }"
        );
    }
}
