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

use kubeauth_core::{utils::Redact, Context, Result};

use crate::constants::*;
use crate::Credential;

/// Config carries all the configuration for a Huawei Cloud CCE transport chain.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HW_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HW_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `project_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HW_PROJECT_ID`]
    pub project_id: Option<String>,
    /// `security_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HW_SECURITY_TOKEN`]
    pub security_token: Option<String>,
    /// Extra headers set on every request.
    pub headers: HashMap<String, String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_key
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set project_id
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set security_token
    pub fn with_security_token(mut self, security_token: impl Into<String>) -> Self {
        self.security_token = Some(security_token.into());
        self
    }

    /// Add an extra header, a later value for the same name replaces the former.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Load config from env.
    ///
    /// Values already set win over env values, empty env values are ignored.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let load = |key: &str| ctx.env_var(key).filter(|v| !v.is_empty());

        if let Some(v) = load(HW_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = load(HW_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = load(HW_PROJECT_ID) {
            self.project_id.get_or_insert(v);
        }
        if let Some(v) = load(HW_SECURITY_TOKEN) {
            self.security_token.get_or_insert(v);
        }

        self
    }

    /// Build the validated credential described by this config.
    pub fn credential(&self) -> Result<Credential> {
        let cred = Credential::new(
            self.access_key.clone().unwrap_or_default(),
            self.secret_key.clone().unwrap_or_default(),
            self.project_id.clone().unwrap_or_default(),
        )
        .with_security_token(self.security_token.clone().unwrap_or_default());

        cred.validate()?;
        Ok(cred)
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &self.access_key.as_ref().map(Redact::from))
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .field("project_id", &self.project_id)
            .field(
                "security_token",
                &self.security_token.as_ref().map(Redact::from),
            )
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubeauth_core::{ErrorKind, OsEnv, StaticEnv};

    fn static_env(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }

    #[test]
    fn test_from_env() -> anyhow::Result<()> {
        let ctx = static_env(&[
            (HW_ACCESS_KEY, "AK"),
            (HW_SECRET_KEY, "SK"),
            (HW_PROJECT_ID, "proj-1"),
            (HW_SECURITY_TOKEN, "token"),
        ]);

        let cred = Config::new().from_env(&ctx).credential()?;
        assert_eq!(
            Credential::new("AK", "SK", "proj-1").with_security_token("token"),
            cred
        );
        Ok(())
    }

    #[test]
    fn test_explicit_values_win_over_env() -> anyhow::Result<()> {
        let ctx = static_env(&[(HW_PROJECT_ID, "proj-env"), (HW_ACCESS_KEY, "AK-env")]);

        let cred = Config::new()
            .with_project_id("proj-1")
            .with_access_key("AK")
            .with_secret_key("SK")
            .from_env(&ctx)
            .credential()?;
        assert_eq!("proj-1", cred.project_id);
        assert_eq!("AK", cred.access_key);
        Ok(())
    }

    #[test]
    fn test_empty_env_values_are_ignored() -> anyhow::Result<()> {
        let ctx = static_env(&[(HW_PROJECT_ID, ""), (HW_SECURITY_TOKEN, "")]);

        let cred = Config::new().from_env(&ctx).credential()?;
        assert!(cred.is_anonymous());
        assert_eq!(None, cred.security_token);
        Ok(())
    }

    #[test]
    fn test_partial_credential_is_config_error() {
        let err = Config::new()
            .with_access_key("AK")
            .with_secret_key("SK")
            .credential()
            .expect_err("must fail");
        assert_eq!(ErrorKind::ConfigInvalid, err.kind());
    }

    #[test]
    fn test_from_os_env() {
        temp_env::with_vars(
            vec![
                (HW_ACCESS_KEY, Some("os-ak")),
                (HW_SECRET_KEY, Some("os-sk")),
                (HW_PROJECT_ID, Some("os-project")),
                (HW_SECURITY_TOKEN, None),
            ],
            || {
                let ctx = Context::new().with_env(OsEnv);
                let cred = Config::new()
                    .from_env(&ctx)
                    .credential()
                    .expect("credential must be valid");

                assert_eq!("os-ak", cred.access_key);
                assert_eq!("os-sk", cred.secret_key);
                assert_eq!("os-project", cred.project_id);
                assert_eq!(None, cred.security_token);
            },
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let cfg = Config::new()
            .with_secret_key("very-secret-key-value")
            .with_header("X-Custom", "v1");
        let s = format!("{cfg:?}");
        assert!(!s.contains("very-secret-key-value"));
        assert!(s.contains("X-Custom"));
    }
}
