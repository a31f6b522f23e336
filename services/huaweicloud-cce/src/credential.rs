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


use std::fmt::{Debug, Formatter};

use kubeauth_core::{utils::Redact, Error, Result, SigningCredential};

/// Credential for Huawei Cloud CCE.
///
/// An empty `project_id` means anonymous access: requests are sent without
/// project headers or signature. A credential that carries keys without a
/// project is rejected by [`Credential::validate`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    /// Access key for cce
    pub access_key: String,
    /// Secret key for cce
    pub secret_key: String,
    /// Project which contains the cluster.
    pub project_id: String,
    /// security_token for temporary credentials.
    pub security_token: Option<String>,
}

impl Credential {
    /// Create a new credential.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            project_id: project_id.into(),
            security_token: None,
        }
    }

    /// Set the security token, an empty token is treated as absent.
    pub fn with_security_token(mut self, security_token: impl Into<String>) -> Self {
        let token = security_token.into();
        self.security_token = (!token.is_empty()).then_some(token);
        self
    }

    /// Whether requests built with this credential go out unsigned.
    pub fn is_anonymous(&self) -> bool {
        self.project_id.is_empty()
    }

    /// Check that the project and both keys are configured together or not at all.
    pub fn validate(&self) -> Result<()> {
        let keys = [&self.access_key, &self.secret_key];
        let partial = if self.project_id.is_empty() {
            keys.iter().any(|k| !k.is_empty())
        } else {
            keys.iter().any(|k| k.is_empty())
        };
        if partial {
            return Err(Error::config_invalid(
                r#""hw_project_id", "hw_access_key" and "hw_secret_key" are required"#,
            ));
        }
        Ok(())
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key", &Redact::from(&self.access_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("project_id", &self.project_id)
            .field(
                "security_token",
                &self.security_token.as_ref().map(Redact::from),
            )
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.access_key.is_empty() && !self.secret_key.is_empty()
    }
}
