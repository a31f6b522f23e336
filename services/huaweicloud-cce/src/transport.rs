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
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::HeaderValue;
use kubeauth_core::{Context, Error, ErrorKind, Result, SignRequest, Transport};
use log::error;

use crate::constants::*;
use crate::Credential;

/// SigningTransport authenticates every request before delegating it.
///
/// It sets `X-Project-Id` (and `X-Security-Token` when the credential has
/// one), then lets the signer add its own headers. A request that fails to be
/// signed is never handed to the downstream transport.
pub struct SigningTransport<T: Transport> {
    ctx: Context,
    credential: Arc<Credential>,
    project_id: HeaderValue,
    security_token: Option<HeaderValue>,
    signer: Arc<dyn SignRequest<Credential = Credential>>,
    next: T,
}

impl<T: Transport> SigningTransport<T> {
    /// Wrap `next` with request signing.
    ///
    /// Fails if the project id or security token can't be used as header values.
    pub fn new(
        ctx: Context,
        credential: Arc<Credential>,
        signer: Arc<dyn SignRequest<Credential = Credential>>,
        next: T,
    ) -> Result<Self> {
        let project_id = HeaderValue::from_str(&credential.project_id).map_err(|e| {
            Error::config_invalid("project id is not a valid header value").with_source(e)
        })?;
        let security_token = match &credential.security_token {
            Some(token) => {
                let mut v = HeaderValue::from_str(token).map_err(|e| {
                    Error::config_invalid("security token is not a valid header value")
                        .with_source(e)
                })?;
                v.set_sensitive(true);
                Some(v)
            }
            None => None,
        };

        Ok(Self {
            ctx,
            credential,
            project_id,
            security_token,
            signer,
            next,
        })
    }
}

impl<T: Transport> Debug for SigningTransport<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningTransport")
            .field("credential", &self.credential)
            .field("signer", &self.signer)
            .field("next", &self.next)
            .finish()
    }
}

#[async_trait]
impl<T: Transport> Transport for SigningTransport<T> {
    async fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (mut parts, body) = req.into_parts();

        parts.headers.insert(X_PROJECT_ID, self.project_id.clone());
        if let Some(token) = &self.security_token {
            parts.headers.insert(X_SECURITY_TOKEN, token.clone());
        }

        if let Err(err) = self
            .signer
            .sign_request(&self.ctx, &mut parts, &body, &self.credential)
            .await
        {
            error!("error signing request: {err}");
            return Err(match err.kind() {
                ErrorKind::SignFailed => err,
                _ => Error::sign_failed(format!("error signing request: {err}")).with_source(err),
            });
        }

        self.next.send(http::Request::from_parts(parts, body)).await
    }
}
