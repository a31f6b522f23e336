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


use std::sync::Arc;

use http::HeaderMap;
use kubeauth_core::layer::{
    header_set, DiagnosticTransport, HeaderInjectionTransport, DEFAULT_COMPONENT,
};
use kubeauth_core::{Context, Result, SignRequest, Transport};
use log::trace;

use crate::{Config, Credential, RequestSigner, SigningTransport};

/// One node of a transport chain, in the order it wraps the base transport.
#[derive(Debug)]
enum Layer {
    Diagnostic,
    Signing(Arc<Credential>),
    HeaderInjection(HeaderMap),
}

/// TransportChainBuilder composes the transports sent requests go through.
///
/// Built chains look like this, outermost first:
///
/// ```text
/// HeaderInjection (only with headers)
///   -> Signing (only with a project id)
///     -> Diagnostic
///       -> base
/// ```
///
/// Caller headers are injected before signing so the signature covers them,
/// and the diagnostic layer sits right above the base transport so it sees
/// every byte that goes on the wire.
///
/// The chain is built once and shared by every request of a client.
///
/// ## Example
///
/// ```no_run
/// use kubeauth_core::{Context, NoopTransport};
/// use kubeauth_huaweicloud_cce::{Credential, TransportChainBuilder};
///
/// # fn main() -> kubeauth_core::Result<()> {
/// let transport = TransportChainBuilder::new(Context::new())
///     .with_credential(Credential::new("AK", "SK", "project-id"))
///     .with_header("X-Custom", "v1")
///     .build(NoopTransport)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TransportChainBuilder {
    ctx: Context,
    credential: Credential,
    headers: Vec<(String, String)>,
    signer: Arc<dyn SignRequest<Credential = Credential>>,
    component: String,
    skip_dump_paths: Vec<String>,
}

impl TransportChainBuilder {
    /// Create a builder for an anonymous chain without extra headers.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            credential: Credential::default(),
            headers: Vec::new(),
            signer: Arc::new(RequestSigner::new()),
            component: DEFAULT_COMPONENT.to_string(),
            skip_dump_paths: Vec::new(),
        }
    }

    /// Create a builder from config.
    ///
    /// The config is taken as is, call [`Config::from_env`] first to pick up
    /// env values.
    pub fn from_config(ctx: Context, config: &Config) -> Result<Self> {
        let credential = config.credential()?;
        Ok(Self::new(ctx)
            .with_credential(credential)
            .with_headers(config.headers.clone()))
    }

    /// Set the credential used to sign requests.
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    /// Add one header set on every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add headers set on every request.
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Replace the signer, the default is [`RequestSigner`].
    pub fn with_signer(mut self, signer: impl SignRequest<Credential = Credential>) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    /// Set the component name diagnostic records are tagged with.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Don't dump requests to this exact path, for example `/openapi/v2`.
    pub fn skip_dump_path(mut self, path: impl Into<String>) -> Self {
        self.skip_dump_paths.push(path.into());
        self
    }

    /// Validate the configuration and list the layers to apply, innermost first.
    fn layers(&self) -> Result<Vec<Layer>> {
        self.credential.validate()?;
        let headers = header_set(self.headers.iter().map(|(k, v)| (k, v)))?;

        let mut layers = vec![Layer::Diagnostic];
        if self.credential.is_anonymous() {
            trace!("do not use Huawei Cloud signing for requests: no project id configured");
        } else {
            trace!("use Huawei Cloud signing for requests");
            layers.push(Layer::Signing(Arc::new(self.credential.clone())));
        }
        if !headers.is_empty() {
            layers.push(Layer::HeaderInjection(headers));
        }
        Ok(layers)
    }

    /// Build the chain around `base` and return its outermost transport.
    pub fn build(self, base: impl Transport) -> Result<Arc<dyn Transport>> {
        let layers = self.layers()?;

        let mut transport: Arc<dyn Transport> = Arc::new(base);
        for layer in layers {
            transport = match layer {
                Layer::Diagnostic => {
                    let mut t = DiagnosticTransport::new(self.ctx.clone(), transport)
                        .with_component(self.component.as_str());
                    for path in &self.skip_dump_paths {
                        t = t.with_skip_path(path.as_str());
                    }
                    Arc::new(t)
                }
                Layer::Signing(credential) => Arc::new(SigningTransport::new(
                    self.ctx.clone(),
                    credential,
                    self.signer.clone(),
                    transport,
                )?),
                Layer::HeaderInjection(headers) => {
                    Arc::new(HeaderInjectionTransport::new(headers, transport))
                }
            };
        }

        Ok(transport)
    }
}
