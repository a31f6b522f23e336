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


//! Base [`Transport`] backed by [`reqwest`].
//!
//! Connection pooling, TLS, proxies and timeouts are all configured on the
//! [`reqwest::Client`] handed to [`ReqwestTransport::new`]; a timeout surfaces
//! as an ordinary [`ErrorKind::Transport`](kubeauth_core::ErrorKind::Transport)
//! error through every layer of the chain.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use kubeauth_core::{Error, Result, Transport};
use log::trace;
use reqwest::{Client, Request};

/// ReqwestTransport sends requests over the network with a reqwest client.
#[derive(Debug, Default, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new ReqwestTransport with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        trace!("sending {} {}", req.method(), req.uri());

        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("request can't be converted for reqwest").with_source(e)
        })?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport(format!("sending request failed: {e}")).with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::transport(format!("reading response body failed: {e}")).with_source(e)
            })?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubeauth_core::ErrorKind;

    #[tokio::test]
    async fn test_relative_uri_is_invalid() -> anyhow::Result<()> {
        let transport = ReqwestTransport::default();
        let req = http::Request::get("/api/v1/namespaces").body(Bytes::new())?;

        let err = transport.send(req).await.expect_err("must fail");
        assert_eq!(ErrorKind::RequestInvalid, err.kind());
        Ok(())
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let transport = ReqwestTransport::default();
        let req = http::Request::get("http://127.0.0.1:1/api").body(Bytes::new())?;

        let err = transport.send(req).await.expect_err("must fail");
        assert_eq!(ErrorKind::Transport, err.kind());
        Ok(())
    }
}
