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


use crate::Result;
use bytes::Bytes;
use std::fmt::Debug;
use std::sync::Arc;

/// Transport handles one request and returns its response.
///
/// Every node of a transport chain implements this trait: the base network
/// transport as well as the layers that wrap it. A layer owns exactly one
/// downstream transport and may mutate the request before delegating.
///
/// Implementations must be safe for concurrent reuse: a chain is built once
/// and shared by every request of a client.
#[async_trait::async_trait]
pub trait Transport: Debug + Send + Sync + 'static {
    /// Send the request and return the response.
    async fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    #[inline]
    async fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.as_ref().send(req).await
    }
}

/// NoopTransport is a base transport that always returns an error.
///
/// This is used when no base transport is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTransport;

#[async_trait::async_trait]
impl Transport for NoopTransport {
    async fn send(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(crate::Error::transport(
            "sending not supported: no base transport configured",
        ))
    }
}
