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


use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;

use crate::{Error, Result, Transport};

/// Build a header set from caller supplied name/value pairs.
///
/// Names and values are validated here so that a bad header is reported while
/// building a chain instead of on the first request.
pub fn header_set<I, K, V>(headers: I) -> Result<HeaderMap>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut set = HeaderMap::new();
    for (name, value) in headers {
        let (name, value) = (name.as_ref(), value.as_ref());
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            Error::config_invalid(format!("invalid header name {name:?}")).with_source(e)
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            Error::config_invalid(format!("invalid value for header {name:?}")).with_source(e)
        })?;
        set.insert(header_name, header_value);
    }
    Ok(set)
}

/// HeaderInjectionTransport sets a fixed header set on every request.
///
/// Existing values are overwritten, not merged.
#[derive(Debug)]
pub struct HeaderInjectionTransport<T: Transport> {
    headers: HeaderMap,
    next: T,
}

impl<T: Transport> HeaderInjectionTransport<T> {
    /// Wrap `next` so that every request carries `headers`.
    pub fn new(headers: HeaderMap, next: T) -> Self {
        Self { headers, next }
    }
}

#[async_trait::async_trait]
impl<T: Transport> Transport for HeaderInjectionTransport<T> {
    async fn send(&self, mut req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        for (name, value) in &self.headers {
            req.headers_mut().insert(name.clone(), value.clone());
        }
        self.next.send(req).await
    }
}
