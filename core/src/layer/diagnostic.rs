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


use std::fmt::Write;

use bytes::Bytes;
use log::Level;

use super::RedactingFormatter;
use crate::utils::canonical_header_name;
use crate::{Context, Result, Transport};

/// Component name used when none is given.
pub const DEFAULT_COMPONENT: &str = "Kubernetes";

const RULE: &str = "------------------------------------------------------";

/// DiagnosticTransport logs every request and response passing through it.
///
/// When the context reports debug logging as disabled, requests go straight
/// to the downstream transport without any dump or format work. Otherwise the
/// request is dumped, redacted and emitted before it is sent, and the response
/// is dumped after it comes back. Failing to dump is reported at error level
/// and never fails the request.
#[derive(Debug)]
pub struct DiagnosticTransport<T: Transport> {
    ctx: Context,
    component: String,
    skip_paths: Vec<String>,
    formatter: RedactingFormatter,
    next: T,
}

impl<T: Transport> DiagnosticTransport<T> {
    /// Wrap `next` with diagnostic logging tagged as [`DEFAULT_COMPONENT`].
    pub fn new(ctx: Context, next: T) -> Self {
        Self {
            ctx,
            component: DEFAULT_COMPONENT.to_string(),
            skip_paths: Vec::new(),
            formatter: RedactingFormatter::new(),
            next,
        }
    }

    /// Set the component name records are tagged with.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Never dump requests to this exact path.
    ///
    /// Useful for huge documents like `/openapi/v2`.
    pub fn with_skip_path(mut self, path: impl Into<String>) -> Self {
        self.skip_paths.push(path.into());
        self
    }

    fn should_dump(&self, req: &http::Request<Bytes>) -> bool {
        self.ctx.is_debug_enabled() && !self.skip_paths.iter().any(|p| p == req.uri().path())
    }

    fn emit(&self, kind: &str, dump: Result<String>) {
        match dump {
            Ok(dump) => {
                let record = format!(
                    "{} API {} Details:\n----[ {} ]{}\n{}\n{RULE}",
                    self.component,
                    kind,
                    kind.to_uppercase(),
                    &RULE[kind.len() + 8..],
                    self.formatter.format(dump.as_bytes()),
                );
                self.ctx.emit(Level::Debug, &self.component, &record);
            }
            Err(err) => {
                let record = format!("{} API {} error: {:?}", self.component, kind, err);
                self.ctx.emit(Level::Error, &self.component, &record);
            }
        }
    }
}

#[async_trait::async_trait]
impl<T: Transport> Transport for DiagnosticTransport<T> {
    async fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        if !self.should_dump(&req) {
            return self.next.send(req).await;
        }

        self.emit("Request", dump_request(&req));
        let resp = self.next.send(req).await?;
        if self.ctx.is_debug_enabled() {
            self.emit("Response", dump_response(&resp));
        }

        Ok(resp)
    }
}

/// Dump a request in HTTP/1.x wire form: request line, headers, blank line, body.
pub fn dump_request(req: &http::Request<Bytes>) -> Result<String> {
    let mut s = String::with_capacity(256 + req.body().len());
    let target = req
        .uri()
        .path_and_query()
        .map(|v| v.as_str())
        .unwrap_or("/");
    write!(s, "{} {} {:?}\r\n", req.method(), target, req.version())?;
    if !req.headers().contains_key(http::header::HOST) {
        if let Some(authority) = req.uri().authority() {
            write!(s, "Host: {authority}\r\n")?;
        }
    }
    write_headers(&mut s, req.headers())?;
    write_body(&mut s, req.body())?;

    Ok(s)
}

/// Dump a response in HTTP/1.x wire form: status line, headers, blank line, body.
pub fn dump_response(resp: &http::Response<Bytes>) -> Result<String> {
    let mut s = String::with_capacity(256 + resp.body().len());
    write!(s, "{:?} {}\r\n", resp.version(), resp.status())?;
    write_headers(&mut s, resp.headers())?;
    write_body(&mut s, resp.body())?;

    Ok(s)
}

fn write_headers(s: &mut String, headers: &http::HeaderMap) -> Result<()> {
    for (name, value) in headers {
        write!(
            s,
            "{}: {}\r\n",
            canonical_header_name(name.as_str()),
            String::from_utf8_lossy(value.as_bytes())
        )?;
    }
    Ok(())
}

fn write_body(s: &mut String, body: &Bytes) -> Result<()> {
    s.write_str("\r\n")?;
    s.write_str(&String::from_utf8_lossy(body))?;
    Ok(())
}
