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


//! Core components for signed, observable Kubernetes API transports.
//!
//! ## Overview
//!
//! The crate is built around a few concepts:
//!
//! - **Transport**: anything that turns an `http::Request<Bytes>` into an
//!   `http::Response<Bytes>`. Base network clients and the layers wrapping them
//!   share this trait.
//! - **Layers**: transports that own one downstream transport and mutate or
//!   observe requests on their way through, see [`layer`].
//! - **Context**: a container for process-level capabilities such as the
//!   environment and the diagnostic log sink.
//! - **SignRequest**: the capability that authenticates a request in place.
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use kubeauth_core::layer::{header_set, DiagnosticTransport, HeaderInjectionTransport};
//! use kubeauth_core::{Context, NoopTransport, Result, Transport};
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new();
//! let transport = HeaderInjectionTransport::new(
//!     header_set([("X-Custom", "v1")])?,
//!     DiagnosticTransport::new(ctx, NoopTransport),
//! );
//!
//! let req = http::Request::get("https://cce.example.com/api").body(Bytes::new())?;
//! let _resp = transport.send(req).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod layer;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, LogCrateSink, LogSink, NoopEnv, NoopLogSink, OsEnv, StaticEnv};
pub use context::LOG_TARGET;

mod error;
pub use error::{Error, ErrorKind, Result};

mod transport;
pub use transport::{NoopTransport, Transport};

mod api;
pub use api::{SignRequest, SigningCredential};
