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


//! Signed transports for Huawei Cloud CCE clusters.
//!
//! [`TransportChainBuilder`] is the entry point: it turns a [`Credential`]
//! and a set of extra headers into one [`kubeauth_core::Transport`] that
//! logs, signs and decorates every request before the base transport sends it.

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::RequestSigner;

mod transport;
pub use transport::SigningTransport;

mod chain;
pub use chain::TransportChainBuilder;

pub mod constants;
