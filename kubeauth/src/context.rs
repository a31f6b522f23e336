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

use kubeauth_core::{Context, LogCrateSink, OsEnv, Result, Transport};
use kubeauth_huaweicloud_cce::{Config, TransportChainBuilder};
use kubeauth_transport_reqwest::ReqwestTransport;

/// Build a transport chain for the process environment.
///
/// Unset config values are loaded from the `HW_*` env vars, records go to the
/// `log` crate and requests are sent with a default reqwest client.
pub fn default_transport(config: &Config) -> Result<Arc<dyn Transport>> {
    default_transport_with_client(config, reqwest::Client::new())
}

/// Same as [`default_transport`] with a caller configured reqwest client.
///
/// Use this to set timeouts, proxies or extra root certificates.
pub fn default_transport_with_client(
    config: &Config,
    client: reqwest::Client,
) -> Result<Arc<dyn Transport>> {
    let ctx = Context::new().with_env(OsEnv).with_log_sink(LogCrateSink);
    let config = config.clone().from_env(&ctx);

    TransportChainBuilder::from_config(ctx, &config)?
        .skip_dump_path("/openapi/v2")
        .build(ReqwestTransport::new(client))
}
