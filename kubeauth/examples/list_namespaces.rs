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


use std::env;

use anyhow::Result;
use bytes::Bytes;
use kubeauth::huaweicloud::Config;
use kubeauth::{default_transport, Transport};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let server = env::var("KUBEAUTH_CCE_URL").unwrap_or_else(|_| "https://127.0.0.1:5443".into());

    // Credentials come from HW_ACCESS_KEY, HW_SECRET_KEY and HW_PROJECT_ID.
    let transport = default_transport(&Config::new())?;

    let req = http::Request::get(format!("{server}/api/v1/namespaces"))
        .header("accept", "application/json")
        .body(Bytes::new())?;
    let resp = transport.send(req).await?;

    println!("Response status: {}", resp.status());
    println!("{}", String::from_utf8_lossy(resp.body()));
    Ok(())
}
