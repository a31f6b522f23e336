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


use crate::{Context, Result};
use std::fmt::Debug;

/// SigningCredential is the trait used by signer as the signing credential.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is usable for signing.
    fn is_valid(&self) -> bool;
}

/// SignRequest authenticates an in-flight request.
///
/// The signer mutates the request parts in place: it adds or overwrites the
/// headers it owns (signature, timestamp, ...) and must never remove any other
/// header. For a fixed signing time the result must be deterministic, and
/// signing the same request twice must yield the same headers.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the request.
    ///
    /// `body` is the full payload that will be sent along with `parts`.
    async fn sign_request(
        &self,
        ctx: &Context,
        parts: &mut http::request::Parts,
        body: &[u8],
        credential: &Self::Credential,
    ) -> Result<()>;
}
