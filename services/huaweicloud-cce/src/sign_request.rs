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


//! Huawei Cloud API Gateway request signer.

use std::collections::BTreeMap;

use async_trait::async_trait;
use http::header::{AUTHORIZATION, HOST};
use http::request::Parts;
use http::HeaderValue;
use kubeauth_core::hash::{hex_hmac_sha256, hex_sha256};
use kubeauth_core::time::{format_iso8601, now, parse_iso8601, DateTime};
use kubeauth_core::{Context, Error, Result, SignRequest, SigningCredential};
use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};

use crate::constants::*;
use crate::Credential;

/// RequestSigner that implements the Huawei Cloud API Gateway signature.
///
/// - [API Signing Guide](https://support.huaweicloud.com/intl/en-us/devg-apisign/api-sign-algorithm.html)
///
/// The signer sets `X-Sdk-Date` unless the request already carries a valid
/// one, then signs every header present on the request (plus `host`) and
/// writes the `Authorization` header. No other header is touched, so signing
/// the same request twice yields the same result.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        parts: &mut Parts,
        body: &[u8],
        cred: &Self::Credential,
    ) -> Result<()> {
        if !cred.is_valid() {
            return Err(Error::sign_failed(
                "access key and secret key are required to sign requests",
            ));
        }

        let existing = parts
            .headers
            .get(X_SDK_DATE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| parse_iso8601(v).ok());
        let now = match existing {
            Some(t) => t,
            None => {
                let t = self.time.unwrap_or_else(now);
                parts
                    .headers
                    .insert(X_SDK_DATE, HeaderValue::from_str(&format_iso8601(t))?);
                t
            }
        };

        let headers = signed_headers(parts)?;
        let signed_names = headers.keys().cloned().collect::<Vec<_>>().join(";");

        let creq = canonical_request(parts, &headers, &signed_names, body)?;
        debug!("calculated canonical request: {creq}");

        // StringToSign:
        //
        // SDK-HMAC-SHA256
        // 20220313T072004Z
        // <hashed_canonical_request>
        let string_to_sign = format!(
            "{SIGNING_ALGORITHM}\n{}\n{}",
            format_iso8601(now),
            hex_sha256(creq.as_bytes())
        );
        debug!("calculated string to sign: {string_to_sign}");

        let signature = hex_hmac_sha256(cred.secret_key.as_bytes(), string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "{SIGNING_ALGORITHM} Access={}, SignedHeaders={}, Signature={}",
            cred.access_key, signed_names, signature
        ))?;
        authorization.set_sensitive(true);
        parts.headers.insert(AUTHORIZATION, authorization);

        Ok(())
    }
}

/// Lowercase header name to sorted, trimmed values; `authorization` excluded.
///
/// Values are read from their raw bytes, so non-ASCII text like `café` is
/// signed as sent instead of being rejected.
fn signed_headers(parts: &Parts) -> Result<BTreeMap<String, Vec<String>>> {
    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in parts.headers.iter() {
        if name == AUTHORIZATION {
            continue;
        }
        headers
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).trim().to_string());
    }

    if !headers.contains_key(HOST.as_str()) {
        let authority = parts.uri.authority().ok_or_else(|| {
            Error::request_invalid("request without authority is invalid for signing")
        })?;
        headers.insert(HOST.to_string(), vec![authority.to_string()]);
    }

    headers.values_mut().for_each(|v| v.sort());
    Ok(headers)
}

/// Construct canonical request
///
/// ## Format
///
/// ```text
/// HTTPRequestMethod + '\n' +
/// CanonicalURI + '\n' +
/// CanonicalQueryString + '\n' +
/// CanonicalHeaders + '\n' +
/// SignedHeaders + '\n' +
/// HexEncode(Hash(RequestPayload))
/// ```
fn canonical_request(
    parts: &Parts,
    headers: &BTreeMap<String, Vec<String>>,
    signed_names: &str,
    body: &[u8],
) -> Result<String> {
    let payload_hash = match parts.headers.get(X_SDK_CONTENT_SHA256) {
        Some(v) => v.to_str()?.to_string(),
        None => hex_sha256(body),
    };

    let mut canonical_headers = String::new();
    for (name, values) in headers {
        for value in values {
            canonical_headers.push_str(name);
            canonical_headers.push(':');
            canonical_headers.push_str(value);
            canonical_headers.push('\n');
        }
    }

    Ok(format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        parts.method,
        canonical_uri(parts.uri.path()),
        canonical_query(parts.uri.query().unwrap_or_default()),
        canonical_headers,
        signed_names,
        payload_hash
    ))
}

/// Every path segment is decoded then re-encoded, the result always ends with `/`.
fn canonical_uri(path: &str) -> String {
    let mut uri = path
        .split('/')
        .map(|seg| {
            let decoded = percent_decode_str(seg).decode_utf8_lossy();
            utf8_percent_encode(&decoded, &APIG_URI_ENCODE_SET).to_string()
        })
        .collect::<Vec<_>>()
        .join("/");
    if !uri.ends_with('/') {
        uri.push('/');
    }
    uri
}

/// Query pairs sorted by key then value, both encoded.
fn canonical_query(query: &str) -> String {
    let mut pairs = form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect::<Vec<_>>();
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, &APIG_URI_ENCODE_SET),
                utf8_percent_encode(v, &APIG_URI_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
