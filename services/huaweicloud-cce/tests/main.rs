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
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use kubeauth_core::{Context, ErrorKind, LogSink, NoopTransport, SignRequest, Transport};
use kubeauth_huaweicloud_cce::constants::{X_PROJECT_ID, X_SECURITY_TOKEN};
use kubeauth_huaweicloud_cce::{Config, Credential, RequestSigner, TransportChainBuilder};
use kubeauth_transport_reqwest::ReqwestTransport;
use log::{warn, Level};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Base transport answering with the received headers as body.
#[derive(Debug, Clone, Default)]
struct EchoTransport {
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<http::HeaderMap>>>,
}

impl EchoTransport {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_headers(&self) -> http::HeaderMap {
        self.seen.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Transport for EchoTransport {
    async fn send(
        &self,
        req: http::Request<Bytes>,
    ) -> kubeauth_core::Result<http::Response<Bytes>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(req.headers().clone());

        let body = req
            .headers()
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v.to_str().unwrap_or_default()))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(http::Response::builder()
            .status(StatusCode::OK)
            .body(Bytes::from(body))?)
    }
}

/// Signer that records its calls and optionally fails or tampers with headers.
#[derive(Debug, Clone, Default)]
struct SpySigner {
    keys: Arc<Mutex<Vec<(String, String)>>>,
    fail: bool,
    tamper: bool,
}

impl SpySigner {
    fn calls(&self) -> usize {
        self.keys.lock().unwrap().len()
    }
}

#[async_trait]
impl SignRequest for SpySigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        ctx: &Context,
        parts: &mut http::request::Parts,
        body: &[u8],
        cred: &Credential,
    ) -> kubeauth_core::Result<()> {
        self.keys
            .lock()
            .unwrap()
            .push((cred.access_key.clone(), cred.secret_key.clone()));

        if self.fail {
            return Err(kubeauth_core::Error::unexpected("signer exploded"));
        }
        if self.tamper {
            parts
                .headers
                .insert("x-sdk-nonce", http::HeaderValue::from_static("42"));
            parts
                .headers
                .insert("x-sdk-date", http::HeaderValue::from_static("20240101T000000Z"));
        }
        RequestSigner::new()
            .sign_request(ctx, parts, body, cred)
            .await
    }
}

#[derive(Debug, Clone, Default)]
struct CountingSink {
    debug: bool,
    records: Arc<Mutex<Vec<(Level, String, String)>>>,
    queries: Arc<AtomicUsize>,
}

impl LogSink for CountingSink {
    fn is_debug_enabled(&self) -> bool {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.debug
    }

    fn emit(&self, level: Level, component: &str, record: &str) {
        self.records
            .lock()
            .unwrap()
            .push((level, component.to_string(), record.to_string()));
    }
}

fn request() -> http::Request<Bytes> {
    http::Request::post("https://cce.example.com/api/v1/namespaces/default/pods")
        .header("content-type", "application/json")
        .body(Bytes::from(
            r#"{"kind":"Pod","metadata":{"name":"db"},"secretName":"hunter2"}"#,
        ))
        .unwrap()
}

#[tokio::test]
async fn test_end_to_end_echo() -> Result<()> {
    init_logger();

    let base = EchoTransport::default();
    let signer = SpySigner::default();
    let transport = TransportChainBuilder::new(Context::new())
        .with_credential(Credential::new("AK", "SK", "proj-1").with_security_token(""))
        .with_header("X-Custom", "v1")
        .with_signer(signer.clone())
        .build(base.clone())?;

    let resp = transport.send(request()).await?;
    assert_eq!(StatusCode::OK, resp.status());

    assert_eq!(
        vec![("AK".to_string(), "SK".to_string())],
        signer.keys.lock().unwrap().clone()
    );
    assert_eq!(1, base.calls());

    let headers = base.last_headers();
    assert_eq!("proj-1", headers[X_PROJECT_ID].to_str()?);
    assert_eq!("v1", headers["x-custom"].to_str()?);
    assert!(!headers.contains_key(X_SECURITY_TOKEN));
    assert!(headers["authorization"]
        .to_str()?
        .starts_with("SDK-HMAC-SHA256 Access=AK, SignedHeaders="));

    let body = String::from_utf8(resp.into_body().to_vec())?;
    assert!(body.contains("x-project-id: proj-1"));
    assert!(body.contains("x-custom: v1"));
    Ok(())
}

#[test_case(false; "plain signer")]
#[test_case(true; "signer adds headers")]
#[tokio::test]
async fn test_header_set_reaches_base(tamper: bool) -> Result<()> {
    let base = EchoTransport::default();
    let transport = TransportChainBuilder::new(Context::new())
        .with_credential(Credential::new("AK", "SK", "proj-1"))
        .with_headers([("X-Custom", "v1"), ("X-Tenant", "team-a")])
        .with_signer(SpySigner {
            tamper,
            ..Default::default()
        })
        .build(base.clone())?;

    for _ in 0..3 {
        transport.send(request()).await?;
    }

    assert_eq!(3, base.calls());
    for headers in base.seen.lock().unwrap().iter() {
        assert_eq!("v1", headers["x-custom"].to_str()?);
        assert_eq!("team-a", headers["x-tenant"].to_str()?);
        assert!(headers["authorization"].to_str()?.contains("x-custom"));
    }
    Ok(())
}

#[tokio::test]
async fn test_header_set_without_credential() -> Result<()> {
    let base = EchoTransport::default();
    let transport = TransportChainBuilder::new(Context::new())
        .with_header("X-Custom", "v1")
        .build(base.clone())?;

    transport.send(request()).await?;

    let headers = base.last_headers();
    assert_eq!("v1", headers["x-custom"].to_str()?);
    assert!(!headers.contains_key("authorization"));
    Ok(())
}

#[tokio::test]
async fn test_non_ascii_header_is_signed_and_sent() -> Result<()> {
    let base = EchoTransport::default();
    let transport = TransportChainBuilder::new(Context::new())
        .with_credential(Credential::new("AK", "SK", "proj-1"))
        .with_header("X-Tenant", "café")
        .build(base.clone())?;

    transport.send(request()).await?;

    assert_eq!(1, base.calls());
    let headers = base.last_headers();
    assert_eq!("café".as_bytes(), headers["x-tenant"].as_bytes());
    assert!(headers["authorization"].to_str()?.contains("x-tenant"));
    Ok(())
}

#[tokio::test]
async fn test_sign_error_never_reaches_base() -> Result<()> {
    let base = EchoTransport::default();
    let signer = SpySigner {
        fail: true,
        ..Default::default()
    };
    let transport = TransportChainBuilder::new(Context::new())
        .with_credential(Credential::new("AK", "SK", "proj-1"))
        .with_header("X-Custom", "v1")
        .with_signer(signer.clone())
        .build(base.clone())?;

    let err = transport.send(request()).await.expect_err("must fail");

    assert_eq!(ErrorKind::SignFailed, err.kind());
    assert_eq!(1, signer.calls());
    assert_eq!(0, base.calls());
    Ok(())
}

#[test]
fn test_project_without_keys_fails_build() {
    let err = TransportChainBuilder::new(Context::new())
        .with_credential(Credential::new("", "", "proj-1"))
        .build(EchoTransport::default())
        .expect_err("must fail");

    assert_eq!(ErrorKind::ConfigInvalid, err.kind());
}

#[tokio::test]
async fn test_anonymous_chain_never_signs() -> Result<()> {
    let base = EchoTransport::default();
    let signer = SpySigner::default();
    let transport = TransportChainBuilder::new(Context::new())
        .with_credential(Credential::default().with_security_token("token"))
        .with_signer(signer.clone())
        .build(base.clone())?;

    transport.send(request()).await?;

    assert_eq!(0, signer.calls());
    let headers = base.last_headers();
    assert!(!headers.contains_key(X_PROJECT_ID));
    assert!(!headers.contains_key(X_SECURITY_TOKEN));
    assert!(!headers.contains_key("authorization"));
    Ok(())
}

#[test_case("AK", "SK"; "both keys")]
#[test_case("AK", ""; "access key only")]
#[test_case("", "SK"; "secret key only")]
fn test_keys_without_project_fail_build(ak: &str, sk: &str) {
    let err = TransportChainBuilder::new(Context::new())
        .with_credential(Credential::new(ak, sk, ""))
        .build(NoopTransport)
        .expect_err("must fail");

    assert_eq!(ErrorKind::ConfigInvalid, err.kind());
}

#[tokio::test]
async fn test_debug_disabled_emits_nothing() -> Result<()> {
    let sink = CountingSink::default();
    let base = EchoTransport::default();
    let transport = TransportChainBuilder::new(Context::new().with_log_sink(sink.clone()))
        .with_credential(Credential::new("AK", "SK", "proj-1"))
        .with_header("X-Custom", "v1")
        .build(base.clone())?;

    transport.send(request()).await?;

    assert_eq!(1, base.calls());
    assert_eq!(1, sink.queries.load(Ordering::SeqCst));
    assert!(sink.records.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_debug_records_are_redacted() -> Result<()> {
    let sink = CountingSink {
        debug: true,
        ..Default::default()
    };
    let transport = TransportChainBuilder::new(Context::new().with_log_sink(sink.clone()))
        .with_credential(Credential::new("AK", "SK", "proj-1").with_security_token("token-value"))
        .with_component("CCE")
        .build(EchoTransport::default())?;

    transport.send(request()).await?;

    let records = sink.records.lock().unwrap().clone();
    assert_eq!(2, records.len());
    assert!(records.iter().all(|(level, component, _)| {
        *level == Level::Debug && component == "CCE"
    }));

    let (_, _, req) = &records[0];
    assert!(req.starts_with("CCE API Request Details:\n----[ REQUEST ]"));
    assert!(req.contains("X-Project-Id: proj-1"));
    assert!(req.contains("Authorization: ******"));
    assert!(req.contains("X-Security-Token: ******"));
    assert!(req.contains(r#" "secretName": "******""#));

    let (_, _, resp) = &records[1];
    assert!(resp.starts_with("CCE API Response Details:\n----[ RESPONSE ]"));

    for (_, _, record) in &records {
        assert!(!record.contains("Signature="));
        assert!(!record.contains("token-value"));
        assert!(!record.contains("hunter2"));
    }
    Ok(())
}

#[tokio::test]
async fn test_from_env_config() -> Result<()> {
    let ctx = Context::new().with_env(kubeauth_core::StaticEnv {
        envs: [
            ("HW_ACCESS_KEY", "AK"),
            ("HW_SECRET_KEY", "SK"),
            ("HW_PROJECT_ID", "proj-env"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
    });
    let config = Config::new().with_header("X-Custom", "v1").from_env(&ctx);

    let base = EchoTransport::default();
    let transport = TransportChainBuilder::from_config(ctx, &config)?.build(base.clone())?;
    transport.send(request()).await?;

    let headers = base.last_headers();
    assert_eq!("proj-env", headers[X_PROJECT_ID].to_str()?);
    assert_eq!("v1", headers["x-custom"].to_str()?);
    Ok(())
}

#[tokio::test]
async fn test_list_namespaces() -> Result<()> {
    init_logger();
    let _ = dotenv::dotenv();

    if env::var("KUBEAUTH_CCE_TEST").unwrap_or_default() != "on" {
        warn!("KUBEAUTH_CCE_TEST is not set, skipped");
        return Ok(());
    }

    let ctx = Context::new().with_env(kubeauth_core::OsEnv);
    let config = Config::new().from_env(&ctx);
    let url = env::var("KUBEAUTH_CCE_URL").expect("env KUBEAUTH_CCE_URL must set");

    let transport = TransportChainBuilder::from_config(ctx, &config)?
        .skip_dump_path("/openapi/v2")
        .build(ReqwestTransport::new(reqwest::Client::new()))?;

    let req = http::Request::get(format!("{}/api/v1/namespaces", url.trim_end_matches('/')))
        .header("accept", "application/json")
        .body(Bytes::new())?;
    let resp = transport.send(req).await.expect("request must succeed");

    assert_eq!(StatusCode::OK, resp.status());
    Ok(())
}
