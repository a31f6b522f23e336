use anyhow::Result;
use bytes::Bytes;
use kubeauth_core::Transport;
use kubeauth_transport_reqwest::ReqwestTransport;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Timeouts and pooling live on the reqwest client, not in the chain.
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("kubeauth-example/1.0")
        .build()?;

    let transport = ReqwestTransport::new(client);

    let test_url = "https://httpbin.org/get";
    println!("Testing transport with GET {test_url}");

    let req = http::Request::builder()
        .method("GET")
        .uri(test_url)
        .header("X-Test-Header", "kubeauth-example")
        .body(Bytes::new())?;

    match transport.send(req).await {
        Ok(resp) => {
            println!("Response status: {}", resp.status());
            println!("Response body: {}", String::from_utf8_lossy(resp.body()));
        }
        Err(e) => {
            eprintln!("Request failed: {e}");
        }
    }

    Ok(())
}
