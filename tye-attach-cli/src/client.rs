use serde_json::{json, Value};
use std::time::Duration;
use tye_attach_core::ServiceDescriptor;

/// Build an HTTP client with a per-request timeout.
pub fn build_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Normalize non-2xx responses into errors while returning the response on success.
pub async fn handle_error(resp: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body: Value = resp
        .json()
        .await
        .unwrap_or_else(|_| json!({"message": "unknown error"}));
    Err(anyhow::anyhow!("request failed {}: {}", status, body))
}

/// 服务列表接口：<base>/api/v1/services
pub fn services_url(base: &str) -> String {
    format!("{}/api/v1/services", base.trim_end_matches('/'))
}

pub fn service_url(base: &str, name: &str) -> String {
    format!("{}/{}", services_url(base), name)
}

/// Fetch every service known to the orchestrator.
pub async fn fetch_services(
    client: &reqwest::Client,
    base: &str,
) -> anyhow::Result<Vec<ServiceDescriptor>> {
    let resp = client.get(services_url(base)).send().await?;
    let resp = handle_error(resp).await?;
    Ok(resp.json().await?)
}

/// Fetch a single service with its replicas.
pub async fn fetch_service(
    client: &reqwest::Client,
    base: &str,
    name: &str,
) -> anyhow::Result<ServiceDescriptor> {
    let resp = client.get(service_url(base, name)).send().await?;
    let resp = handle_error(resp).await?;
    Ok(resp.json().await?)
}
