//! 调试宿主实现：打印配置，或通过 HTTP 交给编辑器侧的桥接端点。

use crate::client::handle_error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Mutex;
use tye_attach_core::{AttachError, DebugConfiguration, DebugHost, WorkspaceFolder};
use url::Url;

/// `--host` 取值：`print` 或 http(s) 端点。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostTarget {
    Print,
    Http(Url),
}

impl std::str::FromStr for HostTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("print") {
            return Ok(HostTarget::Print);
        }
        let url = Url::parse(trimmed).map_err(|e| format!("invalid host url: {}", e))?;
        match url.scheme() {
            "http" | "https" => Ok(HostTarget::Http(url)),
            other => Err(format!("unsupported host scheme: {}", other)),
        }
    }
}

/// 发给宿主的请求体。
#[derive(Debug, Serialize)]
pub struct StartDebuggingRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<&'a WorkspaceFolder>,
    pub configuration: &'a DebugConfiguration,
}

#[derive(Debug, Deserialize)]
struct StartDebuggingResponse {
    #[serde(default = "default_started")]
    started: bool,
}

fn default_started() -> bool {
    true
}

/// 把每个会话配置作为一行 JSON 写出（默认 stdout），并视为已启动。
///
/// 输出流只承载会话文档，人类可读的报告由调用方写到别处。
pub struct PrintHost {
    out: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for PrintHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrintHost").finish_non_exhaustive()
    }
}

impl Default for PrintHost {
    fn default() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }
}

impl PrintHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

#[async_trait]
impl DebugHost for PrintHost {
    async fn start_debugging(
        &self,
        folder: Option<&WorkspaceFolder>,
        config: &DebugConfiguration,
    ) -> tye_attach_core::Result<bool> {
        let line = serde_json::to_string(&StartDebuggingRequest {
            folder,
            configuration: config,
        })?;
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{}", line).map_err(|e| AttachError::Host(e.to_string()))?;
        out.flush().map_err(|e| AttachError::Host(e.to_string()))?;
        Ok(true)
    }
}

/// POST 到编辑器桥接端点；2xx 视为成功，响应体 `{"started": bool}` 可选。
#[derive(Debug, Clone)]
pub struct HttpHost {
    client: reqwest::Client,
    url: Url,
}

impl HttpHost {
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl DebugHost for HttpHost {
    async fn start_debugging(
        &self,
        folder: Option<&WorkspaceFolder>,
        config: &DebugConfiguration,
    ) -> tye_attach_core::Result<bool> {
        let body = StartDebuggingRequest {
            folder,
            configuration: config,
        };
        let resp = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| AttachError::Host(e.to_string()))?;
        let resp = handle_error(resp)
            .await
            .map_err(|e| AttachError::Host(e.to_string()))?;
        let text = resp
            .text()
            .await
            .map_err(|e| AttachError::Host(e.to_string()))?;
        parse_started(&text)
    }
}

/// 空响应体视为已启动。
fn parse_started(body: &str) -> tye_attach_core::Result<bool> {
    if body.trim().is_empty() {
        return Ok(true);
    }
    let parsed: StartDebuggingResponse = serde_json::from_str(body)?;
    Ok(parsed.started)
}
