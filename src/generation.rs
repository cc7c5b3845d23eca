//! Talking to the model backend.
use eyre::{Result, eyre};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};

use crate::streaming::ChunkSender;

/// Sampling knobs passed through to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sampling {
    pub temperature: f64,
    pub top_p: f64,
}

impl Sampling {
    /// Conservative settings for producing diffs.
    pub const PRECISE: Sampling = Sampling {
        temperature: 0.3,
        top_p: 0.8,
    };
    pub const CONVERSATIONAL: Sampling = Sampling {
        temperature: 0.7,
        top_p: 0.9,
    };
}

/// Anything that can turn a prompt into a completion.
#[async_trait::async_trait]
pub trait Generate: Send + Sync {
    /// Produce the full completion. When `sink` is given, pieces are offered
    /// to it as they arrive.
    async fn generate(
        &self,
        prompt: &str,
        sampling: Sampling,
        sink: Option<&ChunkSender>,
    ) -> Result<String>;
}

/// Streaming client for an Ollama server's `/api/generate`.
pub struct Ollama {
    client: reqwest::Client,
    url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: Sampling,
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

impl Ollama {
    pub fn new(url: &str, model: &str) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(concat!("lathe/", env!("CARGO_PKG_VERSION"))),
        );
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .use_rustls_tls()
            .build()?;
        Ok(Ollama {
            client,
            url: url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl Generate for Ollama {
    async fn generate(
        &self,
        prompt: &str,
        sampling: Sampling,
        sink: Option<&ChunkSender>,
    ) -> Result<String> {
        let body = serde_json::to_vec(&GenerateRequest {
            model: &self.model,
            prompt,
            stream: true,
            options: sampling,
        })?;
        tracing::info!(model = %self.model, url = %self.url, "model: request sent");

        let response = self
            .client
            .post(format!("{}/api/generate", self.url))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(eyre!("model backend returned {status}: {}", detail.trim()));
        }

        let mut full = String::new();
        let mut pending: Vec<u8> = Vec::new();
        let mut done = false;
        let mut stream = response.bytes_stream();
        while !done && let Some(bytes) = stream.next().await {
            pending.extend_from_slice(&bytes?);
            while !done && let Some(newline) = pending.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = pending.drain(..=newline).collect();
                if let Some(chunk) = decode_line(&line) {
                    forward(&chunk.response, sink, &mut full);
                    done = chunk.done;
                }
            }
        }
        if !done && let Some(chunk) = decode_line(&pending) {
            forward(&chunk.response, sink, &mut full);
        }

        tracing::info!(chars = full.len(), "model: response complete");
        Ok(full)
    }
}

fn forward(piece: &str, sink: Option<&ChunkSender>, full: &mut String) {
    if piece.is_empty() {
        return;
    }
    if let Some(sink) = sink {
        sink.offer(piece.to_string());
    }
    full.push_str(piece);
}

// Malformed lines are skipped.
fn decode_line(line: &[u8]) -> Option<GenerateChunk> {
    let line = std::str::from_utf8(line).ok()?.trim();
    if line.is_empty() {
        return None;
    }
    serde_json::from_str(line).ok()
}

/// Backend stand-in for when no model is reachable.
pub struct Unavailable;

#[async_trait::async_trait]
impl Generate for Unavailable {
    async fn generate(
        &self,
        _prompt: &str,
        _sampling: Sampling,
        _sink: Option<&ChunkSender>,
    ) -> Result<String> {
        Err(eyre!("no model backend configured"))
    }
}
