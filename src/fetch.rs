//! Fetch a URL and assemble its body with a [Drainer].
//!
//! The HTTP client is asynchronous; everything here blocks on a runtime
//! owned by the call, so the body can be exposed as a plain
//! [ChunkedSource].

use std::io::{self, ErrorKind};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::runtime::Runtime;
use url::Url;

use crate::drain::{DrainConfig, Drainer};
use crate::source::{Chunk, ChunkedSource};
use crate::{ChunkdrainError, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Deadline for the whole exchange, body included.
    pub timeout: Duration,
    pub user_agent: String,
    /// Honour proxy settings from the environment.
    pub proxy: bool,
    pub drain: DrainConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
            proxy: true,
            drain: DrainConfig::default(),
        }
    }
}

impl FetchConfig {
    fn client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str());
        if !self.proxy {
            builder = builder.no_proxy();
        }
        Ok(builder.build()?)
    }
}

/// A successfully fetched body.
#[derive(Debug)]
pub struct Fetched {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    /// Reads it took to drain the body.
    pub reads: usize,
}

/// Parse `raw` as an absolute `http` or `https` URL.
pub fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ChunkdrainError::InvalidUrl(format!(
                "unsupported scheme `{}`",
                other
            )))
        }
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ChunkdrainError::InvalidUrl("missing host".to_string()));
    }
    Ok(url)
}

/// GET `url` and drain the response body.
///
/// The body is read before the status is checked so a failing response can
/// be reported together with what the server said.
pub fn fetch_body(url: &Url, config: &FetchConfig) -> Result<Fetched> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    // The client arms its deadline timer when a request is sent, which needs
    // the runtime's timer to be reachable from this thread.
    let _guard = runtime.enter();
    let client = config.client()?;

    log::info!("sending GET {}", url);
    let response = runtime
        .block_on(async { client.get(url.clone()).send().await })?;
    let status = response.status();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    log::info!("received response with status {}", status);

    let mut body = BodySource::new(&runtime, response);
    let drained = Drainer::new(config.drain).drain(&mut body)?;
    log::info!(
        "read {} bytes of body in {} reads",
        drained.bytes.len(),
        drained.reads
    );

    if !status.is_success() {
        return Err(ChunkdrainError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&drained.bytes).into_owned(),
        });
    }

    Ok(Fetched {
        status: status.as_u16(),
        content_type,
        body: drained.bytes,
        reads: drained.reads,
    })
}

/// GET `url` and decode its body as JSON.
pub fn fetch_json<T: DeserializeOwned>(
    url: &Url,
    config: &FetchConfig,
) -> Result<T> {
    let fetched = fetch_body(url, config)?;
    if let Some(content_type) = &fetched.content_type {
        if !content_type.contains("json") {
            log::warn!("decoding a `{}` body as JSON", content_type);
        }
    }
    let value = serde_json::from_slice(&fetched.body)?;
    log::debug!("decoded JSON body");
    Ok(value)
}

/// Response body exposed as a [ChunkedSource].
///
/// Network chunks larger than the caller's region are kept and handed out
/// over the following reads.
pub struct BodySource<'rt> {
    runtime: &'rt Runtime,
    response: reqwest::Response,
    pending: Vec<u8>,
    offset: usize,
    remaining: Option<usize>,
}

impl<'rt> BodySource<'rt> {
    pub fn new(runtime: &'rt Runtime, response: reqwest::Response) -> Self {
        let remaining = response
            .content_length()
            .and_then(|len| usize::try_from(len).ok());
        Self {
            runtime,
            response,
            pending: Vec::new(),
            offset: 0,
            remaining,
        }
    }

    fn hand_out(&mut self, buf: &mut [u8]) -> usize {
        let available = &self.pending[self.offset..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.offset += n;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(n);
        }
        n
    }
}

impl ChunkedSource for BodySource<'_> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<Chunk> {
        if self.offset < self.pending.len() {
            return Ok(Chunk::More(self.hand_out(buf)));
        }

        match self.runtime.block_on(self.response.chunk()) {
            Ok(Some(bytes)) => {
                log::trace!("network delivered {} bytes", bytes.len());
                self.pending = bytes.to_vec();
                self.offset = 0;
                Ok(Chunk::More(self.hand_out(buf)))
            }
            Ok(None) => Ok(Chunk::EndOfData),
            Err(e) => {
                let kind = if e.is_timeout() {
                    ErrorKind::TimedOut
                } else {
                    ErrorKind::Other
                };
                Err(io::Error::new(kind, e))
            }
        }
    }

    fn size_hint(&self) -> Option<usize> {
        self.remaining
    }
}
