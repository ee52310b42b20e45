//! Purpose: Perform the single blocking HTTP GET for a JSON endpoint.
//! Exports: `DEFAULT_URL`, `FetchConfig`, `HttpFetcher`, `RawResponse`, `parse_url`.
//! Role: Thin wrapper over a `ureq` agent that returns raw bytes plus status.
//! Invariants: Exactly one request per `get`; no retries and no custom headers.
//! Invariants: Non-2xx responses are returned, not treated as failures.
//! Invariants: Transport failures map to `ErrorKind::Network`.
use std::io::Read;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::core::error::{Error, ErrorKind};

pub const DEFAULT_URL: &str =
    "https://learn-co-curriculum.github.io/json-site-example/endpoints/locations.json";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FetchConfig {
    /// Overall request timeout; `None` keeps the client defaults.
    pub timeout: Option<Duration>,
}

#[derive(Clone, Debug)]
pub struct RawResponse {
    pub url: String,
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
            config,
        }
    }

    pub fn get(&self, url: &Url) -> Result<RawResponse, Error> {
        debug!(url = %url, timeout = ?self.config.timeout, "sending request");
        let response = match self.agent.get(url.as_str()).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(ureq::Error::Transport(err)) => {
                return Err(transport_error(url, err));
            }
        };
        let raw = read_raw_response(url, response)?;
        if !raw.is_success() {
            warn!(url = %url, status = raw.status, "endpoint returned a non-success status");
        }
        Ok(raw)
    }
}

pub fn parse_url(raw: &str) -> Result<Url, Error> {
    let url = Url::parse(raw).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("invalid url")
            .with_url(raw)
            .with_source(err)
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::new(ErrorKind::Usage)
            .with_message(format!("unsupported url scheme `{scheme}`"))
            .with_hint("Use an http:// or https:// url.")
            .with_url(raw)),
    }
}

fn read_raw_response(url: &Url, response: ureq::Response) -> Result<RawResponse, Error> {
    let status = response.status();
    let content_type = response.content_type().to_string();
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|err| {
            Error::new(ErrorKind::Network)
                .with_message("failed to read response body")
                .with_url(url.as_str())
                .with_status(status)
                .with_source(err)
        })?;
    debug!(status, bytes = body.len(), content_type = %content_type, "received response");
    Ok(RawResponse {
        url: url.to_string(),
        status,
        content_type,
        body,
    })
}

fn transport_error(url: &Url, err: ureq::Transport) -> Error {
    let hint = match err.kind() {
        ureq::ErrorKind::Dns => "Host name did not resolve. Check the url and your DNS setup.",
        ureq::ErrorKind::ConnectionFailed => {
            "Connection failed. Check that the host is reachable and the port is open."
        }
        ureq::ErrorKind::Io => "Network I/O failed or timed out. Check connectivity and retry.",
        _ => "Request failed before a response was received.",
    };
    Error::new(ErrorKind::Network)
        .with_message("request failed")
        .with_hint(hint)
        .with_url(url.as_str())
        .with_source(err)
}
