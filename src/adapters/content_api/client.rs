//! Failover HTTP client for the content API
//!
//! The client holds an ordered list of interchangeable base URLs and a
//! cursor pointing at the currently preferred one. Every logical request
//! starts at the cursor. A failed attempt (transport error, timeout, or
//! non-2xx status) advances the cursor and the next host is tried, at most
//! once per host. A success leaves the cursor where it is, so later calls
//! keep going to the host that last worked.
//!
//! There is no backoff between attempts and no memory beyond the cursor.
//! The worst case before giving up is `hosts × timeout`.

use super::models::{paths, Envelope, TOTAL_COUNT_HEADER};
use crate::config::ApiConfig;
use crate::domain::{ApiError, HealthStatus, HostHealth, RegulusError, Result};
use futures::future::join_all;
use reqwest::{Client, ClientBuilder, Method};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Per-request overrides
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method, GET when unset
    pub method: Option<Method>,

    /// Extra request headers
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A 2xx response, fully read
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Base URL of the host that answered
    pub base_url: String,

    pub status: u16,

    /// Header names are lowercase
    pub headers: HashMap<String, String>,

    pub body: String,
}

impl RawResponse {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// `X-Total-Count` parsed as an integer, if present and valid
    pub fn total_count(&self) -> Option<u64> {
        self.header(TOTAL_COUNT_HEADER)
            .and_then(|v| v.trim().parse().ok())
    }
}

/// Envelope payload together with paging metadata
#[derive(Debug, Clone)]
pub struct Enveloped<T> {
    pub data: T,

    /// `count` field of the envelope
    pub count: Option<u64>,

    /// `X-Total-Count` header
    pub total_count_header: Option<u64>,

    pub base_url: String,
}

impl<T> Enveloped<T> {
    /// Authoritative total: header first, then envelope count
    pub fn total(&self) -> Option<u64> {
        self.total_count_header.or(self.count)
    }
}

/// Why a single attempt failed
#[derive(Debug)]
enum AttemptFailure {
    Timeout(String),
    Transport(String),
    Status(u16),
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Timeout(e) => write!(f, "timeout: {e}"),
            AttemptFailure::Transport(e) => write!(f, "transport error: {e}"),
            AttemptFailure::Status(s) => write!(f, "HTTP status {s}"),
        }
    }
}

impl From<reqwest::Error> for AttemptFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AttemptFailure::Timeout(err.to_string())
        } else {
            AttemptFailure::Transport(err.to_string())
        }
    }
}

/// Content API client with host failover
///
/// The cursor lives in the instance, so separate clients (and separate
/// tests) never share failover state. The client is `Send + Sync`; share it
/// behind an `Arc`.
///
/// # Example
///
/// ```no_run
/// use regulus::adapters::content_api::ContentApiClient;
/// use regulus::config::ApiConfig;
///
/// # async fn example() -> regulus::domain::Result<()> {
/// let client = ContentApiClient::new(&ApiConfig::default())?;
/// let health: serde_json::Value = client.call("/api/v1/health").await?;
/// println!("{health} from {}", client.current_base_url());
/// # Ok(())
/// # }
/// ```
pub struct ContentApiClient {
    base_urls: Vec<String>,
    cursor: AtomicUsize,
    client: Client,
    timeout: Duration,
}

impl ContentApiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the candidate list is empty or the
    /// HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_urls: Vec<String> = config
            .base_urls
            .iter()
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .collect();

        if base_urls.is_empty() {
            return Err(RegulusError::Configuration(
                "At least one content API base URL is required".to_string(),
            ));
        }

        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                RegulusError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        tracing::debug!(
            hosts = base_urls.len(),
            timeout_seconds = config.timeout_seconds,
            "Content API client created"
        );

        Ok(Self {
            base_urls,
            cursor: AtomicUsize::new(0),
            client,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    /// Create a client for the given hosts with default settings otherwise
    pub fn with_base_urls<I, S>(base_urls: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = ApiConfig {
            base_urls: base_urls.into_iter().map(Into::into).collect(),
            ..ApiConfig::default()
        };
        Self::new(&config)
    }

    /// Override the per-attempt timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Candidate base URLs in failover order
    pub fn base_urls(&self) -> &[String] {
        &self.base_urls
    }

    /// Index of the currently preferred host
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::SeqCst) % self.base_urls.len()
    }

    /// Base URL of the currently preferred host
    pub fn current_base_url(&self) -> &str {
        &self.base_urls[self.cursor()]
    }

    /// Per-attempt timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue one logical request, failing over across hosts
    ///
    /// `endpoint` is a path plus optional query string, appended to the base
    /// URL at the cursor.
    ///
    /// # Errors
    ///
    /// After every host has failed once:
    /// - [`ApiError::Timeout`] if the last failure was a timeout
    /// - [`ApiError::Connectivity`] if it was a transport error
    /// - [`ApiError::AllServersUnavailable`] if it was an HTTP status
    pub async fn request(&self, endpoint: &str, options: &RequestOptions) -> Result<RawResponse> {
        let endpoint = normalize_endpoint(endpoint);
        let hosts = self.base_urls.len();
        let mut last_failure = None;

        for attempt in 1..=hosts {
            // The base URL is captured before sending; a concurrent failure
            // moving the cursor does not affect this attempt.
            let index = self.cursor();
            let base_url = &self.base_urls[index];
            let url = format!("{base_url}{endpoint}");

            tracing::debug!(url = %url, attempt, max_attempts = hosts, "Sending content API request");

            match self.attempt(base_url, &url, options).await {
                Ok(response) => {
                    if attempt > 1 {
                        tracing::info!(
                            base_url = %base_url,
                            attempts = attempt,
                            "Content API request succeeded after failover"
                        );
                    }
                    return Ok(response);
                }
                Err(failure) => {
                    tracing::warn!(
                        base_url = %base_url,
                        endpoint = %endpoint,
                        attempt,
                        max_attempts = hosts,
                        error = %failure,
                        "Content API request failed, switching to next server"
                    );
                    // Only the first failure of this host moves the cursor.
                    let _ = self.cursor.compare_exchange(
                        index,
                        (index + 1) % hosts,
                        Ordering::SeqCst,
                        Ordering::SeqCst,
                    );
                    last_failure = Some(failure);
                }
            }
        }

        let error = match last_failure {
            Some(AttemptFailure::Timeout(_)) => ApiError::Timeout {
                attempts: hosts,
                timeout: self.timeout,
            },
            Some(AttemptFailure::Transport(e)) => ApiError::Connectivity {
                attempts: hosts,
                last_error: e,
            },
            Some(AttemptFailure::Status(status)) => ApiError::AllServersUnavailable {
                attempts: hosts,
                last_status: status,
            },
            None => ApiError::Connectivity {
                attempts: 0,
                last_error: "no content servers configured".to_string(),
            },
        };

        tracing::error!(endpoint = %endpoint, error = %error, "All content servers failed");
        Err(error.into())
    }

    async fn attempt(
        &self,
        base_url: &str,
        url: &str,
        options: &RequestOptions,
    ) -> std::result::Result<RawResponse, AttemptFailure> {
        let method = options.method.clone().unwrap_or(Method::GET);
        let mut request = self
            .client
            .request(method, url)
            .timeout(self.timeout)
            .header("Accept", "application/json");

        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AttemptFailure::Status(status.as_u16()));
        }

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.text().await?;

        Ok(RawResponse {
            base_url: base_url.to_string(),
            status: status.as_u16(),
            headers,
            body,
        })
    }

    /// Fetch an endpoint and unwrap its envelope
    ///
    /// # Errors
    ///
    /// Besides the transport errors of [`request`](Self::request):
    /// - [`ApiError::Logical`] when the envelope says `success: false`. The
    ///   host answered, so no other host is tried.
    /// - [`ApiError::InvalidResponse`] when the body is not a valid envelope
    ///   or `data` does not match `T`.
    pub async fn call<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        Ok(self.call_enveloped(endpoint).await?.data)
    }

    /// Like [`call`](Self::call), keeping the paging metadata
    pub async fn call_enveloped<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Enveloped<T>> {
        let response = self.request(endpoint, &RequestOptions::default()).await?;
        let total_count_header = response.total_count();
        let envelope = parse_envelope::<T>(&response.body)?;

        Ok(Enveloped {
            data: envelope.0,
            count: envelope.1,
            total_count_header,
            base_url: response.base_url,
        })
    }

    /// Probe every candidate host's health endpoint directly
    ///
    /// Hosts are probed concurrently, without failover, and the cursor is
    /// left untouched.
    pub async fn probe_hosts(&self) -> Vec<HostHealth> {
        let probes = self.base_urls.iter().map(|base_url| self.probe(base_url));
        join_all(probes).await
    }

    async fn probe(&self, base_url: &str) -> HostHealth {
        let url = format!("{base_url}{}", paths::HEALTH);
        let started = Instant::now();
        let outcome = self.attempt(base_url, &url, &RequestOptions::default()).await;
        let latency_ms = started.elapsed().as_millis();

        let parsed = match outcome {
            Ok(response) => parse_envelope::<HealthStatus>(&response.body).map_err(|e| e.to_string()),
            Err(failure) => Err(failure.to_string()),
        };

        let health = match parsed {
            Ok((status, _)) => HostHealth {
                base_url: base_url.to_string(),
                healthy: status.is_ok(),
                latency_ms,
                version: status.version.clone(),
                error: if status.is_ok() {
                    None
                } else {
                    Some(format!("reported status '{}'", status.status))
                },
            },
            Err(error) => HostHealth {
                base_url: base_url.to_string(),
                healthy: false,
                latency_ms,
                version: None,
                error: Some(error),
            },
        };

        crate::log_host_probe!(health.base_url, health.healthy, health.latency_ms);
        health
    }
}

/// Decode an envelope body into its payload and `count`
///
/// The envelope is read generically first so a failure envelope whose `data`
/// does not match `T` still surfaces the server's message.
fn parse_envelope<T: DeserializeOwned>(body: &str) -> std::result::Result<(T, Option<u64>), ApiError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| ApiError::InvalidResponse(format!("response is not a valid envelope: {e}")))?;

    if !envelope.success {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Request failed".to_string());
        return Err(ApiError::Logical(message));
    }

    let data = envelope
        .data
        .ok_or_else(|| ApiError::InvalidResponse("envelope has no data".to_string()))?;
    let data = serde_json::from_value::<T>(data)
        .map_err(|e| ApiError::InvalidResponse(format!("unexpected data shape: {e}")))?;

    Ok((data, envelope.count))
}

fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with('/') {
        endpoint.to_string()
    } else {
        format!("/{endpoint}")
    }
}
