use std::cell::RefCell;
use std::time::{Duration, Instant};

use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::history::{History, HistoryEntry};

use super::method::HttpMethod;
use super::request::RequestInput;
use super::response::HttpResponse;

pub const DEFAULT_BASE_URL: &str = "https://petstore.swagger.io/v2";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

const APPLICATION_JSON: &str = "application/json";

/// Synchronous JSON client bound to one base URL.
///
/// Each call blocks on a private current-thread runtime. The timeout bounds
/// connecting and every individual read, not the exchange as a whole.
/// Idle connections are never pooled, so every call opens its own socket.
/// Proxy environment variables are ignored.
pub struct ApiClient {
    client: Client,
    runtime: Runtime,
    base_url: String,
    timeout_ms: u64,
    clock: Box<dyn Clock>,
    history: RefCell<History>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self> {
        let timeout = Duration::from_millis(timeout_ms);
        let client = Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .pool_max_idle_per_host(0)
            .no_proxy()
            .build()
            .map_err(Error::Transport)?;
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(Error::Runtime)?;

        Ok(Self {
            client,
            runtime,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms,
            clock: Box::new(SystemClock),
            history: RefCell::new(History::new()),
        })
    }

    /// Stamp history entries from `clock` instead of the system time.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Snapshot of every exchange performed so far.
    pub fn history(&self) -> History {
        self.history.borrow().clone()
    }

    /// Perform one round trip and hand back whatever the server said,
    /// whatever the status.
    pub fn execute(&self, request: RequestInput) -> Result<HttpResponse> {
        let url = format!("{}{}", self.base_url, request.endpoint);
        let mut req_builder = self
            .client
            .request(request.method.into(), &url)
            .header(ACCEPT, APPLICATION_JSON);

        if let Some(body) = request.body {
            req_builder = req_builder
                .header(CONTENT_TYPE, APPLICATION_JSON)
                .body(body.into_bytes());
        }

        let started = Instant::now();
        let result = self.runtime.block_on(async {
            let response = req_builder.send().await?;
            let status = response.status().as_u16();
            let bytes = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, bytes))
        });
        let elapsed = started.elapsed().as_millis();

        let (status, bytes) = match result {
            Ok(parts) => parts,
            Err(err) => {
                warn!(method = %request.method, %url, error = %err, "request failed");
                self.record(request.method, &url, None, elapsed);
                return Err(Error::from_reqwest(err, &url, self.timeout_ms));
            }
        };

        debug!(method = %request.method, %url, status, elapsed_ms = elapsed as u64, "exchange complete");
        self.record(request.method, &url, Some(status), elapsed);

        Ok(HttpResponse {
            status,
            duration_ms: elapsed,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    pub fn send_get(&self, endpoint: &str) -> Result<String> {
        self.send_strict(RequestInput::new(HttpMethod::Get, endpoint))
    }

    pub fn send_post(&self, endpoint: &str, body: &str) -> Result<String> {
        self.send_strict(RequestInput::new(HttpMethod::Post, endpoint).with_body(body))
    }

    pub fn send_put(&self, endpoint: &str, body: &str) -> Result<String> {
        self.send_strict(RequestInput::new(HttpMethod::Put, endpoint).with_body(body))
    }

    pub fn send_delete(&self, endpoint: &str) -> Result<String> {
        self.send_strict(RequestInput::new(HttpMethod::Delete, endpoint))
    }

    /// Like [`execute`](Self::execute), but any status outside `accepted`
    /// becomes an error.
    pub fn send_expecting(&self, request: RequestInput, accepted: &[u16]) -> Result<HttpResponse> {
        let response = self.execute(request)?;
        if !accepted.contains(&response.status) {
            return Err(Error::UnexpectedStatus {
                status: response.status,
                expected: accepted.to_vec(),
                body: response.body,
            });
        }
        Ok(response)
    }

    // Only 200 counts as success; 201 and 204 are failures too.
    fn send_strict(&self, request: RequestInput) -> Result<String> {
        let response = self.execute(request)?;
        if response.status != 200 {
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }

    fn record(&self, method: HttpMethod, url: &str, status: Option<u16>, duration_ms: u128) {
        self.history.borrow_mut().push(HistoryEntry {
            timestamp_ms: self.clock.now_millis(),
            method,
            url: url.to_string(),
            status,
            duration_ms,
        });
    }
}
