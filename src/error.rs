//! Error types shared by the HTTP helper, the suites and the report writer.

use thiserror::Error;

/// Everything that can make a single test case fail.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with something other than 200.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The server answered with a status outside the accepted set.
    #[error("unexpected HTTP {status} (expected one of {expected:?}): {body}")]
    UnexpectedStatus {
        status: u16,
        expected: Vec<u16>,
        body: String,
    },

    /// Connect or read exceeded the configured limit.
    #[error("request to {url} timed out after {timeout_ms} ms")]
    Timeout { url: String, timeout_ms: u64 },

    /// Connection refused, DNS failure, malformed URL and the like.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The body is not valid JSON.
    #[error("invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is JSON but not the expected shape.
    #[error("expected a JSON {expected} in response, got: {body}")]
    Shape { expected: &'static str, body: String },

    /// A field read for display is absent.
    #[error("missing field `{0}` in response")]
    MissingField(String),

    /// A literal identifier that should be numeric is not.
    #[error("invalid numeric id `{0}`")]
    InvalidId(String),

    /// A response field holds the wrong value.
    #[error("field `{field}` is {actual}, expected {expected}")]
    Assertion {
        field: String,
        expected: String,
        actual: String,
    },

    /// The async runtime behind the client could not start.
    #[error("failed to start HTTP runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The run report could not be turned into JSON.
    #[error("failed to serialize report: {0}")]
    ReportFormat(#[source] serde_json::Error),

    /// The report file or its directory could not be written.
    #[error("failed to write report `{path}`: {source}")]
    Report {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the transcript or inline report to the output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// Classifies a `reqwest` failure the way the run output distinguishes them.
    pub fn from_reqwest(error: reqwest::Error, url: &str, timeout_ms: u64) -> Self {
        if error.is_timeout() {
            return Error::Timeout {
                url: url.to_string(),
                timeout_ms,
            };
        }
        Error::Transport(error)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
