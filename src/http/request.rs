use super::method::HttpMethod;

/// One request against the configured base URL.
#[derive(Debug, Clone)]
pub struct RequestInput {
    pub method: HttpMethod,
    /// Path suffix, including any query string, appended verbatim.
    pub endpoint: String,
    pub body: Option<String>,
}

impl RequestInput {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}
