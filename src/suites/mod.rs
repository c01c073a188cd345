//! Fixed test suites against the pet-store API.
//!
//! Cases share server-side state through literal identifiers (pet `12345`,
//! order `1`, user `testuser123`) rather than values captured from earlier
//! responses, so their outcomes depend on what earlier cases left behind.

pub mod regression;
pub mod smoke;

use clap::ValueEnum;
use serde_json::{Map, Value};

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::http::client::ApiClient;
use crate::testing::TestCase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Suite {
    /// Sixteen single-request checks; only HTTP 200 passes.
    Smoke,
    /// Status-code expectations per endpoint.
    Regression,
}

impl Suite {
    pub fn name(self) -> &'static str {
        match self {
            Suite::Smoke => "smoke",
            Suite::Regression => "regression",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Suite::Smoke => "PETSTORE API TESTS",
            Suite::Regression => "PETSTORE REGRESSION TESTS",
        }
    }

    pub fn cases<'a>(self, client: &'a ApiClient, clock: &'a dyn Clock) -> Vec<TestCase<'a>> {
        match self {
            Suite::Smoke => smoke::cases(client, clock),
            Suite::Regression => regression::cases(client),
        }
    }
}

pub(crate) fn decode_object(body: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::Shape {
            expected: "object",
            body: body.to_string(),
        }),
    }
}

pub(crate) fn decode_array(body: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => Ok(items),
        _ => Err(Error::Shape {
            expected: "array",
            body: body.to_string(),
        }),
    }
}

/// Display form of a required field: strings bare, everything else as JSON.
pub(crate) fn field_text(object: &Map<String, Value>, key: &str) -> Result<String> {
    match object.get(key) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(value) => Ok(value.to_string()),
        None => Err(Error::MissingField(key.to_string())),
    }
}

/// Integer value of an optional field, falling back to `default`.
pub(crate) fn field_int_or(object: &Map<String, Value>, key: &str, default: i64) -> i64 {
    match object.get(key) {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f as i64))
            .unwrap_or(default),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(default),
        _ => default,
    }
}

pub(crate) fn to_json<T: serde::Serialize>(payload: &T) -> Result<String> {
    Ok(serde_json::to_string(payload)?)
}
