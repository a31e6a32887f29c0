//! Response decoding: `{ message, data }` envelope unwrapping and the
//! service's error-body conventions.

use reqwest::StatusCode;
use serde::{Deserialize, de::DeserializeOwned};

use crate::prelude::*;

/// Successful responses wrap the payload into `{ message, data }`.
#[derive(Deserialize)]
pub struct Envelope<R> {
    #[allow(dead_code)]
    #[serde(default)]
    pub message: Option<String>,

    pub data: R,
}

/// Failed responses carry `{ message | error, reason? }`.
#[derive(Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    error: Option<String>,

    #[serde(default)]
    reason: Option<String>,
}

impl ErrorBody {
    fn message(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

/// Decode the raw JSON body, mapping failed statuses onto the error classes
/// the storefront distinguishes.
pub async fn read<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(into_error(status, &body));
    }
    response.json().await.context("failed to deserialize the response")
}

/// Decode the body and unwrap the `{ message, data }` envelope.
pub async fn read_data<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
    Ok(read::<Envelope<R>>(response).await?.data)
}

/// Verify the status and discard the body.
pub async fn check(response: reqwest::Response) -> Result {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(into_error(status, &body))
}

fn into_error(status: StatusCode, body: &str) -> Error {
    let body = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED => {
            anyhow!("the session has expired or the token is invalid, authenticate again")
        }
        StatusCode::SERVICE_UNAVAILABLE => match body.reason {
            Some(reason) => anyhow!("this section is currently unavailable: {reason}"),
            None => anyhow!("this section is currently unavailable"),
        },
        _ => match body.message() {
            Some(message) => anyhow!("the service call failed with {status}: {message}"),
            None => anyhow!("the service call failed with {status}"),
        },
    }
}
