//! Outbound prediction requests.

use std::{fmt, str::FromStr};

use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{
    error::{ConfigError, TransportError},
    types::FormSnapshot,
};

/// Body encoding of the form POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormEncoding {
    /// `multipart/form-data`, what a browser sends for `FormData`.
    Multipart,
    /// `application/x-www-form-urlencoded`.
    #[serde(alias = "url_encoded")]
    UrlEncoded,
}

impl fmt::Display for FormEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormEncoding::Multipart => f.write_str("multipart"),
            FormEncoding::UrlEncoded => f.write_str("urlencoded"),
        }
    }
}

impl FromStr for FormEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multipart" | "form-data" => Ok(FormEncoding::Multipart),
            "urlencoded" | "url_encoded" | "form" => Ok(FormEncoding::UrlEncoded),
            other => Err(ConfigError::UnknownEncoding(other.to_string())),
        }
    }
}

/// Sends one form snapshot and yields the decoded JSON body.
#[async_trait]
pub trait PredictionTransport: Send + Sync {
    async fn post_form(&self, form: &FormSnapshot) -> Result<serde_json::Value, TransportError>;
}

pub struct HttpTransport {
    http: Client,
    endpoint: Url,
    encoding: FormEncoding,
}

impl HttpTransport {
    /// No request timeout is configured; a request lasts until the transport
    /// itself succeeds or fails.
    pub fn new(endpoint: Url, encoding: FormEncoding) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            encoding,
        }
    }
}

#[async_trait]
impl PredictionTransport for HttpTransport {
    async fn post_form(&self, form: &FormSnapshot) -> Result<serde_json::Value, TransportError> {
        let fields = form.fields();
        let request = self.http.post(self.endpoint.clone());
        let request = match self.encoding {
            FormEncoding::Multipart => {
                let body = fields
                    .into_iter()
                    .fold(multipart::Form::new(), |body, (name, value)| {
                        body.text(name, value)
                    });
                request.multipart(body)
            }
            FormEncoding::UrlEncoded => request.form(&fields),
        };

        debug!(endpoint = %self.endpoint, encoding = %self.encoding, "posting prediction form");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(TransportError::Malformed)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
