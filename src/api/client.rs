use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};

use super::{ApiConfig, ApiError};

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP plumbing shared by every backend endpoint client.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let mut builder =
            Client::builder().user_agent(concat!("healthcheck/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Setup)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// Reads the body and decodes it, turning non-2xx statuses into [`ApiError::Remote`].
    pub(crate) async fn read_json<T: DeserializeOwned>(
        &self,
        url: &str,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::from_reqwest(url, err))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|payload| payload.error)
                .unwrap_or_else(|| format!("request failed with status {status}"));
            return Err(ApiError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
