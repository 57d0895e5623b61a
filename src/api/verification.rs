use std::time::Duration;

use log::{info, warn};
use serde::Serialize;

use crate::models::VerificationResult;

use super::{fallback, ApiClient, ApiError};

pub const DEFAULT_LANGUAGE: &str = "auto";

#[derive(Serialize)]
struct VerifyRequest<'a> {
    input: &'a str,
    language: &'a str,
}

#[derive(Clone)]
pub struct VerificationClient {
    api: ApiClient,
}

impl VerificationClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Verifies `input` with the default `auto` language hint.
    /// Callers are expected to reject empty input beforehand.
    pub async fn verify(&self, input: &str) -> Result<VerificationResult, ApiError> {
        self.verify_with_language(input, DEFAULT_LANGUAGE).await
    }

    pub async fn verify_with_language(
        &self,
        input: &str,
        language: &str,
    ) -> Result<VerificationResult, ApiError> {
        match self.request(input, language).await {
            Ok(result) => {
                info!(
                    "Verification completed with verdict '{}' ({}%)",
                    result.verdict, result.confidence
                );
                Ok(result)
            }
            Err(err) if err.is_connectivity() => {
                warn!("Verification backend unreachable, using offline heuristic: {err}");
                Ok(self.offline_result(input).await)
            }
            Err(err) => Err(err),
        }
    }

    async fn request(&self, input: &str, language: &str) -> Result<VerificationResult, ApiError> {
        let url = self.api.endpoint("/api/verify");
        let response = self
            .api
            .http()
            .post(&url)
            .json(&VerifyRequest { input, language })
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(&url, err))?;

        self.api.read_json(&url, response).await
    }

    async fn offline_result(&self, input: &str) -> VerificationResult {
        let (result, delay): (VerificationResult, Duration) = {
            let mut rng = rand::thread_rng();
            let delay = self.api.config().verify_fallback_latency.sample(&mut rng);
            (fallback::verification_result(input, delay, &mut rng), delay)
        };
        tokio::time::sleep(delay).await;
        result
    }
}
