use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

#[derive(Debug, Clone, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    target_language: &'a str,
    source_language: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Clone, Serialize)]
struct ExtractRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedArticle {
    pub text: String,
    pub url: String,
    #[serde(default)]
    pub extracted_at: Option<String>,
}

// Like health, these have no offline answer.
impl ApiClient {
    /// `source_language` may be `"auto"`.
    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
    ) -> Result<Translation, ApiError> {
        let url = self.endpoint("/api/translate");
        let body = TranslateRequest {
            text,
            target_language,
            source_language,
        };
        let response = self
            .http()
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(&url, err))?;
        self.read_json(&url, response).await
    }

    /// Asks the backend for the readable text of the article at `article_url`.
    pub async fn extract(&self, article_url: &str) -> Result<ExtractedArticle, ApiError> {
        let url = self.endpoint("/api/extract");
        let response = self
            .http()
            .post(&url)
            .json(&ExtractRequest { url: article_url })
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(&url, err))?;
        self.read_json(&url, response).await
    }
}
