use log::{error, warn};
use serde::Deserialize;

use crate::models::{NewsArticle, NewsSource};

use super::{fallback, ApiClient, ApiError};

#[derive(Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Option<Vec<NewsArticle>>,
}

#[derive(Clone)]
pub struct NewsClient {
    api: ApiClient,
}

impl NewsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_news(&self, limit: usize) -> Vec<NewsArticle> {
        self.fetch_news_from(NewsSource::All, limit).await
    }

    /// Never fails: remote errors yield an empty list, an unreachable
    /// backend yields the offline fixtures.
    pub async fn fetch_news_from(&self, source: NewsSource, limit: usize) -> Vec<NewsArticle> {
        match self.request(source, limit).await {
            Ok(articles) => articles,
            Err(err) if err.is_connectivity() => {
                warn!("News backend unreachable, serving offline articles: {err}");
                self.offline_articles().await
            }
            Err(err) => {
                error!("Failed to fetch news: {err}");
                Vec::new()
            }
        }
    }

    async fn request(
        &self,
        source: NewsSource,
        limit: usize,
    ) -> Result<Vec<NewsArticle>, ApiError> {
        let url = self.api.endpoint("/api/news");
        let mut query = vec![("limit", limit.to_string())];
        if source != NewsSource::All {
            query.push(("source", source.as_str().to_string()));
        }

        let response = self
            .api
            .http()
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(&url, err))?;

        let payload: NewsResponse = self.api.read_json(&url, response).await?;
        Ok(payload.articles.unwrap_or_default())
    }

    async fn offline_articles(&self) -> Vec<NewsArticle> {
        let (articles, delay) = {
            let mut rng = rand::thread_rng();
            let delay = self.api.config().news_fallback_latency.sample(&mut rng);
            (fallback::news_articles(&mut rng), delay)
        };
        tokio::time::sleep(delay).await;
        articles
    }
}
