use std::{fmt, str::FromStr};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub published_at: String,
    pub source: String,
}

/// Feed filter understood by the news endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsSource {
    #[default]
    All,
    Who,
    Cdc,
    Pubmed,
}

impl NewsSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsSource::All => "all",
            NewsSource::Who => "who",
            NewsSource::Cdc => "cdc",
            NewsSource::Pubmed => "pubmed",
        }
    }
}

impl fmt::Display for NewsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(NewsSource::All),
            "who" => Ok(NewsSource::Who),
            "cdc" => Ok(NewsSource::Cdc),
            "pubmed" => Ok(NewsSource::Pubmed),
            other => Err(anyhow!("unknown news source '{other}'")),
        }
    }
}
