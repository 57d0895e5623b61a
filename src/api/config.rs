use std::{env, time::Duration};

use log::warn;
use rand::Rng;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Bounds for the artificial delay applied to offline fallback responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyRange {
    pub min: Duration,
    pub max: Duration,
}

impl LatencyRange {
    pub const fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub const fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.max <= self.min {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// `None` waits on the remote indefinitely.
    pub request_timeout: Option<Duration>,
    pub verify_fallback_latency: LatencyRange,
    pub news_fallback_latency: LatencyRange,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            verify_fallback_latency: LatencyRange::new(
                Duration::from_secs(2),
                Duration::from_secs(5),
            ),
            news_fallback_latency: LatencyRange::new(
                Duration::from_secs(1),
                Duration::from_secs(2),
            ),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `HEALTHCHECK_API_URL`, `HEALTHCHECK_REQUEST_TIMEOUT_MS`
    /// and `HEALTHCHECK_SIMULATE_LATENCY`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("HEALTHCHECK_API_URL") {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }

        if let Ok(raw) = env::var("HEALTHCHECK_REQUEST_TIMEOUT_MS") {
            match raw.trim().parse::<u64>() {
                Ok(0) => config.request_timeout = None,
                Ok(ms) => config.request_timeout = Some(Duration::from_millis(ms)),
                Err(err) => warn!("Ignoring HEALTHCHECK_REQUEST_TIMEOUT_MS={raw}: {err}"),
            }
        }

        let simulate = env::var("HEALTHCHECK_SIMULATE_LATENCY")
            .map(|value| !(value == "0" || value.eq_ignore_ascii_case("false")))
            .unwrap_or(true);
        if !simulate {
            config = config.without_latency();
        }

        config
    }

    pub fn without_latency(mut self) -> Self {
        self.verify_fallback_latency = LatencyRange::none();
        self.news_fallback_latency = LatencyRange::none();
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
