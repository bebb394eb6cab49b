//! Page fetching

use crate::ToolResult;
use a11y_core::FetchedPage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Anything that can turn a URL into a fetched page
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> ToolResult<FetchedPage>;
}

/// Configuration for page fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User agent string
    pub user_agent: String,

    /// Request timeout (seconds)
    pub timeout_secs: u64,

    /// Maximum redirects to follow
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("a11y-scanner/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            max_redirects: 10,
        }
    }
}

/// Fetches pages for scanning
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> ToolResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    /// GET `url`; any status is returned, only transport failures are errors
    async fn fetch(&self, url: &str) -> ToolResult<FetchedPage> {
        tracing::info!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let text = response.text().await?;

        tracing::debug!("Fetched {} ({} bytes, status {})", final_url, text.len(), status);

        Ok(FetchedPage::new(final_url, status, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("a11y-scanner/"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_error() {
        let fetcher = PageFetcher::new(&FetchConfig {
            timeout_secs: 2,
            ..FetchConfig::default()
        })
        .unwrap();
        // Port 9 on loopback is the discard service; nothing listens there in CI
        assert!(fetcher.fetch("http://127.0.0.1:9/").await.is_err());
    }
}
