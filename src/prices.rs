//! Price-history service.
//!
//! Fetches the public UEEX quotation page and turns it into a
//! [`PriceHistory`]. Any failure (transport, status, nothing parsable) is
//! logged and replaced with a synthetic series so the chart always renders.

use std::time::Duration;

use chrono::{Datelike, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

use ueex_core::models::enums::PricePeriod;
use ueex_core::prices::{build_history, generate_synthetic, parse_quotations};
use ueex_core::{PriceDataPoint, PriceError, PriceHistory, PriceSource};

pub const DEFAULT_QUOTATIONS_URL: &str = "https://www.ueex.com.ua/exchange-quotations/power-market/";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

/// Where and how to look for quotations.
#[derive(Debug, Clone)]
pub struct PriceSourceConfig {
    pub url: String,
    pub timeout: Duration,
    /// Skip the network and always serve synthetic data.
    pub offline: bool,
}

impl Default for PriceSourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_QUOTATIONS_URL.to_string(),
            timeout: Duration::from_secs(10),
            offline: false,
        }
    }
}

/// Stateless price-history provider shared by all request handlers.
pub struct PriceService {
    client: reqwest::Client,
    config: PriceSourceConfig,
}

impl PriceService {
    pub fn new(config: PriceSourceConfig) -> Result<Self, PriceError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("uk,en;q=0.9"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| PriceError::Fetch(format!("client setup: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn is_offline(&self) -> bool {
        self.config.offline
    }

    /// Price history for `period`, falling back to synthetic data.
    pub async fn history(&self, period: PricePeriod) -> PriceHistory {
        tracing::info!(%period, "fetching price history");

        let fetched = if self.config.offline {
            Err(PriceError::Fetch("offline mode".into()))
        } else {
            self.fetch_quotations().await
        };

        let now = Utc::now();
        let history = match fetched {
            Ok(prices) => build_history(&prices, period, PriceSource::Ueex, now, None),
            Err(e) => {
                tracing::warn!(error = %e, "using synthetic price data");
                let synthetic = synthetic_series();
                build_history(
                    &synthetic,
                    period,
                    PriceSource::Synthetic,
                    now,
                    Some(format!("Дані УЕЕХ недоступні, показано модельні ціни ({e})")),
                )
            }
        };

        tracing::info!(records = history.data.len(), source = ?history.source, "price history ready");
        history
    }

    async fn fetch_quotations(&self) -> Result<Vec<PriceDataPoint>, PriceError> {
        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| PriceError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PriceError::Status(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| PriceError::Fetch(e.to_string()))?;
        tracing::debug!(bytes = html.len(), "quotation page fetched");

        let prices = parse_page(&html);
        if prices.is_empty() {
            return Err(PriceError::NoPrices(html.len()));
        }
        tracing::debug!(count = prices.len(), "quotations parsed");
        Ok(prices)
    }
}

fn parse_page(html: &str) -> Vec<PriceDataPoint> {
    let year = Utc::now().year();
    parse_quotations(html, year, &mut rand::rng())
}

fn synthetic_series() -> Vec<PriceDataPoint> {
    generate_synthetic(Utc::now().date_naive(), &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_service() -> PriceService {
        PriceService::new(PriceSourceConfig {
            offline: true,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn offline_service_serves_synthetic_data() {
        let service = offline_service();
        assert!(service.is_offline());

        let history = service.history(PricePeriod::Week).await;
        assert_eq!(history.source, PriceSource::Synthetic);
        assert_eq!(history.data.len(), 8);
        assert!(history.notice.is_some());
        assert_eq!(
            history.stats.last_price,
            history.data.last().unwrap().day_ahead
        );
    }

    #[tokio::test]
    async fn unreachable_source_falls_back() {
        let service = PriceService::new(PriceSourceConfig {
            url: "http://127.0.0.1:9/quotations".into(),
            timeout: Duration::from_millis(500),
            offline: false,
        })
        .unwrap();

        let history = service.history(PricePeriod::Quarter).await;
        assert_eq!(history.source, PriceSource::Synthetic);
        assert_eq!(history.data.len(), 90);
    }

    #[test]
    fn page_without_quotes_parses_to_nothing() {
        assert!(parse_page("<html></html>").is_empty());
    }
}
