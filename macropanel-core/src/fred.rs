//! FRED data source.
//!
//! Fetches series from the public fredgraph CSV download endpoint, which
//! requires no API key. Transient failures (network errors, 429, 5xx) are
//! retried with exponential backoff; a 404 means the series id is unknown.

use crate::provider::{FetchError, SeriesSource};
use std::time::Duration;

const BASE_URL: &str = "https://fred.stlouisfed.org/graph/fredgraph.csv";

/// The public FRED CSV endpoint.
pub struct FredCsvEndpoint {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl FredCsvEndpoint {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    fn series_url(series_id: &str) -> String {
        format!("{BASE_URL}?id={series_id}")
    }
}

impl Default for FredCsvEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesSource for FredCsvEndpoint {
    fn name(&self) -> &str {
        "fred"
    }

    fn fetch(&self, series_id: &str) -> Result<String, FetchError> {
        let url = Self::series_url(series_id);
        let mut attempt = 0;

        loop {
            let retryable = match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.text().map_err(|e| FetchError::Other(e.to_string()));
                    }
                    if status.as_u16() == 404 {
                        return Err(FetchError::SeriesNotFound {
                            id: series_id.to_string(),
                        });
                    }
                    if status.as_u16() == 429 || status.is_server_error() {
                        FetchError::HttpStatus {
                            status: status.as_u16(),
                        }
                    } else {
                        return Err(FetchError::HttpStatus {
                            status: status.as_u16(),
                        });
                    }
                }
                Err(e) => FetchError::NetworkUnreachable(e.to_string()),
            };

            if attempt >= self.max_retries {
                return Err(retryable);
            }
            std::thread::sleep(self.base_delay * 2u32.pow(attempt));
            attempt += 1;
        }
    }
}
