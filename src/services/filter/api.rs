// Calendar REST client
// Fetches server-rendered calendar fragments for server-mode filtering

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

use super::query::CalendarQuery;
use crate::models::calendar_response::CalendarResponse;

/// Source of server-rendered calendar pages.
#[cfg_attr(test, mockall::automock)]
pub trait CalendarApi {
    fn fetch(&self, query: &CalendarQuery) -> Result<CalendarResponse>;
}

pub struct RestCalendarApi {
    client: Client,
    base_url: String,
}

impl RestCalendarApi {
    pub fn new(base_url: &str) -> Result<Self> {
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(anyhow!("Calendar base URL must be http(s): {}", base_url));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .context("Failed to build calendar HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl CalendarApi for RestCalendarApi {
    fn fetch(&self, query: &CalendarQuery) -> Result<CalendarResponse> {
        let url = query.url(&self.base_url);
        log::debug!("Fetching calendar page {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .context("Network error during calendar fetch")?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(anyhow!("Calendar fetch failed with HTTP status {}", status));
        }

        let body: CalendarResponse = response
            .json()
            .context("Calendar response is not valid JSON")?;

        if !body.success {
            return Err(anyhow!(
                "{}",
                body.message
                    .unwrap_or_else(|| "Calendar request was not successful".to_string())
            ));
        }

        Ok(body)
    }
}
