//! Cost-and-usage pages fetched over HTTP.
//!
//! Speaks the JSON protocol of the cost explorer API: the query is POSTed as an
//! `application/x-amz-json-1.1` body with the `GetCostAndUsage` target header.
//! Request signing is the caller's concern; any credentials or gateway headers
//! are attached with [`HttpCostSource::header`].

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::CostSource;
use crate::error::{CostReportError, Result};
use crate::models::CostPage;
use crate::query::CostQuery;

pub const CONTENT_TYPE_AMZ_JSON: &str = "application/x-amz-json-1.1";
pub const GET_COST_AND_USAGE_TARGET: &str = "AWSInsightsIndexService.GetCostAndUsage";

/// Fetches pages from an HTTP endpoint, one blocking request per page.
pub struct HttpCostSource {
    endpoint: String,
    timeout: Duration,
    headers: Vec<(String, String)>,
    client: Option<Client>,
}

impl HttpCostSource {
    /// Create a source posting to `endpoint`. Defaults to a 60 second timeout.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            timeout: Duration::from_secs(60),
            headers: Vec::new(),
            client: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attach an extra header to every request.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Lazy HTTP client, created on first use.
    fn client(&mut self) -> Result<Client> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = Client::builder().timeout(self.timeout).build()?;
        self.client = Some(client.clone());
        Ok(client)
    }
}

impl CostSource for HttpCostSource {
    fn fetch_page(&mut self, query: &CostQuery, next_page_token: Option<&str>) -> Result<CostPage> {
        let body = serde_json::to_vec(&query.request_body(next_page_token)?)?;
        debug!(endpoint = %self.endpoint, continued = next_page_token.is_some(), "requesting cost page");

        let client = self.client()?;
        let mut request = client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, CONTENT_TYPE_AMZ_JSON)
            .header("X-Amz-Target", GET_COST_AND_USAGE_TARGET)
            .body(body);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let resp = request.send()?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().unwrap_or_default();
            return Err(CostReportError::DataSource(format!(
                "{} returned {}: {}",
                self.endpoint, status, detail
            )));
        }

        Ok(resp.json::<CostPage>()?)
    }
}
