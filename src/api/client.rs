//! Blocking HTTP client for the storefront backend.
//!
//! One request per call, no retries and no explicit timeout; the transport defaults
//! apply. Callers that must keep the UI responsive run calls on a worker thread
//! (see [`super::worker`]).

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, warn};

use super::error::FetchError;
use super::query::ProductQuery;
use crate::models::{ProductSummary, UserSettings};
use crate::parsers::parse_product_list;

/// Path of the profile endpoint
pub const PROFILE_PATH: &str = "/api/profile/";

/// Anything that can answer a product search
pub trait ProductSource {
    fn search_products(&self, query: &ProductQuery) -> Result<Vec<ProductSummary>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: Client,
    base_url: String,
}

impl StorefrontClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("petshop-storefront/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a product search
    pub fn products_url(&self, query: &ProductQuery) -> String {
        format!("{}{}", self.base_url, query.path_and_query())
    }

    /// GET a path and return the body of a successful response
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");
        let response = self.http.get(url).send().map_err(|e| {
            warn!(url, error = %e, "Request failed");
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            warn!(url, error = %e, "Failed to read response body");
            FetchError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            let err = FetchError::from_status(status.as_u16(), &body);
            warn!(url, status = status.as_u16(), error = %err, "Request rejected");
            return Err(err);
        }

        Ok(body)
    }

    /// Load display settings of the signed-in user
    pub fn fetch_user_settings(&self) -> Result<UserSettings, FetchError> {
        let url = format!("{}{}", self.base_url, PROFILE_PATH);
        let body = self.get_text(&url)?;
        serde_json::from_str(&body).map_err(|e| FetchError::Transport(e.to_string()))
    }
}

impl ProductSource for StorefrontClient {
    fn search_products(&self, query: &ProductQuery) -> Result<Vec<ProductSummary>, FetchError> {
        let url = self.products_url(query);
        let body = self.get_text(&url)?;
        let products = parse_product_list(&body);
        debug!(url, count = products.len(), "Product search finished");
        Ok(products)
    }
}
