//! # SerpApi search proxy
//!
//! [`SerpApiService`] queries SerpApi's Google engines and maps the first ten results of each
//! search into flat records. Without an API key, or when a request fails, every search
//! answers with a small static table instead; [`SearchResults::source`] says which.

pub mod mock;
mod types;

pub use types::{Flight, Hotel, Product, Restaurant, SearchResults, SearchSource};

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_SERPAPI_BASE_URL: &str = "https://serpapi.com";
pub const DEFAULT_RESTAURANT_LOCATION: &str = "New York";

/// Results kept per search.
const MAX_RESULTS: usize = 10;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Search proxy over SerpApi with mock fallback.
#[derive(Debug, Clone)]
pub struct SerpApiService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl SerpApiService {
    /// A blank key counts as missing.
    pub fn new(api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            warn!("SERP_API_KEY not set, search endpoints will serve mock data");
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key,
            base_url: DEFAULT_SERPAPI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self, api_key: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/search.json", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("api_key", api_key)])
            .send()
            .await
            .context("SerpApi request failed")?;
        let status = response.status();
        if !status.is_success() {
            bail!("SerpApi returned HTTP {status}");
        }
        let body: Value = response
            .json()
            .await
            .context("SerpApi returned invalid JSON")?;
        if let Some(message) = body.get("error").and_then(Value::as_str) {
            bail!("SerpApi error: {message}");
        }
        Ok(body)
    }

    /// Runs one search, mapping up to [`MAX_RESULTS`] items of `results_key`; falls back to
    /// `fallback` when unconfigured or on any error.
    async fn search<T>(
        &self,
        kind: &'static str,
        params: Vec<(&str, String)>,
        results_key: &str,
        map: impl Fn(&Value) -> T,
        fallback: fn() -> Vec<T>,
    ) -> SearchResults<T> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!(kind, "Serving mock search results");
            return SearchResults::mock(fallback());
        };
        match self.fetch(api_key, &params).await {
            Ok(body) => {
                let results: Vec<T> = body
                    .get(results_key)
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
                    .take(MAX_RESULTS)
                    .map(map)
                    .collect();
                info!(kind, count = results.len(), "SerpApi search completed");
                SearchResults::live(results)
            }
            Err(e) => {
                warn!(kind, error = %e, "SerpApi search failed, serving mock data");
                SearchResults::mock(fallback())
            }
        }
    }

    /// Google Shopping search.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> SearchResults<Product> {
        let params = vec![
            ("engine", "google_shopping".to_string()),
            ("q", query.to_string()),
            ("num", "20".to_string()),
        ];
        self.search(
            "products",
            params,
            "shopping_results",
            |item| Product::from_shopping_result(item, category),
            mock::products,
        )
        .await
    }

    /// Google web search for `"{query} restaurants {location}"`. `location` defaults to
    /// [`DEFAULT_RESTAURANT_LOCATION`].
    #[instrument(skip(self))]
    pub async fn search_restaurants(
        &self,
        query: &str,
        location: Option<&str>,
    ) -> SearchResults<Restaurant> {
        let location = location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(DEFAULT_RESTAURANT_LOCATION);
        let params = vec![
            ("engine", "google".to_string()),
            ("q", format!("{query} restaurants {location}")),
            ("num", "10".to_string()),
        ];
        self.search(
            "restaurants",
            params,
            "organic_results",
            |item| Restaurant::from_organic_result(item, query),
            mock::restaurants,
        )
        .await
    }

    /// Google Flights one-way search for one adult, USD.
    #[instrument(skip(self))]
    pub async fn search_flights(&self, from: &str, to: &str, date: &str) -> SearchResults<Flight> {
        let params = vec![
            ("engine", "google_flights".to_string()),
            ("departure_id", from.to_string()),
            ("arrival_id", to.to_string()),
            ("outbound_date", date.to_string()),
            ("return_date", String::new()),
            ("adults", "1".to_string()),
            ("children", "0".to_string()),
            ("infants", "0".to_string()),
            ("currency", "USD".to_string()),
        ];
        self.search(
            "flights",
            params,
            "flights_results",
            |item| Flight::from_flight_result(item, from, to),
            mock::flights,
        )
        .await
    }

    /// Google Hotels search for two adults, USD.
    #[instrument(skip(self))]
    pub async fn search_hotels(
        &self,
        location: &str,
        check_in: &str,
        check_out: &str,
    ) -> SearchResults<Hotel> {
        let params = vec![
            ("engine", "google_hotels".to_string()),
            ("q", format!("hotels in {location}")),
            ("check_in", check_in.to_string()),
            ("check_out", check_out.to_string()),
            ("adults", "2".to_string()),
            ("children", "0".to_string()),
            ("currency", "USD".to_string()),
        ];
        self.search(
            "hotels",
            params,
            "hotels_results",
            |item| Hotel::from_hotel_result(item, location),
            mock::hotels,
        )
        .await
    }
}
