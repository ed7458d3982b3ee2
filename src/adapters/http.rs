use crate::config::{ApiConfig, AppConfig, SearchConfig};
use crate::domain::model::DestinationId;
use crate::domain::ports::TravelProvider;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const LOCATIONS_PATH: &str = "/v1/hotels/locations";
pub const SEARCH_PATH: &str = "/v1/hotels/search";
pub const REVIEWS_PATH: &str = "/v1/hotels/reviews";

const API_KEY_HEADER: &str = "X-RapidAPI-Key";
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

/// RapidAPI 上的 booking.com 資料來源
pub struct RapidApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    api_host: String,
    search: SearchConfig,
}

impl RapidApiClient {
    pub fn new(api: &ApiConfig, search: &SearchConfig) -> Result<Self> {
        let mut builder = Client::builder();

        // 設定超時，沒設定就無限等待
        if let Some(timeout) = api.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            api_key: api.api_key.clone(),
            api_host: api.api_host.clone(),
            search: search.clone(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.api, &config.search)
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let endpoint = format!("{}{}", self.base_url, path);
        tracing::debug!("Making API request to: {} {:?}", endpoint, query);

        let response = self
            .client
            .get(&endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_HOST_HEADER, &self.api_host)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TravelProvider for RapidApiClient {
    async fn search_locations(&self, place_name: &str) -> Result<Vec<Value>> {
        let body = self
            .get_json(
                LOCATIONS_PATH,
                &[
                    ("locale", self.search.locale.clone()),
                    ("name", place_name.to_string()),
                ],
            )
            .await?;

        // 地點搜尋直接回傳陣列
        match body {
            Value::Array(items) => Ok(items),
            other => Err(unexpected_shape(LOCATIONS_PATH, "an array", &other)),
        }
    }

    async fn search_hotels(&self, destination: &DestinationId) -> Result<Vec<Value>> {
        let s = &self.search;
        let body = self
            .get_json(
                SEARCH_PATH,
                &[
                    ("dest_id", destination.to_string()),
                    ("order_by", s.order_by.clone()),
                    ("filter_by_currency", s.currency.clone()),
                    ("adults_number", s.adults_number.to_string()),
                    ("room_number", s.room_number.to_string()),
                    ("checkout_date", s.checkout_date.clone()),
                    ("units", s.units.clone()),
                    ("checkin_date", s.checkin_date.clone()),
                    ("dest_type", s.dest_type.clone()),
                    ("locale", s.locale.clone()),
                ],
            )
            .await?;

        result_items(SEARCH_PATH, body)
    }

    async fn hotel_reviews(&self, hotel_id: &str) -> Result<Vec<Value>> {
        let body = self
            .get_json(
                REVIEWS_PATH,
                &[
                    ("hotel_id", hotel_id.to_string()),
                    ("locale", self.search.locale.clone()),
                    ("sort_type", self.search.review_sort.clone()),
                ],
            )
            .await?;

        result_items(REVIEWS_PATH, body)
    }
}

/// 取出 `{"result": [...]}` 中的陣列
///
/// 缺少 `result` 或為 `null` 時是錯誤回應（例如 `{"message": "..."}`），空陣列才是沒有資料。
fn result_items(endpoint: &str, body: Value) -> Result<Vec<Value>> {
    let Value::Object(mut obj) = body else {
        return Err(unexpected_shape(endpoint, "an object", &body));
    };

    match obj.remove("result") {
        None | Some(Value::Null) => {
            let message = match obj.get("message").and_then(Value::as_str) {
                Some(provider_message) => {
                    format!("missing `result` array (provider said: {})", provider_message)
                }
                None => "missing `result` array".to_string(),
            };
            Err(EtlError::UnexpectedResponse {
                endpoint: endpoint.to_string(),
                message,
            })
        }
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(unexpected_shape(endpoint, "a `result` array", &other)),
    }
}

fn unexpected_shape(endpoint: &str, expected: &str, got: &Value) -> EtlError {
    let kind = match got {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    EtlError::UnexpectedResponse {
        endpoint: endpoint.to_string(),
        message: format!("expected {}, got {}", expected, kind),
    }
}
