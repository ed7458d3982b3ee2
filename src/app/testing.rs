//! In-memory provider used by the stage and pipeline unit tests.

use crate::domain::model::DestinationId;
use crate::domain::ports::TravelProvider;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct FakeProvider {
    locations: Vec<Value>,
    hotels: Vec<Value>,
    reviews: HashMap<String, Vec<Value>>,
    failing_reviews: HashSet<String>,
    review_delays: HashMap<String, Duration>,
    fail_locations: bool,
    fail_hotels: bool,
    calls: Mutex<Vec<String>>,
    completed: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locations(mut self, locations: Vec<Value>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_hotels(mut self, hotels: Vec<Value>) -> Self {
        self.hotels = hotels;
        self
    }

    pub fn with_reviews(mut self, hotel_id: &str, reviews: Vec<Value>) -> Self {
        self.reviews.insert(hotel_id.to_string(), reviews);
        self
    }

    pub fn failing_reviews_for(mut self, hotel_id: &str) -> Self {
        self.failing_reviews.insert(hotel_id.to_string());
        self
    }

    /// 延遲回應該飯店的評論，用來模擬較慢的請求
    pub fn with_review_delay(mut self, hotel_id: &str, delay: Duration) -> Self {
        self.review_delays.insert(hotel_id.to_string(), delay);
        self
    }

    pub fn failing_locations(mut self) -> Self {
        self.fail_locations = true;
        self
    }

    pub fn failing_hotels(mut self) -> Self {
        self.fail_hotels = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Hotel ids in the order their review requests finished.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

fn unavailable(endpoint: &str) -> EtlError {
    EtlError::HttpStatusError {
        endpoint: endpoint.to_string(),
        status: 503,
    }
}

#[async_trait]
impl TravelProvider for FakeProvider {
    async fn search_locations(&self, place_name: &str) -> Result<Vec<Value>> {
        self.record(format!("locations:{}", place_name));
        if self.fail_locations {
            return Err(unavailable("locations"));
        }
        Ok(self.locations.clone())
    }

    async fn search_hotels(&self, destination: &DestinationId) -> Result<Vec<Value>> {
        self.record(format!("hotels:{}", destination));
        if self.fail_hotels {
            return Err(unavailable("search"));
        }
        Ok(self.hotels.clone())
    }

    async fn hotel_reviews(&self, hotel_id: &str) -> Result<Vec<Value>> {
        self.record(format!("reviews:{}", hotel_id));
        if let Some(delay) = self.review_delays.get(hotel_id) {
            tokio::time::sleep(*delay).await;
        }
        if let Ok(mut completed) = self.completed.lock() {
            completed.push(hotel_id.to_string());
        }
        if self.failing_reviews.contains(hotel_id) {
            return Err(unavailable("reviews"));
        }
        Ok(self.reviews.get(hotel_id).cloned().unwrap_or_default())
    }
}

pub fn hotel(id: u64) -> Value {
    json!({
        "hotel_id": id,
        "hotel_name": format!("Hotel {}", id),
        "url": format!("https://www.booking.com/hotel/sa/hotel-{}.html", id),
        "class": 4,
        "latitude": 21.42,
        "longitude": 39.82,
        "currencycode": "AED"
    })
}

pub fn review(title: &str) -> Value {
    json!({
        "title": title,
        "pros": "Close to the Haram",
        "cons": "Small rooms",
        "average_score": 8.5,
        "date": "2023-06-01 12:00:00",
        "reviewer_name": "Anonymous"
    })
}
