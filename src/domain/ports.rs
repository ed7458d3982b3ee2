use crate::domain::model::{DestinationId, EnrichmentReport, Venue};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 旅遊資料 Provider 的三個查詢端點。
///
/// 回傳未經投影的 JSON 項目，欄位挑選交給各階段處理。
#[async_trait]
pub trait TravelProvider: Send + Sync {
    /// Location search; items in provider relevance order.
    async fn search_locations(&self, place_name: &str) -> Result<Vec<Value>>;

    /// Hotel search for a destination, ranked by the provider.
    async fn search_hotels(&self, destination: &DestinationId) -> Result<Vec<Value>>;

    /// Reviews for one hotel, most relevant first.
    async fn hotel_reviews(&self, hotel_id: &str) -> Result<Vec<Value>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Venue>>;
    async fn transform(&self, venues: Vec<Venue>) -> Result<EnrichmentReport>;
    async fn load(&self, report: EnrichmentReport) -> Result<String>;
}
