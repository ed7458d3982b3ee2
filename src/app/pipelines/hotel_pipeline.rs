use crate::adapters::http::RapidApiClient;
use crate::app::{enricher::ReviewEnricher, exporter, listing, resolver};
use crate::config::{AppConfig, FailurePolicy};
use crate::domain::model::{EnrichmentReport, Venue};
use crate::domain::ports::{Pipeline, Storage, TravelProvider};
use crate::utils::error::{ErrorCategory, EtlError, Result};

/// 地名 → 飯店清單 → 評論 → CSV
pub struct HotelReviewsPipeline<S: Storage, P: TravelProvider> {
    pub(crate) storage: S,
    pub(crate) provider: P,
    pub(crate) config: AppConfig,
}

impl<S: Storage, P: TravelProvider> HotelReviewsPipeline<S, P> {
    pub fn new(storage: S, provider: P, config: AppConfig) -> Self {
        Self {
            storage,
            provider,
            config,
        }
    }

    /// degrade 模式下，查詢失敗視為「沒有資料」繼續執行；設定錯誤一律中止
    fn recover(&self, stage: &str, error: EtlError) -> Result<Vec<Venue>> {
        let degrade = self.config.error_handling.on_api_failure == FailurePolicy::Degrade
            && error.category() != ErrorCategory::Configuration;

        if degrade {
            tracing::warn!("⚠️ {} failed, continuing with no hotels: {}", stage, error);
            Ok(Vec::new())
        } else {
            tracing::error!("❌ {} failed: {}", stage, error);
            Err(error)
        }
    }
}

impl<S: Storage> HotelReviewsPipeline<S, RapidApiClient> {
    pub fn with_rapid_api(storage: S, config: AppConfig) -> Result<Self> {
        let provider = RapidApiClient::from_config(&config)?;
        Ok(Self::new(storage, provider, config))
    }
}

#[async_trait::async_trait]
impl<S: Storage, P: TravelProvider> Pipeline for HotelReviewsPipeline<S, P> {
    async fn extract(&self) -> Result<Vec<Venue>> {
        let search = &self.config.search;

        let destination = match resolver::resolve_destination(&self.provider, &search.place_name).await {
            Ok(destination) => destination,
            Err(e) => return self.recover("Location search", e),
        };

        match listing::fetch_hotels(&self.provider, &destination, search.max_hotels).await {
            Ok(venues) => Ok(venues),
            Err(e) => self.recover("Hotel search", e),
        }
    }

    async fn transform(&self, venues: Vec<Venue>) -> Result<EnrichmentReport> {
        let report = ReviewEnricher::new(&self.provider, self.config.search.max_reviews)
            .with_concurrency(self.config.performance.concurrent_requests)
            .enrich(&venues)
            .await;
        Ok(report)
    }

    async fn load(&self, report: EnrichmentReport) -> Result<String> {
        let file_name = self.config.load.file_name();
        exporter::export(&self.storage, &file_name, &report.rows).await?;
        Ok(self.config.load.output_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{hotel, review, FakeProvider};
    use crate::config::ApiConfig;
    use crate::utils::error::Result;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Debug, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.get_file(path).await.ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn config(policy: FailurePolicy) -> AppConfig {
        let mut config = AppConfig::new(ApiConfig {
            base_url: "http://localhost".to_string(),
            api_key: "k".to_string(),
            api_host: "h".to_string(),
            timeout_seconds: None,
        });
        config.load.output_path = "out/hotels.csv".to_string();
        config.error_handling.on_api_failure = policy;
        config
    }

    async fn run<P: TravelProvider>(
        provider: P,
        policy: FailurePolicy,
    ) -> Result<(MockStorage, EnrichmentReport)> {
        let storage = MockStorage::default();
        let pipeline = HotelReviewsPipeline::new(storage.clone(), provider, config(policy));

        let venues = pipeline.extract().await?;
        let report = pipeline.transform(venues).await?;
        pipeline.load(report.clone()).await?;
        Ok((storage, report))
    }

    #[tokio::test]
    async fn test_scenario_two_hotels() {
        let provider = FakeProvider::new()
            .with_locations(vec![json!({"dest_id": "-123"})])
            .with_hotels(vec![hotel(1), hotel(2)])
            .with_reviews("1", vec![review("a"), review("b"), review("c")]);

        let (storage, report) = run(provider, FailurePolicy::Abort).await.unwrap();
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.placeholder_count, 1);

        let csv = storage.read_file("hotels.csv").await.unwrap();
        assert_eq!(String::from_utf8(csv).unwrap().lines().count(), 5);
    }

    #[tokio::test]
    async fn test_abort_on_missing_location() {
        let provider = FakeProvider::new().with_locations(vec![]);

        let err = run(provider, FailurePolicy::Abort).await.unwrap_err();
        assert!(matches!(err, EtlError::LocationNotFound { .. }));
    }

    #[tokio::test]
    async fn test_degrade_on_failed_hotel_search_writes_header_only() {
        let provider = FakeProvider::new()
            .with_locations(vec![json!({"dest_id": "-123"})])
            .failing_hotels();

        let (storage, report) = run(provider, FailurePolicy::Degrade).await.unwrap();
        assert!(report.rows.is_empty());

        let csv = storage.get_file("hotels.csv").await.unwrap();
        assert_eq!(String::from_utf8(csv).unwrap().lines().count(), 1);
    }

    #[tokio::test]
    async fn test_degrade_still_rejects_configuration_errors() {
        let storage = MockStorage::default();
        let mut config = config(FailurePolicy::Degrade);
        config.search.place_name = String::new();
        let pipeline = HotelReviewsPipeline::new(storage, FakeProvider::new(), config);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, EtlError::ValidationError { .. }));
    }
}
