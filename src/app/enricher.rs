use crate::domain::model::{EnrichmentReport, FailedVenue, JsonObject, OutputRow, Review, Venue};
use crate::domain::ports::TravelProvider;
use crate::utils::error::{EtlError, Result};
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use serde_json::Value;

/// 為每間飯店抓取評論並攤平成匯出列。
///
/// 單間飯店失敗只會記錄警告並跳過，不會中斷整批作業。
pub struct ReviewEnricher<'a, P: ?Sized> {
    provider: &'a P,
    max_reviews: usize,
    concurrency: usize,
}

impl<'a, P> ReviewEnricher<'a, P>
where
    P: TravelProvider + ?Sized,
{
    pub fn new(provider: &'a P, max_reviews: usize) -> Self {
        Self {
            provider,
            max_reviews,
            concurrency: 1,
        }
    }

    /// At most `concurrency` review requests are in flight; output order is unaffected.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn enrich(&self, venues: &[Venue]) -> EnrichmentReport {
        tracing::info!(
            "📝 Fetching reviews for {} hotels ({} at a time)",
            venues.len(),
            self.concurrency
        );

        // 先建立所有請求，再交給 buffered；結果依輸入順序回傳，飯店順序與評論分組不會被打亂
        let requests: Vec<BoxFuture<'_, Result<VenueRows>>> = venues
            .iter()
            .map(|venue| self.venue_rows(venue).boxed())
            .collect();
        let outcomes: Vec<Result<VenueRows>> = stream::iter(requests)
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut report = EnrichmentReport {
            venue_count: venues.len(),
            ..EnrichmentReport::default()
        };

        for (venue, outcome) in venues.iter().zip(outcomes) {
            match outcome {
                Ok(venue_rows) => {
                    if venue_rows.placeholder {
                        report.placeholder_count += 1;
                    }
                    report.rows.extend(venue_rows.rows);
                }
                Err(e) => {
                    tracing::warn!("⚠️ Skipping {}: {}", venue.label(), e);
                    report.failed_venues.push(FailedVenue {
                        venue: venue.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "✅ Built {} rows ({} without reviews, {} hotels failed)",
            report.rows.len(),
            report.placeholder_count,
            report.failed_venues.len()
        );
        report
    }

    async fn venue_rows(&self, venue: &Venue) -> Result<VenueRows> {
        let hotel_id = venue
            .hotel_id
            .as_deref()
            .ok_or_else(|| EtlError::ProcessingError {
                message: "hotel has no hotel_id".to_string(),
            })?;

        let reviews = self.provider.hotel_reviews(hotel_id).await?;
        tracing::debug!("{} returned {} reviews", venue.label(), reviews.len());

        Ok(flatten_reviews(venue, &reviews, self.max_reviews))
    }
}

/// 單間飯店攤平後的列；`placeholder` 表示該飯店沒有評論，只輸出一列空白佔位
#[derive(Debug, Clone, PartialEq)]
pub struct VenueRows {
    pub rows: Vec<OutputRow>,
    pub placeholder: bool,
}

/// 一則評論一列；沒有評論時輸出一列空白佔位
pub fn flatten_reviews(venue: &Venue, reviews: &[Value], max_reviews: usize) -> VenueRows {
    let empty = JsonObject::new();
    let rows: Vec<OutputRow> = reviews
        .iter()
        .take(max_reviews)
        .map(|item| OutputRow::new(venue, &Review::project(item.as_object().unwrap_or(&empty))))
        .collect();

    if rows.is_empty() {
        VenueRows {
            rows: vec![OutputRow::placeholder(venue)],
            placeholder: true,
        }
    } else {
        VenueRows {
            rows,
            placeholder: false,
        }
    }
}
