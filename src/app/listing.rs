use crate::domain::model::{DestinationId, JsonObject, Venue};
use crate::domain::ports::TravelProvider;
use crate::utils::error::Result;
use serde_json::Value;

/// 取得目的地的熱門飯店，保留 provider 的排序，最多 `max_hotels` 間
pub async fn fetch_hotels<P>(
    provider: &P,
    destination: &DestinationId,
    max_hotels: usize,
) -> Result<Vec<Venue>>
where
    P: TravelProvider + ?Sized,
{
    let items = provider.search_hotels(destination).await?;
    let venues = project_hotels(&items, max_hotels);

    tracing::info!(
        "🏨 Hotel search returned {} hotels, keeping {}",
        items.len(),
        venues.len()
    );
    Ok(venues)
}

/// Takes the first `max_hotels` items and projects each one to a [`Venue`].
pub fn project_hotels(items: &[Value], max_hotels: usize) -> Vec<Venue> {
    let empty = JsonObject::new();
    items
        .iter()
        .take(max_hotels)
        .map(|item| Venue::project(item.as_object().unwrap_or(&empty)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{hotel, FakeProvider};
    use serde_json::json;

    #[test]
    fn test_project_hotels_caps_and_keeps_order() {
        let items: Vec<Value> = (1..=25).map(hotel).collect();

        let venues = project_hotels(&items, 20);
        assert_eq!(venues.len(), 20);
        let ids: Vec<_> = venues.iter().map(|v| v.hotel_id.clone().unwrap()).collect();
        let expected: Vec<_> = (1..=20).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_project_hotels_fewer_than_cap() {
        let items: Vec<Value> = (1..=3).map(hotel).collect();
        assert_eq!(project_hotels(&items, 20).len(), 3);
        assert!(project_hotels(&[], 20).is_empty());
    }

    #[test]
    fn test_non_object_items_become_empty_venues() {
        let venues = project_hotels(&[json!("not a hotel"), hotel(9)], 20);
        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0], Venue::default());
        assert_eq!(venues[1].hotel_id.as_deref(), Some("9"));
    }

    #[tokio::test]
    async fn test_fetch_hotels_queries_destination() {
        let provider = FakeProvider::new().with_hotels(vec![hotel(1), hotel(2)]);

        let venues = fetch_hotels(&provider, &DestinationId::new("-123"), 20)
            .await
            .unwrap();

        assert_eq!(venues.len(), 2);
        assert_eq!(provider.calls(), vec!["hotels:-123".to_string()]);
    }
}
