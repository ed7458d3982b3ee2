use crate::domain::model::DestinationId;
use crate::domain::ports::TravelProvider;
use crate::utils::error::{EtlError, Result};

/// 將地名解析成 provider 的目的地 ID，取第一筆結果
pub async fn resolve_destination<P>(provider: &P, place_name: &str) -> Result<DestinationId>
where
    P: TravelProvider + ?Sized,
{
    if place_name.trim().is_empty() {
        return Err(EtlError::ValidationError {
            message: "place name cannot be empty".to_string(),
        });
    }

    tracing::info!("📍 Resolving destination for '{}'", place_name);
    let locations = provider.search_locations(place_name).await?;

    let first = locations
        .first()
        .ok_or_else(|| EtlError::LocationNotFound {
            place: place_name.to_string(),
        })?;

    let destination = first
        .get("dest_id")
        .and_then(DestinationId::from_value)
        .ok_or_else(|| EtlError::UnexpectedResponse {
            endpoint: "location search".to_string(),
            message: "first location has no dest_id".to_string(),
        })?;

    tracing::info!(
        "✅ '{}' resolved to dest_id {} ({} candidates)",
        place_name,
        destination,
        locations.len()
    );
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::FakeProvider;
    use serde_json::json;

    #[tokio::test]
    async fn test_returns_first_dest_id() {
        let provider = FakeProvider::new().with_locations(vec![
            json!({"dest_id": "-123", "name": "Makkah"}),
            json!({"dest_id": "-456", "name": "Makkah Province"}),
        ]);

        let destination = resolve_destination(&provider, "Makkah").await.unwrap();
        assert_eq!(destination, DestinationId::new("-123"));
    }

    #[tokio::test]
    async fn test_no_matches_is_location_not_found() {
        let provider = FakeProvider::new().with_locations(vec![]);

        let err = resolve_destination(&provider, "Atlantis").await.unwrap_err();
        assert!(matches!(err, EtlError::LocationNotFound { ref place } if place == "Atlantis"));
    }

    #[tokio::test]
    async fn test_missing_dest_id_is_unexpected_response() {
        let provider = FakeProvider::new().with_locations(vec![json!({"name": "Makkah"})]);

        let err = resolve_destination(&provider, "Makkah").await.unwrap_err();
        assert!(matches!(err, EtlError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_empty_place_name_skips_network() {
        let provider = FakeProvider::new();

        let err = resolve_destination(&provider, "").await.unwrap_err();
        assert!(matches!(err, EtlError::ValidationError { .. }));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let provider = FakeProvider::new().failing_locations();

        let err = resolve_destination(&provider, "Makkah").await.unwrap_err();
        assert!(err.is_transport());
    }
}
