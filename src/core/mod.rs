pub mod etl;

pub use crate::domain::model::{EnrichmentReport, OutputRow, Venue};
pub use crate::domain::ports::{Pipeline, Storage, TravelProvider};
pub use crate::utils::error::Result;
