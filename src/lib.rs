pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{http::RapidApiClient, storage::LocalStorage};
pub use app::pipelines::HotelReviewsPipeline;
pub use config::{AppConfig, FailurePolicy};
pub use core::etl::EtlEngine;
pub use domain::model::{DestinationId, OutputRow, Review, Venue};
pub use utils::error::{EtlError, Result};
