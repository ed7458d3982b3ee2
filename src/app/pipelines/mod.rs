pub mod hotel_pipeline;

pub use hotel_pipeline::HotelReviewsPipeline;
