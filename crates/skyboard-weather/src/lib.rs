//! Weather data for Skyboard
//!
//! Record types as served by the weather API, the authorized fetch pipeline,
//! the search filter and the pure presentation mappings used by the cards.

pub mod client;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod presentation;
pub mod types;

pub use client::WeatherClient;
pub use error::FetchError;
pub use fetcher::{WeatherFetcher, WeatherSource};
pub use filter::filter_records;
pub use types::*;
