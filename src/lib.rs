//! `Viajarte` - trip itinerary planning
//!
//! This library provides the city catalog, the stay date partitioning used
//! while building an itinerary, seasonal weather notes, city search, and the
//! sanitizer that turns loosely-typed stored trip records into typed trips.

pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod itinerary;
pub mod logging;
pub mod models;
pub mod sanitizer;
pub mod search;
pub mod store;
pub mod weather;

// Re-export core types for public API
pub use catalog::{CityCatalog, TravelTheme};
pub use config::ViajarteConfig;
pub use error::ViajarteError;
pub use geo::{GeographicSearch, NearbyCity, distance_km};
pub use itinerary::{ItineraryPlanner, StayWindow};
pub use models::{
    CityRecord, Coordinates, Season, Traveler, TravelerRole, Trip, TripCityStay,
};
pub use sanitizer::{CityRef, sanitize};
pub use search::CitySearch;
pub use store::{DocumentStore, FjallStore, MemoryStore, StoreError, TripRepository};
pub use weather::SeasonalAdvisor;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ViajarteError>;
