//! Data models for the Viajarte library
//!
//! This module contains the core domain models organized by concern:
//! - City: catalog records, coordinates and seasons
//! - Trip: the persisted aggregate with its stays and travelers

pub mod city;
pub mod trip;

// Re-export all public types for convenient access
pub use city::{CityRecord, Coordinates, Season, SeasonalTemperature};
pub use trip::{Traveler, TravelerRole, Trip, TripCityStay};
