//! Itinerary planning
//!
//! Assigns a date window to each city as it is appended to a trip. The trip's
//! inclusive day count is divided by the number of cities including the new
//! one, and the new stay starts the day after the previous stay ends. Stays
//! are independent once created: removing or editing one never shifts the
//! others. Only [`ItineraryPlanner::recompute_all`] rewrites every window.

use std::sync::Arc;

use chrono::{Days, Local, NaiveDate};
use tracing::{debug, info};

use crate::ViajarteError;
use crate::catalog::CityCatalog;
use crate::config::ItineraryConfig;
use crate::models::{Trip, TripCityStay};
use crate::weather::SeasonalAdvisor;

/// Stay length used when the trip has no start or no end date
pub const DEFAULT_STAY_DAYS: u32 = 3;

/// Today in local time
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Dates assigned to a new stay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Inclusive length of the window
    pub days: u32,
}

/// Builds and edits the ordered stays of a trip
#[derive(Debug, Clone)]
pub struct ItineraryPlanner {
    catalog: Arc<CityCatalog>,
    advisor: SeasonalAdvisor,
    default_stay_days: u32,
}

impl ItineraryPlanner {
    #[must_use]
    pub fn new(catalog: Arc<CityCatalog>) -> Self {
        Self {
            advisor: SeasonalAdvisor::new(Arc::clone(&catalog)),
            catalog,
            default_stay_days: DEFAULT_STAY_DAYS,
        }
    }

    /// Planner using the configured default stay length
    #[must_use]
    pub fn from_config(catalog: Arc<CityCatalog>, config: &ItineraryConfig) -> Self {
        Self::new(catalog).with_default_stay_days(config.default_stay_days)
    }

    /// Override the stay length used for undated trips (at least one day)
    #[must_use]
    pub fn with_default_stay_days(mut self, days: u32) -> Self {
        self.default_stay_days = days.max(1);
        self
    }

    /// Inclusive day count of the trip, or `None` when a bound is missing
    #[must_use]
    pub fn total_days(trip_start: Option<NaiveDate>, trip_end: Option<NaiveDate>) -> Option<i64> {
        match (trip_start, trip_end) {
            (Some(start), Some(end)) => Some((end - start).num_days() + 1),
            _ => None,
        }
    }

    /// Window for the next city appended after `existing`.
    ///
    /// Dated trips give the new city `floor(total_days / (existing + 1))`
    /// days, at least one; the remainder is dropped. Undated trips give every
    /// city the default stay length. The first city starts on the trip start
    /// (or `today` when there is none), later ones the day after the previous
    /// stay ends, which may run past the trip end.
    #[must_use]
    pub fn next_window(
        &self,
        trip_start: Option<NaiveDate>,
        trip_end: Option<NaiveDate>,
        existing: &[TripCityStay],
        today: NaiveDate,
    ) -> StayWindow {
        let days = match Self::total_days(trip_start, trip_end) {
            Some(total) => {
                let cities = i64::try_from(existing.len()).unwrap_or(i64::MAX - 1) + 1;
                let share = total.div_euclid(cities).max(1);
                u32::try_from(share).unwrap_or(u32::MAX)
            }
            None => self.default_stay_days,
        };

        let start_date = match existing.last() {
            Some(previous) => previous.end_date.succ_opt().unwrap_or(previous.end_date),
            None => trip_start.unwrap_or(today),
        };
        let end_date = start_date
            .checked_add_days(Days::new(u64::from(days - 1)))
            .unwrap_or(NaiveDate::MAX);

        debug!(
            "Next stay after {} cities: {} -> {} ({} days)",
            existing.len(),
            start_date,
            end_date,
            days
        );

        StayWindow {
            start_date,
            end_date,
            days,
        }
    }

    /// Append a city to the itinerary and assign its dates.
    ///
    /// `city` is matched against catalog ids, then catalog names; anything
    /// else becomes a free-form stay named after the input.
    pub fn add_city<'t>(&self, trip: &'t mut Trip, city: &str) -> crate::Result<&'t TripCityStay> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ViajarteError::validation("City name cannot be empty"));
        }

        let record = self
            .catalog
            .get_by_id(city)
            .or_else(|| self.catalog.find_by_name(city));
        let (city_id, name, country) = match record {
            Some(record) => (Some(record.id), record.name, Some(record.country)),
            None => {
                debug!("'{}' is not in the catalog, adding as free-form stay", city);
                (None, city.to_string(), None)
            }
        };

        let window = self.next_window(trip.start_date, trip.end_date, &trip.cities, today());
        let weather_note = self
            .advisor
            .note_for_stay(city_id.as_deref(), window.start_date);

        info!(
            "Added {} to '{}' from {} to {}",
            name, trip.name, window.start_date, window.end_date
        );

        trip.cities.push(TripCityStay {
            city_id,
            name,
            country,
            start_date: window.start_date,
            end_date: window.end_date,
            weather_note,
            user_notes: String::new(),
        });
        Ok(&trip.cities[trip.cities.len() - 1])
    }

    /// Remove the stay at `index`. Remaining stays keep their dates.
    pub fn remove_city(&self, trip: &mut Trip, index: usize) -> Option<TripCityStay> {
        if index >= trip.cities.len() {
            return None;
        }
        let removed = trip.cities.remove(index);
        debug!("Removed {} from '{}'", removed.name, trip.name);
        Some(removed)
    }

    /// Change the dates of one stay and refresh its weather note
    pub fn update_stay_dates(
        &self,
        trip: &mut Trip,
        index: usize,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> crate::Result<()> {
        if start_date > end_date {
            return Err(ViajarteError::validation(format!(
                "Stay start {start_date} is after its end {end_date}"
            )));
        }
        let stay = Self::stay_mut(trip, index)?;
        stay.start_date = start_date;
        stay.end_date = end_date;
        stay.weather_note = self
            .advisor
            .note_for_stay(stay.city_id.as_deref(), start_date);
        Ok(())
    }

    /// Replace the user notes of one stay
    pub fn update_notes(&self, trip: &mut Trip, index: usize, notes: &str) -> crate::Result<()> {
        Self::stay_mut(trip, index)?.user_notes = notes.to_string();
        Ok(())
    }

    /// Reassign every stay's dates as if the cities were appended again in
    /// itinerary order.
    pub fn recompute_all(&self, trip: &mut Trip) {
        let today = today();
        let stays = std::mem::take(&mut trip.cities);
        for mut stay in stays {
            let window = self.next_window(trip.start_date, trip.end_date, &trip.cities, today);
            stay.start_date = window.start_date;
            stay.end_date = window.end_date;
            stay.weather_note = self
                .advisor
                .note_for_stay(stay.city_id.as_deref(), window.start_date);
            trip.cities.push(stay);
        }
        info!("Recomputed {} stays for '{}'", trip.cities.len(), trip.name);
    }

    fn stay_mut(trip: &mut Trip, index: usize) -> crate::Result<&mut TripCityStay> {
        let count = trip.cities.len();
        trip.cities.get_mut(index).ok_or_else(|| {
            ViajarteError::validation(format!(
                "No stay at position {index}; the itinerary has {count}"
            ))
        })
    }
}

/// Description used when no generated text is available
#[must_use]
pub fn fallback_description(trip: &Trip) -> String {
    let names: Vec<&str> = trip.cities.iter().map(|c| c.name.as_str()).collect();
    let journey = match trip.duration_days() {
        Some(days) => format!("an unforgettable {days}-day journey"),
        None => "an unforgettable journey".to_string(),
    };
    let exploring = if names.is_empty() {
        String::new()
    } else {
        format!(" exploring {}", names.join(", "))
    };

    format!(
        "Embark on {journey}{exploring}. This trip offers a unique experience combining history, culture and adventure, creating memories that will last forever."
    )
}
