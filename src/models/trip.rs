//! Trip aggregate: the itinerary stays and the travel group

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ViajarteError;

/// Placeholder name for trips stored without one
pub const UNTITLED_TRIP: &str = "Untitled trip";

/// Role of a traveler inside a trip group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelerRole {
    Organizer,
    Traveler,
}

/// A member of the travel group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traveler {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: TravelerRole,
}

/// A city plus its date range within the itinerary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCityStay {
    /// Catalog id when the stay was resolved against the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Derived from the start month; recomputed when the dates change
    #[serde(default)]
    pub weather_note: String,
    #[serde(default)]
    pub user_notes: String,
}

impl TripCityStay {
    /// Inclusive number of days of this stay
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// The persisted trip aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Assigned by the document store on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Itinerary order
    #[serde(default)]
    pub cities: Vec<TripCityStay>,
    #[serde(default)]
    pub travelers: Vec<Traveler>,
}

impl Trip {
    /// Create an empty trip without dates
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            start_date: None,
            end_date: None,
            cities: Vec::new(),
            travelers: Vec::new(),
        }
    }

    /// Set the overall trip bounds
    #[must_use]
    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Inclusive day count of the trip bounds, when both are set
    #[must_use]
    pub fn duration_days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days() + 1),
            _ => None,
        }
    }

    /// First traveler with the organizer role
    #[must_use]
    pub fn organizer(&self) -> Option<&Traveler> {
        self.travelers
            .iter()
            .find(|t| t.role == TravelerRole::Organizer)
    }

    /// Add a traveler with the `traveler` role. Blank names are ignored.
    pub fn add_traveler(&mut self, name: &str, email: &str) -> Option<&Traveler> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut n = self.travelers.len() + 1;
        while self
            .travelers
            .iter()
            .any(|t| t.id == format!("traveler-{n}"))
        {
            n += 1;
        }

        self.travelers.push(Traveler {
            id: format!("traveler-{n}"),
            name: name.to_string(),
            email: email.trim().to_string(),
            role: TravelerRole::Traveler,
        });
        self.travelers.last()
    }

    /// Remove a traveler by id; returns whether one was removed
    pub fn remove_traveler(&mut self, traveler_id: &str) -> bool {
        let before = self.travelers.len();
        self.travelers.retain(|t| t.id != traveler_id);
        self.travelers.len() != before
    }

    /// Checks run before a trip is handed to the store
    pub fn validate_for_save(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(ViajarteError::validation("Trip name cannot be empty"));
        }

        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Err(ViajarteError::validation(
                "Trip start and end dates are required",
            ));
        };

        if start > end {
            return Err(ViajarteError::validation(
                "Trip start date must not be after its end date",
            ));
        }

        if self.cities.is_empty() {
            return Err(ViajarteError::validation(
                "Add at least one city to the itinerary",
            ));
        }

        Ok(())
    }
}
