//! Trip sanitizer
//!
//! Documents come back from the store without any schema guarantee: fields
//! may be missing or have the wrong type, and older records list cities as
//! bare strings. [`sanitize`] turns any JSON value into a well-formed
//! [`Trip`]. It never fails; every unusable field falls back to a default.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::itinerary::today;
use crate::models::trip::UNTITLED_TRIP;
use crate::models::{Traveler, TravelerRole, Trip, TripCityStay};

/// A city entry as found in a stored document
#[derive(Debug, Clone, Copy)]
pub enum CityRef<'a> {
    /// Legacy entry holding only the city name
    Name(&'a str),
    /// A stay object
    Structured(&'a Map<String, Value>),
    /// Anything else (numbers, nulls, nested arrays)
    Other,
}

impl<'a> CityRef<'a> {
    #[must_use]
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::String(name) => CityRef::Name(name),
            Value::Object(map) => CityRef::Structured(map),
            _ => CityRef::Other,
        }
    }

    /// Display name; `position` is 1-based and used for the placeholder
    #[must_use]
    pub fn name(&self, position: usize) -> String {
        let found = match self {
            CityRef::Name(name) => non_blank(name),
            CityRef::Structured(map) => ["name", "title", "city"]
                .iter()
                .find_map(|key| string_field(map, key)),
            CityRef::Other => None,
        };
        found.map_or_else(|| format!("City {position}"), str::to_string)
    }

    /// Resolve into the canonical stay shape, using the trip bounds for
    /// missing dates
    fn into_stay(self, position: usize, trip_start: NaiveDate, trip_end: NaiveDate) -> TripCityStay {
        let name = self.name(position);
        let mut stay = TripCityStay {
            city_id: None,
            name,
            country: None,
            start_date: trip_start,
            end_date: trip_end,
            weather_note: String::new(),
            user_notes: String::new(),
        };

        if let CityRef::Structured(map) = self {
            stay.city_id = string_field(map, "cityId").map(str::to_string);
            stay.country = string_field(map, "country").map(str::to_string);
            if let Some(start) = date_field(map, &["startDate", "arrivalDate"]) {
                stay.start_date = start;
            }
            if let Some(end) = date_field(map, &["endDate", "departureDate"]) {
                stay.end_date = end;
            }
            stay.weather_note = first_string(map, &["weatherNote", "weather"]);
            stay.user_notes = first_string(map, &["userNotes", "notes"]);
        }

        if stay.end_date < stay.start_date {
            warn!(
                "Stay '{}' ends before it starts ({} > {}), collapsing to one day",
                stay.name, stay.start_date, stay.end_date
            );
            stay.end_date = stay.start_date;
        }
        stay
    }
}

/// Normalize a stored document into a [`Trip`], using today's date for
/// missing trip bounds
#[must_use]
pub fn sanitize(raw: &Value) -> Trip {
    sanitize_with_today(raw, today())
}

/// [`sanitize`] with an explicit value for "today"
#[must_use]
pub fn sanitize_with_today(raw: &Value, today: NaiveDate) -> Trip {
    let empty = Map::new();
    let record = match raw {
        Value::Object(map) => map,
        other => {
            if !other.is_null() {
                warn!("Trip document is not an object, using defaults");
            }
            &empty
        }
    };

    let start_date = date_field(record, &["startDate"]).unwrap_or_else(|| {
        debug!("Trip has no usable start date, using {}", today);
        today
    });
    let mut end_date = date_field(record, &["endDate"]).unwrap_or_else(|| {
        debug!("Trip has no usable end date, using {}", today);
        today
    });
    if end_date < start_date {
        warn!(
            "Trip ends before it starts ({} > {}), collapsing to one day",
            start_date, end_date
        );
        end_date = start_date;
    }

    let cities = match record.get("cities") {
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| CityRef::from_value(entry).into_stay(i + 1, start_date, end_date))
            .collect(),
        Some(other) if !other.is_null() => {
            warn!("Trip cities is not a list, dropping it");
            Vec::new()
        }
        _ => Vec::new(),
    };

    let travelers = match record.get("travelers") {
        Some(Value::Array(entries)) => sanitize_travelers(entries),
        _ => Vec::new(),
    };

    Trip {
        id: string_field(record, "id").map(str::to_string),
        name: string_field(record, "name").unwrap_or(UNTITLED_TRIP).to_string(),
        description: first_string(record, &["description"]),
        start_date: Some(start_date),
        end_date: Some(end_date),
        cities,
        travelers,
    }
}

fn sanitize_travelers(entries: &[Value]) -> Vec<Traveler> {
    let named: Vec<&Map<String, Value>> = entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match entry {
            Value::Object(map) if string_field(map, "name").is_some() => Some(map),
            _ => {
                debug!("Dropping traveler {} without a name", i + 1);
                None
            }
        })
        .collect();
    let mut taken: Vec<String> = named
        .iter()
        .filter_map(|map| string_field(map, "id"))
        .map(str::to_string)
        .collect();

    let mut travelers = Vec::with_capacity(named.len());
    let mut n = 0;
    for map in named {
        let role = match string_field(map, "role").map(str::to_lowercase).as_deref() {
            Some("organizer" | "organizador") => TravelerRole::Organizer,
            _ => TravelerRole::Traveler,
        };
        let id = match string_field(map, "id") {
            Some(id) => id.to_string(),
            None => loop {
                n += 1;
                let candidate = format!("traveler-{n}");
                if !taken.contains(&candidate) {
                    taken.push(candidate.clone());
                    break candidate;
                }
            },
        };
        travelers.push(Traveler {
            id,
            name: string_field(map, "name").unwrap_or_default().to_string(),
            email: first_string(map, &["email"]),
            role,
        });
    }
    travelers
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() { None } else { Some(s) }
}

fn string_field<'m>(map: &'m Map<String, Value>, key: &str) -> Option<&'m str> {
    map.get(key).and_then(Value::as_str).and_then(non_blank)
}

fn first_string(map: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

fn date_field(map: &Map<String, Value>, keys: &[&str]) -> Option<NaiveDate> {
    keys.iter().find_map(|key| map.get(*key).and_then(parse_date))
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `{ "seconds": n }` objects
fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        }
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}
