//! Great-circle distances and nearby city suggestions

use serde::Serialize;
use tracing::debug;

use crate::catalog::CityCatalog;
use crate::models::{CityRecord, Coordinates};

/// Default number of suggestions returned by [`GeographicSearch::nearby_cities`]
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Haversine distance in kilometers (earth radius 6371 km).
///
/// The pair is put in a fixed order before computing so the result is
/// bit-identical whichever point comes first.
#[must_use]
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let (from, to) = if (a.lat, a.lng) <= (b.lat, b.lng) {
        (a, b)
    } else {
        (b, a)
    };

    haversine::distance(
        haversine::Location {
            latitude: from.lat,
            longitude: from.lng,
        },
        haversine::Location {
            latitude: to.lat,
            longitude: to.lng,
        },
        haversine::Units::Kilometers,
    )
}

/// A catalog city with its distance from a reference city
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyCity {
    pub city: CityRecord,
    pub distance_km: f64,
}

/// Geographic search over the catalog
pub struct GeographicSearch;

impl GeographicSearch {
    /// Distance between two catalog cities; `None` when either id is unknown
    #[must_use]
    pub fn distance_between(catalog: &CityCatalog, from_id: &str, to_id: &str) -> Option<f64> {
        let from = catalog.lookup(from_id)?;
        let to = catalog.lookup(to_id)?;
        Some(distance_km(from.coordinates, to.coordinates))
    }

    /// Up to `limit` other catalog cities within `max_km` of `city_id`,
    /// closest first. Equal distances keep catalog order.
    #[must_use]
    pub fn nearby_cities(
        catalog: &CityCatalog,
        city_id: &str,
        max_km: f64,
        limit: usize,
    ) -> Vec<NearbyCity> {
        let Some(origin) = catalog.lookup(city_id) else {
            debug!("No suggestions for unknown city '{}'", city_id);
            return Vec::new();
        };

        let mut nearby: Vec<NearbyCity> = catalog
            .iter()
            .filter(|city| city.id != origin.id)
            .map(|city| NearbyCity {
                distance_km: distance_km(origin.coordinates, city.coordinates),
                city: city.clone(),
            })
            .filter(|n| n.distance_km <= max_km)
            .collect();

        // sort_by is stable
        nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        nearby.truncate(limit);

        debug!(
            "Found {} cities within {}km of {}",
            nearby.len(),
            max_km,
            origin.name
        );
        nearby
    }
}
