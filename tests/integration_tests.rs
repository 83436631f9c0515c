//! Integration tests for the viajarte library and CLI

use std::process::Command;
use std::sync::Arc;

use chrono::NaiveDate;
use rstest::rstest;
use serde_json::json;
use tempfile::TempDir;

use viajarte::itinerary::fallback_description;
use viajarte::store::Document;
use viajarte::{
    CityCatalog, DocumentStore, FjallStore, ItineraryPlanner, MemoryStore, Trip, TripRepository,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn planned_trip() -> Trip {
    let planner = ItineraryPlanner::new(Arc::new(CityCatalog::builtin()));
    let mut trip = Trip::new("Summer in Europe").with_dates(date("2025-06-10"), date("2025-06-25"));
    planner.add_city(&mut trip, "Paris").unwrap();
    planner.add_city(&mut trip, "Rome").unwrap();
    trip.add_traveler("Ana", "ana@example.com");
    trip.description = fallback_description(&trip);
    trip
}

fn viajarte(args: &[&str], home: &TempDir) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_viajarte"))
        .args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("VIAJARTE_STORE__BACKEND", "memory")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute viajarte")
}

#[tokio::test]
async fn test_planned_trip_round_trips_through_fjall() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn DocumentStore> = Arc::new(FjallStore::open(dir.path().join("store")).unwrap());
    let repository = TripRepository::with_default_collection(store);

    let trip = planned_trip();
    let id = repository.create(&trip).await.unwrap();

    let mut loaded = repository.load(&id).await.unwrap().unwrap();
    assert_eq!(loaded.id.as_deref(), Some(id.as_str()));
    assert_eq!(loaded.cities, trip.cities);
    assert_eq!(loaded.travelers, trip.travelers);
    assert!(loaded.description.contains("16-day journey exploring Paris, Rome"));

    loaded.name = "Renamed".to_string();
    repository.save(&loaded).await.unwrap();
    let trips = repository.list().await.unwrap();
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].name, "Renamed");

    repository.delete(&id).await.unwrap();
    assert!(repository.load(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_failures_surface_not_found() {
    let store = Arc::new(MemoryStore::new());
    let repository = TripRepository::with_default_collection(store);

    let mut trip = planned_trip();
    trip.id = Some("gone".to_string());
    let err = repository.save(&trip).await.unwrap_err();
    assert_eq!(err.user_message(), "Trip 'gone' no longer exists.");
}

#[tokio::test]
async fn test_mixed_legacy_records_list_cleanly() {
    let store = Arc::new(MemoryStore::new());
    for record in [
        json!({ "name": "Old", "cities": ["Rome", { "title": "Berlin" }, {}] }),
        json!({ "name": null, "startDate": { "seconds": 1_749_556_800 } }),
    ] {
        let serde_json::Value::Object(document) = record else {
            unreachable!()
        };
        store.create("trips", document).await.unwrap();
    }
    store.create("trips", Document::new()).await.unwrap();

    let repository = TripRepository::with_default_collection(store);
    let trips = repository.list().await.unwrap();
    assert_eq!(trips.len(), 3);

    let names: Vec<&str> = trips[0].cities.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Rome", "Berlin", "City 3"]);
    assert_eq!(trips[1].start_date, Some(date("2025-06-10")));
    assert!(trips.iter().all(|t| t.id.is_some()));
}

#[rstest]
#[case(&["search", "gastro"], &["paris", "rome"])]
#[case(&["nearby", "vienna", "300"], &["Prague"])]
#[case(&["season", "paris", "6"], &["Summer: 20-25°C"])]
#[case(&["themes"], &["Paris -> Prague -> Vienna -> Rome"])]
fn test_cli_commands(#[case] args: &[&str], #[case] expected: &[&str]) {
    let home = TempDir::new().unwrap();
    let output = viajarte(args, &home);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "viajarte {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    for text in expected {
        assert!(stdout.contains(text), "missing '{text}' in output:\n{stdout}");
    }
}

#[test]
fn test_cli_plan_with_memory_store() {
    let home = TempDir::new().unwrap();
    let output = viajarte(
        &["plan", "Summer", "2025-06-10", "2025-06-25", "paris", "Lisbon"],
        &home,
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Paris 2025-06-10 - 2025-06-25"));
    assert!(stdout.contains("Lisbon 2025-06-26 - 2025-07-03: Check the local forecast"));
}

#[test]
fn test_cli_rejects_unknown_command() {
    let home = TempDir::new().unwrap();
    let output = viajarte(&["teleport"], &home);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown command"));
}
