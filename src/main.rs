use std::env;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use viajarte::geo::GeographicSearch;
use viajarte::itinerary::fallback_description;
use viajarte::{
    CityCatalog, CitySearch, DocumentStore, FjallStore, ItineraryPlanner, MemoryStore,
    SeasonalAdvisor, Trip, TripRepository, ViajarteConfig, logging,
};

const USAGE: &str = "usage: viajarte <command>

commands:
  search <query>                          search the city catalog
  nearby <city-id> [km]                   cities close to a catalog city
  season <city-id> <month>                seasonal weather note
  themes                                  curated multi-city routes
  trips                                   stored trips
  plan <name> <start> <end> <city>...     plan and store a trip (dates as YYYY-MM-DD)";

fn open_store(config: &ViajarteConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.store.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        _ => {
            let path = config.ensure_store_dir()?;
            let store = FjallStore::open(&path)
                .with_context(|| format!("Failed to open store at {}", config.store.path))?;
            Ok(Arc::new(store))
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("'{value}' is not a YYYY-MM-DD date"))
}

fn print_trip(trip: &Trip) {
    let dates = match (trip.start_date, trip.end_date) {
        (Some(start), Some(end)) => format!("{start} - {end}"),
        _ => "no dates".to_string(),
    };
    println!(
        "{} [{}] {} ({} cities)",
        trip.id.as_deref().unwrap_or("-"),
        dates,
        trip.name,
        trip.cities.len()
    );
    for stay in &trip.cities {
        println!(
            "    {} {} - {}: {}",
            stay.name, stay.start_date, stay.end_date, stay.weather_note
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ViajarteConfig::load()?;
    logging::init(&config.logging)?;

    let catalog = Arc::new(CityCatalog::builtin());
    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        println!("{USAGE}");
        return Ok(());
    };

    match command.as_str() {
        "search" => {
            let query = rest.join(" ");
            for city in CitySearch::new(catalog).search(&query) {
                println!("{:<10} {}", city.id, city.display_name());
            }
        }
        "nearby" => {
            let Some(city_id) = rest.first() else {
                bail!("nearby needs a city id\n\n{USAGE}");
            };
            let radius = match rest.get(1) {
                Some(km) => km.parse::<f64>().with_context(|| format!("'{km}' is not a distance"))?,
                None => f64::from(config.itinerary.suggestion_radius_km),
            };
            let limit = config.itinerary.max_suggestions as usize;
            for nearby in GeographicSearch::nearby_cities(&catalog, city_id, radius, limit) {
                println!("{:<12} {:>7.1} km", nearby.city.name, nearby.distance_km);
            }
        }
        "season" => {
            let (Some(city_id), Some(month)) = (rest.first(), rest.get(1)) else {
                bail!("season needs a city id and a month\n\n{USAGE}");
            };
            let month: u32 = month
                .parse()
                .with_context(|| format!("'{month}' is not a month number"))?;
            println!("{}", SeasonalAdvisor::new(catalog).describe(city_id, month));
        }
        "themes" => {
            for theme in catalog.travel_themes() {
                let route: Vec<String> = catalog
                    .theme_cities(theme)
                    .into_iter()
                    .map(|c| c.name)
                    .collect();
                println!("{} ({}): {}", theme.name, theme.duration, route.join(" -> "));
            }
        }
        "trips" => {
            let repository =
                TripRepository::new(open_store(&config)?, &config.store.trips_collection);
            for trip in repository.list().await? {
                print_trip(&trip);
            }
        }
        "plan" => {
            let [name, start, end, cities @ ..] = rest else {
                bail!("plan needs a name, two dates and at least one city\n\n{USAGE}");
            };
            let planner = ItineraryPlanner::from_config(catalog, &config.itinerary);
            let mut trip = Trip::new(name.as_str()).with_dates(parse_date(start)?, parse_date(end)?);
            for city in cities {
                planner.add_city(&mut trip, city)?;
            }
            trip.description = fallback_description(&trip);

            let repository =
                TripRepository::new(open_store(&config)?, &config.store.trips_collection);
            let id = repository
                .create(&trip)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            trip.id = Some(id);
            print_trip(&trip);
            println!("{}", trip.description);
        }
        other => bail!("unknown command '{other}'\n\n{USAGE}"),
    }

    Ok(())
}
