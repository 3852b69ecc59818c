//! Transit registry - demo driver
//!
//! Builds a small fleet, registers it in the transport database and
//! round-trips the database through its JSON file.
//!
//! Module structure:
//! - `domain/` - People, tickets and vehicles (Transport, Bus, Taxi)
//! - `store/` - TransportDataBase and its JSON file format
//! - `infra/` - Configuration

use anyhow::Context;
use clap::Parser;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, warn};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use transit_registry::domain::{
    Address, Bus, Name, PassengerUpdate, Person, Taxi, TaxiTrip, Ticket, Transport, TransportId,
    TransportationCompany, Vehicle,
};
use transit_registry::infra::Config;
use transit_registry::store::TransportDataBase;

/// Transit registry - vehicle and passenger records with JSON persistence
#[derive(Parser, Debug)]
#[command(name = "transit-registry", version, about)]
struct Args {
    /// Path to TOML configuration file [default: $CONFIG_FILE, then config/dev.toml]
    #[arg(short, long)]
    config: Option<String>,

    /// Database JSON file (overrides database.file from config)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref());
    if let Some(output) = args.output {
        config = config.with_database_file(output);
    }

    // RUST_LOG wins over the configured level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!(
        git_hash = %env!("GIT_HASH"),
        config_file = %config.config_file(),
        database_file = %config.database_file(),
        bus_capacity = %config.default_bus_capacity(),
        taxi_capacity = %config.default_taxi_capacity(),
        "config_loaded"
    );

    let fleet = build_fleet(&config)?;

    let mut db = TransportDataBase::new();
    for vehicle in &fleet {
        db.add_transport(vehicle)?;
    }

    // Live changes only reach the database through update_transport
    let mut bus = db.get_transport(TransportId(1))?;
    let first = bus
        .transport()
        .read_all_passengers()
        .first()
        .map(|p| p.id())
        .context("route 12 has no passengers")?;
    bus.transport_mut()
        .update_passenger(first, PassengerUpdate::default().age(31))?;
    db.update_transport(&bus)?;

    if let Err(e) = db.add_transport(&fleet[0]) {
        warn!(error = %e, "duplicate_rejected");
    }

    if !db.to_json(config.database_file()) {
        anyhow::bail!("could not save database to {}", config.database_file());
    }

    let mut restored = TransportDataBase::new();
    let loaded = restored.from_json(config.database_file());

    for id in restored.ids() {
        let vehicle = restored.get_transport(id)?;
        info!(
            transport_id = %id,
            kind = %vehicle.kind(),
            license_plate = %vehicle.transport().license_plate(),
            passengers = %vehicle.transport().passenger_count(),
            free_seats = %vehicle.transport().free_seats(),
            "transport_restored"
        );
    }

    info!(saved = %db.len(), loaded = %loaded, "transit-registry done");
    Ok(())
}

fn now_rfc3339() -> anyhow::Result<String> {
    OffsetDateTime::now_utc().format(&Rfc3339).context("failed to format payment time")
}

fn build_fleet(config: &Config) -> anyhow::Result<Vec<Vehicle>> {
    let depot = Address::new("Minsk", "Kalvariyskaya", 42);
    let company = TransportationCompany::new("Minsktrans", depot.clone());
    let paid_at = now_rfc3339()?;

    let driver = Person::from_name(&Name::new("Ivanov", "Ivan"), 45)?;
    let transport =
        Transport::new(TransportId(1), "AB1234-7", config.default_bus_capacity(), driver)?;
    let mut route_12 = Bus::new(transport, "12", company.clone())?
        .with_stops(["Vokzal", "Nemiga", "Kalvariyskaya"]);
    route_12
        .transport_mut()
        .add_passenger(Ticket::new(90, paid_at.clone())?, "Petrov Petr", 30)?;
    route_12
        .transport_mut()
        .add_passenger(Ticket::new(90, paid_at.clone())?, "Sidorova Anna", 27)?;

    let driver = Person::from_name(&Name::new("Kozlov", "Pavel"), 52)?;
    let transport =
        Transport::new(TransportId(2), "AK5521-7", config.default_bus_capacity(), driver)?;
    let route_100 = Bus::new(transport, "100", company)?.with_stops(["Vokzal", "Uruchye"]);

    let driver = Person::from_name(&Name::new("Novik", "Denis"), 38)?;
    let transport =
        Transport::new(TransportId(3), "TX0042-7", config.default_taxi_capacity(), driver)?;
    let destination = Address::new("Minsk", "Pobediteley", 9);
    let mut taxi = Taxi::new(
        transport,
        TaxiTrip {
            departure_address: depot.clone(),
            destination_address: destination.clone(),
            taxi_type: "comfort".to_string(),
            travel_time: 25,
            cost: 18,
        },
    )?;
    let fare = Ticket::new(18, paid_at)?.with_route(depot, destination);
    taxi.transport_mut().add_passenger(fare, "Lebedeva Maria", 34)?;

    Ok(vec![route_12.into(), route_100.into(), taxi.into()])
}
