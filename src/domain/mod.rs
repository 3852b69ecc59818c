//! Domain models - people, tickets and vehicles
//!
//! This module contains the canonical data types used throughout the system:
//! - `Person`, `Ticket`, `Name`, `Address` - validated value types
//! - `Passenger` - a person riding one transport
//! - `Transport` - capacity-bounded passenger registry with a driver
//! - `Vehicle` - the kinds of transport the database stores (`Bus`, `Taxi`)

pub mod passenger;
pub mod transport;
pub mod types;
pub mod vehicle;

// Re-export commonly used types at module level
pub use passenger::{Passenger, PassengerUpdate};
pub use transport::Transport;
pub use types::{Address, Name, PassengerId, Person, Ticket, TransportId, TransportationCompany};
pub use vehicle::{Bus, Taxi, TaxiTrip, Vehicle};
