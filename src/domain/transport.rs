//! Transport: a capacity-bounded passenger registry with a driver

use crate::domain::passenger::{Passenger, PassengerUpdate};
use crate::domain::types::{PassengerId, Person, Ticket, TransportId};
use crate::error::{require_positive, require_text, Result, TransitError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Common part of every vehicle.
///
/// Invariant: `passengers.len() <= passenger_capacity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TransportFields")]
pub struct Transport {
    id: TransportId,
    license_plate: String,
    passenger_capacity: u32,
    driver: Person,
    passengers: Vec<Passenger>,
    /// Next id handed out by `add_passenger`; rebuilt from `passengers` on decode
    #[serde(skip)]
    next_passenger_id: u32,
}

#[derive(Deserialize)]
struct TransportFields {
    id: TransportId,
    license_plate: String,
    passenger_capacity: u32,
    driver: Person,
    #[serde(default)]
    passengers: Vec<Passenger>,
}

impl TryFrom<TransportFields> for Transport {
    type Error = TransitError;

    fn try_from(fields: TransportFields) -> Result<Self> {
        let mut transport = Transport::new(
            fields.id,
            fields.license_plate,
            fields.passenger_capacity,
            fields.driver,
        )?;

        if fields.passengers.len() > transport.passenger_capacity as usize {
            return Err(TransitError::CapacityExceeded {
                id: transport.id,
                capacity: transport.passenger_capacity,
            });
        }

        let mut seen = HashSet::with_capacity(fields.passengers.len());
        for passenger in &fields.passengers {
            if passenger.id.0 == 0 || passenger.id.0 > transport.passenger_capacity {
                return Err(TransitError::validation(
                    "passenger id",
                    format!("must be between 1 and {}", transport.passenger_capacity),
                ));
            }
            if !seen.insert(passenger.id) {
                return Err(TransitError::DuplicatePassenger {
                    transport: transport.id,
                    passenger: passenger.id,
                });
            }
        }

        transport.next_passenger_id =
            fields.passengers.iter().map(|p| p.id.0).max().unwrap_or(0) + 1;
        transport.passengers = fields.passengers;
        Ok(transport)
    }
}

/// Equality over stored fields; the id counter is bookkeeping only.
impl PartialEq for Transport {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.license_plate == other.license_plate
            && self.passenger_capacity == other.passenger_capacity
            && self.driver == other.driver
            && self.passengers == other.passengers
    }
}

impl Eq for Transport {}

impl Transport {
    /// Create an empty transport.
    ///
    /// # Example
    ///
    /// ```
    /// use transit_registry::domain::transport::Transport;
    /// use transit_registry::domain::types::{Person, TransportId};
    ///
    /// let driver = Person::new("Ivanov Ivan", 45).unwrap();
    /// let transport = Transport::new(TransportId(1), "AB1234", 40, driver).unwrap();
    /// assert_eq!(transport.free_seats(), 40);
    /// ```
    pub fn new(
        id: TransportId,
        license_plate: impl Into<String>,
        passenger_capacity: u32,
        driver: Person,
    ) -> Result<Self> {
        let license_plate = license_plate.into();
        require_positive("transport id", id.0)?;
        require_text("license_plate", &license_plate)?;
        require_positive("passenger_capacity", passenger_capacity)?;

        Ok(Self {
            id,
            license_plate,
            passenger_capacity,
            driver,
            passengers: Vec::new(),
            next_passenger_id: 1,
        })
    }

    pub fn id(&self) -> TransportId {
        self.id
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    pub fn passenger_capacity(&self) -> u32 {
        self.passenger_capacity
    }

    pub fn driver(&self) -> &Person {
        &self.driver
    }

    pub fn set_driver(&mut self, driver: Person) {
        self.driver = driver;
    }

    pub fn set_license_plate(&mut self, license_plate: impl Into<String>) -> Result<()> {
        let license_plate = license_plate.into();
        require_text("license_plate", &license_plate)?;
        self.license_plate = license_plate;
        Ok(())
    }

    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    /// Passenger ids still available. Ids are never reused, so a deleted
    /// passenger does not free a seat.
    pub fn free_seats(&self) -> u32 {
        (self.passenger_capacity + 1).saturating_sub(self.next_passenger_id)
    }

    pub fn is_full(&self) -> bool {
        self.next_passenger_id > self.passenger_capacity
    }

    /// Board a new passenger and assign the next sequential id.
    /// Fails once that id would exceed the passenger capacity.
    pub fn add_passenger(&mut self, ticket: Ticket, name: impl Into<String>, age: u32) -> Result<&Passenger> {
        let person = Person::new(name, age)?;

        if self.is_full() {
            return Err(TransitError::CapacityExceeded {
                id: self.id,
                capacity: self.passenger_capacity,
            });
        }

        let id = PassengerId(self.next_passenger_id);
        self.next_passenger_id += 1;

        debug!(
            transport_id = %self.id,
            passenger_id = %id,
            free_seats = %self.free_seats(),
            "passenger_added"
        );

        self.passengers.push(Passenger { id, person, ticket });
        Ok(&self.passengers[self.passengers.len() - 1])
    }

    pub fn read_all_passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn read_by_passenger_id(&self, id: PassengerId) -> Option<&Passenger> {
        self.passengers.iter().find(|p| p.id == id)
    }

    /// Apply the provided fields to a passenger.
    /// Returns false if no passenger has this id.
    pub fn update_passenger(&mut self, id: PassengerId, update: PassengerUpdate) -> Result<bool> {
        let Some(passenger) = self.passengers.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };

        let person = update.apply_to(passenger)?;
        passenger.person = person;
        if let Some(ticket) = update.ticket {
            passenger.ticket = ticket;
        }

        debug!(transport_id = %self.id, passenger_id = %id, "passenger_updated");
        Ok(true)
    }

    /// Remove a passenger. Returns false if no passenger has this id.
    pub fn delete_passenger(&mut self, id: PassengerId) -> bool {
        let Some(idx) = self.passengers.iter().position(|p| p.id == id) else {
            return false;
        };
        self.passengers.remove(idx);
        debug!(transport_id = %self.id, passenger_id = %id, "passenger_deleted");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
        Ticket::new(50, "2026-10-19T08:00:00Z").unwrap()
    }

    fn transport(capacity: u32) -> Transport {
        let driver = Person::new("Ivanov Ivan", 45).unwrap();
        Transport::new(TransportId(1), "AB1234", capacity, driver).unwrap()
    }

    #[test]
    fn test_new_validates_fields() {
        let driver = Person::new("Ivanov Ivan", 45).unwrap();
        assert!(Transport::new(TransportId(0), "AB1234", 4, driver.clone()).is_err());
        assert!(Transport::new(TransportId(1), "", 4, driver.clone()).is_err());
        assert!(Transport::new(TransportId(1), "AB1234", 0, driver).is_err());
    }

    #[test]
    fn test_capacity_one() {
        let mut transport = transport(1);
        assert!(transport.add_passenger(ticket(), "Anna", 20).is_ok());
        let err = transport.add_passenger(ticket(), "Boris", 21).unwrap_err();
        assert!(matches!(err, TransitError::CapacityExceeded { capacity: 1, .. }));
        assert_eq!(transport.passenger_count(), 1);
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut transport = transport(3);
        let first = transport.add_passenger(ticket(), "Anna", 20).unwrap().id();
        let second = transport.add_passenger(ticket(), "Boris", 21).unwrap().id();
        assert_eq!(first, PassengerId(1));
        assert_eq!(second, PassengerId(2));
    }

    #[test]
    fn test_delete_does_not_free_an_id() {
        let mut transport = transport(2);
        transport.add_passenger(ticket(), "Anna", 20).unwrap();
        transport.add_passenger(ticket(), "Boris", 21).unwrap();
        assert!(transport.delete_passenger(PassengerId(1)));
        assert!(transport.is_full());
        assert_eq!(transport.free_seats(), 0);

        let err = transport.add_passenger(ticket(), "Vera", 22).unwrap_err();
        assert!(matches!(err, TransitError::CapacityExceeded { id: TransportId(1), capacity: 2 }));
        assert_eq!(transport.passenger_count(), 1);
        assert!(transport.read_by_passenger_id(PassengerId(3)).is_none());
    }

    #[test]
    fn test_free_seats_track_next_id() {
        let mut transport = transport(3);
        assert_eq!(transport.free_seats(), 3);
        transport.add_passenger(ticket(), "Anna", 20).unwrap();
        assert_eq!(transport.free_seats(), 2);
        assert!(!transport.is_full());
    }

    #[test]
    fn test_invalid_passenger_not_added() {
        let mut transport = transport(2);
        assert!(transport.add_passenger(ticket(), "", 20).is_err());
        assert_eq!(transport.passenger_count(), 0);
        let id = transport.add_passenger(ticket(), "Anna", 20).unwrap().id();
        assert_eq!(id, PassengerId(1));
    }

    #[test]
    fn test_read_by_passenger_id() {
        let mut transport = transport(2);
        transport.add_passenger(ticket(), "Anna", 20).unwrap();
        assert_eq!(transport.read_by_passenger_id(PassengerId(1)).unwrap().name(), "Anna");
        assert!(transport.read_by_passenger_id(PassengerId(7)).is_none());
    }

    #[test]
    fn test_update_passenger_partial() {
        let mut transport = transport(2);
        transport.add_passenger(ticket(), "Anna", 20).unwrap();

        let updated = transport.update_passenger(PassengerId(1), PassengerUpdate::default().age(25)).unwrap();
        assert!(updated);

        let passenger = transport.read_by_passenger_id(PassengerId(1)).unwrap();
        assert_eq!(passenger.age(), 25);
        assert_eq!(passenger.name(), "Anna");
        assert_eq!(passenger.ticket(), &ticket());
    }

    #[test]
    fn test_update_ticket_only() {
        let mut transport = transport(2);
        transport.add_passenger(ticket(), "Anna", 20).unwrap();

        let new_ticket = Ticket::new(75, "2026-10-19T09:30:00Z").unwrap();
        let updated = transport
            .update_passenger(PassengerId(1), PassengerUpdate::default().ticket(new_ticket.clone()))
            .unwrap();
        assert!(updated);

        let passenger = transport.read_by_passenger_id(PassengerId(1)).unwrap();
        assert_eq!(passenger.ticket(), &new_ticket);
        assert_eq!(passenger.name(), "Anna");
        assert_eq!(passenger.age(), 20);
    }

    #[test]
    fn test_rejected_update_keeps_ticket() {
        let mut transport = transport(2);
        transport.add_passenger(ticket(), "Anna", 20).unwrap();

        let new_ticket = Ticket::new(75, "2026-10-19T09:30:00Z").unwrap();
        let update = PassengerUpdate::default().name(" ").ticket(new_ticket);
        assert!(transport.update_passenger(PassengerId(1), update).is_err());

        let passenger = transport.read_by_passenger_id(PassengerId(1)).unwrap();
        assert_eq!(passenger.ticket(), &ticket());
        assert_eq!(passenger.name(), "Anna");
    }

    #[test]
    fn test_update_missing_passenger_mutates_nothing() {
        let mut transport = transport(2);
        transport.add_passenger(ticket(), "Anna", 20).unwrap();
        let before = transport.clone();

        let updated = transport
            .update_passenger(PassengerId(9), PassengerUpdate::default().name("Boris").age(40))
            .unwrap();
        assert!(!updated);
        assert_eq!(transport, before);
    }

    #[test]
    fn test_update_rejects_empty_name() {
        let mut transport = transport(2);
        transport.add_passenger(ticket(), "Anna", 20).unwrap();

        let update = PassengerUpdate::default().name("").age(99);
        assert!(transport.update_passenger(PassengerId(1), update).is_err());
        assert_eq!(transport.read_by_passenger_id(PassengerId(1)).unwrap().age(), 20);
    }

    #[test]
    fn test_replace_driver_and_plate() {
        let mut transport = transport(2);
        transport.set_driver(Person::new("Kozlov Pavel", 52).unwrap());
        assert_eq!(transport.driver().name(), "Kozlov Pavel");

        assert!(transport.set_license_plate("").is_err());
        assert_eq!(transport.license_plate(), "AB1234");
        transport.set_license_plate("AK5521").unwrap();
        assert_eq!(transport.license_plate(), "AK5521");
    }

    #[test]
    fn test_delete_passenger() {
        let mut transport = transport(2);
        transport.add_passenger(ticket(), "Anna", 20).unwrap();
        assert!(transport.delete_passenger(PassengerId(1)));
        assert!(!transport.delete_passenger(PassengerId(1)));
        assert!(transport.read_all_passengers().is_empty());
    }

    #[test]
    fn test_decode_restores_id_counter() {
        let mut transport = transport(3);
        transport.add_passenger(ticket(), "Anna", 20).unwrap();
        transport.add_passenger(ticket(), "Boris", 21).unwrap();

        let json = serde_json::to_value(&transport).unwrap();
        assert!(json.get("next_passenger_id").is_none());

        let mut decoded: Transport = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, transport);
        let id = decoded.add_passenger(ticket(), "Vera", 22).unwrap().id();
        assert_eq!(id, PassengerId(3));
    }

    #[test]
    fn test_decode_rejects_overfull_transport() {
        let json = serde_json::json!({
            "id": 1,
            "license_plate": "AB1234",
            "passenger_capacity": 1,
            "driver": { "name": "Ivanov Ivan", "age": 45 },
            "passengers": [
                { "id": 1, "name": "Anna", "age": 20, "ticket": { "cost": 5, "payment_time": "08:00" } },
                { "id": 2, "name": "Boris", "age": 21, "ticket": { "cost": 5, "payment_time": "08:00" } }
            ]
        });
        assert!(serde_json::from_value::<Transport>(json).is_err());
    }

    #[test]
    fn test_decode_rejects_id_beyond_capacity() {
        let json = serde_json::json!({
            "id": 1,
            "license_plate": "AB1234",
            "passenger_capacity": 2,
            "driver": { "name": "Ivanov Ivan", "age": 45 },
            "passengers": [
                { "id": 3, "name": "Vera", "age": 22, "ticket": { "cost": 5, "payment_time": "08:00" } }
            ]
        });
        let err = serde_json::from_value::<Transport>(json).unwrap_err();
        assert!(err.to_string().contains("between 1 and 2"));
    }

    #[test]
    fn test_decode_rejects_duplicate_passenger_ids() {
        let json = serde_json::json!({
            "id": 1,
            "license_plate": "AB1234",
            "passenger_capacity": 4,
            "driver": { "name": "Ivanov Ivan", "age": 45 },
            "passengers": [
                { "id": 1, "name": "Anna", "age": 20, "ticket": { "cost": 5, "payment_time": "08:00" } },
                { "id": 1, "name": "Boris", "age": 21, "ticket": { "cost": 5, "payment_time": "08:00" } }
            ]
        });
        let err = serde_json::from_value::<Transport>(json).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}
