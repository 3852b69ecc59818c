//! Value types shared by passengers and vehicles

use crate::error::{require_positive, require_text, Result, TransitError};
use serde::{Deserialize, Serialize};

/// Newtype wrapper for transport IDs to provide type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportId(pub u32);

impl std::fmt::Display for TransportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype wrapper for passenger IDs, unique within one transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassengerId(pub u32);

impl std::fmt::Display for PassengerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full name of a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub surname: String,
    pub name: String,
}

impl Name {
    pub fn new(surname: impl Into<String>, name: impl Into<String>) -> Self {
        Self { surname: surname.into(), name: name.into() }
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.surname, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub house: u32,
}

impl Address {
    pub fn new(city: impl Into<String>, street: impl Into<String>, house: u32) -> Self {
        Self { city: city.into(), street: street.into(), house }
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {} {}", self.city, self.street, self.house)
    }
}

/// Paid fare. `departure`/`destination` are only known for point-to-point trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TicketFields")]
pub struct Ticket {
    cost: u32,
    payment_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    departure: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<Address>,
}

#[derive(Deserialize)]
struct TicketFields {
    cost: u32,
    payment_time: String,
    #[serde(default)]
    departure: Option<Address>,
    #[serde(default)]
    destination: Option<Address>,
}

impl TryFrom<TicketFields> for Ticket {
    type Error = TransitError;

    fn try_from(fields: TicketFields) -> Result<Self> {
        let ticket = Ticket::new(fields.cost, fields.payment_time)?;
        Ok(Ticket { departure: fields.departure, destination: fields.destination, ..ticket })
    }
}

impl Ticket {
    pub fn new(cost: u32, payment_time: impl Into<String>) -> Result<Self> {
        let payment_time = payment_time.into();
        require_positive("ticket cost", cost)?;
        require_text("ticket payment_time", &payment_time)?;
        Ok(Self { cost, payment_time, departure: None, destination: None })
    }

    pub fn with_route(mut self, departure: Address, destination: Address) -> Self {
        self.departure = Some(departure);
        self.destination = Some(destination);
        self
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn payment_time(&self) -> &str {
        &self.payment_time
    }

    pub fn departure(&self) -> Option<&Address> {
        self.departure.as_ref()
    }

    pub fn destination(&self) -> Option<&Address> {
        self.destination.as_ref()
    }
}

/// Validated identity: non-empty name and an age
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersonFields")]
pub struct Person {
    name: String,
    age: u32,
}

#[derive(Deserialize)]
struct PersonFields {
    name: String,
    age: u32,
}

impl TryFrom<PersonFields> for Person {
    type Error = TransitError;

    fn try_from(fields: PersonFields) -> Result<Self> {
        Person::new(fields.name, fields.age)
    }
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Result<Self> {
        let name = name.into();
        require_text("name", &name)?;
        Ok(Self { name, age })
    }

    /// Build a person from a structured name, rendered as "surname name"
    pub fn from_name(name: &Name, age: u32) -> Result<Self> {
        Self::new(name.to_string(), age)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        require_text("name", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_age(&mut self, age: u32) {
        self.age = age;
    }
}

/// Operator metadata for buses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportationCompany {
    pub name: String,
    pub address: Address,
}

impl TransportationCompany {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self { name: name.into(), address }
    }
}
