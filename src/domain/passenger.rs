//! Passenger record and partial updates

use crate::domain::types::{PassengerId, Person, Ticket};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A rider on one transport. The id is assigned by the owning transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub(crate) id: PassengerId,
    #[serde(flatten)]
    pub(crate) person: Person,
    pub(crate) ticket: Ticket,
}

impl Passenger {
    pub fn id(&self) -> PassengerId {
        self.id
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn name(&self) -> &str {
        self.person.name()
    }

    pub fn age(&self) -> u32 {
        self.person.age()
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }
}

/// Fields to change on a passenger; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct PassengerUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub ticket: Option<Ticket>,
}

impl PassengerUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn ticket(mut self, ticket: Ticket) -> Self {
        self.ticket = Some(ticket);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.ticket.is_none()
    }

    /// Build the updated identity without touching the passenger,
    /// so a rejected update leaves it unchanged.
    pub(crate) fn apply_to(&self, passenger: &Passenger) -> Result<Person> {
        let mut person = passenger.person.clone();
        if let Some(name) = &self.name {
            person.set_name(name.clone())?;
        }
        if let Some(age) = self.age {
            person.set_age(age);
        }
        Ok(person)
    }
}
