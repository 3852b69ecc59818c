//! Vehicle kinds stored in the database

use crate::domain::transport::Transport;
use crate::domain::types::{Address, TransportId, TransportationCompany};
use crate::error::{require_positive, require_text, Result};
use serde::{Deserialize, Serialize};

/// Route bus operated by a transportation company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bus {
    #[serde(flatten)]
    transport: Transport,
    route_number: String,
    transportation_company: TransportationCompany,
    #[serde(default)]
    bus_stops: Vec<String>,
}

impl Bus {
    pub fn new(
        transport: Transport,
        route_number: impl Into<String>,
        transportation_company: TransportationCompany,
    ) -> Result<Self> {
        let route_number = route_number.into();
        require_text("route_number", &route_number)?;
        Ok(Self { transport, route_number, transportation_company, bus_stops: Vec::new() })
    }

    pub fn with_stops<I, S>(mut self, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bus_stops = stops.into_iter().map(Into::into).collect();
        self
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    pub fn route_number(&self) -> &str {
        &self.route_number
    }

    pub fn set_route_number(&mut self, route_number: impl Into<String>) -> Result<()> {
        let route_number = route_number.into();
        require_text("route_number", &route_number)?;
        self.route_number = route_number;
        Ok(())
    }

    pub fn transportation_company(&self) -> &TransportationCompany {
        &self.transportation_company
    }

    pub fn bus_stops(&self) -> &[String] {
        &self.bus_stops
    }
}

/// Trip details of a taxi ride
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxiTrip {
    pub departure_address: Address,
    pub destination_address: Address,
    pub taxi_type: String,
    /// Minutes
    pub travel_time: u32,
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxi {
    #[serde(flatten)]
    transport: Transport,
    #[serde(flatten)]
    trip: TaxiTrip,
}

impl Taxi {
    pub fn new(transport: Transport, trip: TaxiTrip) -> Result<Self> {
        require_text("taxi_type", &trip.taxi_type)?;
        require_positive("taxi cost", trip.cost)?;
        Ok(Self { transport, trip })
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    pub fn trip(&self) -> &TaxiTrip {
        &self.trip
    }
}

/// Any vehicle the database can hold. Serialized with a `kind` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Vehicle {
    Bus(Bus),
    Taxi(Taxi),
}

impl Vehicle {
    pub fn id(&self) -> TransportId {
        self.transport().id()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Vehicle::Bus(_) => "bus",
            Vehicle::Taxi(_) => "taxi",
        }
    }

    pub fn transport(&self) -> &Transport {
        match self {
            Vehicle::Bus(bus) => bus.transport(),
            Vehicle::Taxi(taxi) => taxi.transport(),
        }
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        match self {
            Vehicle::Bus(bus) => bus.transport_mut(),
            Vehicle::Taxi(taxi) => taxi.transport_mut(),
        }
    }

    pub fn as_bus(&self) -> Option<&Bus> {
        match self {
            Vehicle::Bus(bus) => Some(bus),
            Vehicle::Taxi(_) => None,
        }
    }

    pub fn as_taxi(&self) -> Option<&Taxi> {
        match self {
            Vehicle::Taxi(taxi) => Some(taxi),
            Vehicle::Bus(_) => None,
        }
    }
}

impl From<Bus> for Vehicle {
    fn from(bus: Bus) -> Self {
        Vehicle::Bus(bus)
    }
}

impl From<Taxi> for Vehicle {
    fn from(taxi: Taxi) -> Self {
        Vehicle::Taxi(taxi)
    }
}
