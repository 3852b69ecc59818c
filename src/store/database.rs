//! In-memory transport database with whole-file JSON dump/load
//!
//! Records are kept as serialized JSON snapshots keyed by transport id.
//! Changing a live `Vehicle` has no effect on the database until it is
//! written back with `update_transport`.

use crate::domain::types::TransportId;
use crate::domain::vehicle::Vehicle;
use crate::error::{Result, TransitError};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info, warn};

#[derive(Debug, Default)]
pub struct TransportDataBase {
    transport: BTreeMap<TransportId, Value>,
}

impl TransportDataBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transport.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transport.is_empty()
    }

    pub fn contains(&self, id: TransportId) -> bool {
        self.transport.contains_key(&id)
    }

    /// Registered ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = TransportId> + '_ {
        self.transport.keys().copied()
    }

    /// Raw stored snapshot of one record
    pub fn record(&self, id: TransportId) -> Option<&Value> {
        self.transport.get(&id)
    }

    /// Store a snapshot of `vehicle`. Fails if its id is already registered.
    pub fn add_transport(&mut self, vehicle: &Vehicle) -> Result<()> {
        let id = vehicle.id();
        if self.transport.contains_key(&id) {
            return Err(TransitError::DuplicateId(id));
        }

        let record = serde_json::to_value(vehicle)?;
        self.transport.insert(id, record);

        info!(
            transport_id = %id,
            kind = %vehicle.kind(),
            passengers = %vehicle.transport().passenger_count(),
            "transport_added"
        );
        Ok(())
    }

    /// Rebuild the vehicle stored under `id`
    pub fn get_transport(&self, id: TransportId) -> Result<Vehicle> {
        let record = self.transport.get(&id).ok_or(TransitError::NotFound(id))?;
        Ok(Vehicle::deserialize(record)?)
    }

    /// Replace the snapshot stored under the vehicle's id
    pub fn update_transport(&mut self, vehicle: &Vehicle) -> Result<()> {
        let id = vehicle.id();
        let slot = self.transport.get_mut(&id).ok_or(TransitError::NotFound(id))?;
        *slot = serde_json::to_value(vehicle)?;

        info!(transport_id = %id, kind = %vehicle.kind(), "transport_updated");
        Ok(())
    }

    pub fn delete_vehicle(&mut self, id: TransportId) -> Result<()> {
        self.transport.remove(&id).ok_or(TransitError::NotFound(id))?;
        info!(transport_id = %id, "transport_deleted");
        Ok(())
    }

    /// Write the whole database to `path` as formatted JSON.
    /// Returns true if successful, false otherwise (the failure is logged).
    pub fn to_json<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        match self.write_file(path) {
            Ok(bytes) => {
                info!(
                    file = %path.display(),
                    records = %self.transport.len(),
                    bytes = %bytes,
                    "database_saved"
                );
                true
            }
            Err(e) => {
                error!(file = %path.display(), error = %e, "database_save_failed");
                false
            }
        }
    }

    /// Load every record from `path` into this database.
    ///
    /// Records that fail validation, carry a key that does not match their
    /// id, or collide with an id already registered are skipped. Returns
    /// the number of records added; read and parse failures are logged and
    /// yield 0.
    pub fn from_json<P: AsRef<Path>>(&mut self, path: P) -> usize {
        let path = path.as_ref();
        let records = match Self::read_file(path) {
            Ok(records) => records,
            Err(e) => {
                error!(file = %path.display(), error = %e, "database_load_failed");
                return 0;
            }
        };

        let total = records.len();
        let mut loaded = 0;
        for (key, record) in records {
            match self.insert_record(&key, record) {
                Ok(()) => loaded += 1,
                Err(e) => warn!(key = %key, error = %e, "record_skipped"),
            }
        }

        info!(
            file = %path.display(),
            loaded = %loaded,
            skipped = %(total - loaded),
            "database_loaded"
        );
        loaded
    }

    fn insert_record(&mut self, key: &str, record: Value) -> Result<()> {
        let vehicle: Vehicle = serde_json::from_value(record)?;
        if key != vehicle.id().to_string() {
            return Err(TransitError::validation(
                "record key",
                format!("key {key} does not match transport id {}", vehicle.id()),
            ));
        }
        self.add_transport(&vehicle)
    }

    fn write_file(&self, path: &Path) -> Result<usize> {
        let records: Map<String, Value> = self
            .transport
            .iter()
            .map(|(id, record)| (id.to_string(), record.clone()))
            .collect();
        let json = serde_json::to_string_pretty(&records)?;

        let io_err = |source| TransitError::Io { path: path.display().to_string(), source };

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        fs::write(path, &json).map_err(io_err)?;
        debug!(file = %path.display(), bytes = %json.len(), "database_written");
        Ok(json.len())
    }

    fn read_file(path: &Path) -> Result<Map<String, Value>> {
        let content = fs::read_to_string(path)
            .map_err(|source| TransitError::Io { path: path.display().to_string(), source })?;
        Ok(serde_json::from_str(&content)?)
    }
}
