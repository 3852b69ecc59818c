//! Storage - the in-memory transport database and its JSON file format

pub mod database;

pub use database::TransportDataBase;
