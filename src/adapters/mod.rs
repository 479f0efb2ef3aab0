// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod alert;
pub mod csv_store;
pub mod tequila;
