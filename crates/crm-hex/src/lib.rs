//! crm-hex: hexagonal CRM library (service core + inbound HTTP)

pub mod config;
pub mod errors;

pub mod application;

pub use crm_types::{domain, ports};

pub mod inbound; // HTTP adapter (server + handlers)
