//! crm-types: domain records and the ports (storage, repository) the CRM core is built on.

pub mod domain;
pub mod ports;
