pub mod crm_service;
pub mod notifier;
pub mod search;
