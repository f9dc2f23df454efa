// Service module exports

pub mod import;
pub mod settings;
pub mod store;
