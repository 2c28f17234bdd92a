pub mod auth_store;
pub mod paths;
pub mod settings;
