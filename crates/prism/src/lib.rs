pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod providers;
pub mod session;
