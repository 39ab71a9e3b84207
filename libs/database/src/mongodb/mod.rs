//! MongoDB database connector and utilities
//!
//! Provides configuration and client construction.

mod config;
mod connector;

pub use config::MongoConfig;
pub use connector::{MongoError, client_from_config};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
