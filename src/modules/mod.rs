//! Modules layer - Infrastructure components behind the feature services
//!
//! Contains the persistence contracts and their Postgres implementation.

pub mod store;
