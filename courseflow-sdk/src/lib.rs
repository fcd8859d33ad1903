//! Shared API types for Courseflow, plus typed HTTP clients behind the
//! `client` feature.

pub mod objects;

#[cfg(feature = "client")]
pub mod client;
