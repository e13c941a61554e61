//! Ambient service plumbing shared by all Gymbros services: tracing init,
//! request-id middleware, health endpoints, and serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
