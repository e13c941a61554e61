//! Test utilities for Gymbros services.
//!
//! Provides the gateway-identity mock and the contract fixture loader.
//! Import in `[dev-dependencies]` / `#[cfg(test)]` only, never in
//! production code.

pub mod fixture;
pub mod identity;
