//! Domain types shared across all Gymbros services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod booking;
pub mod id;
pub mod membership;
pub mod pagination;
pub mod role;
pub mod schedule;
