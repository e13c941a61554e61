//! Client behavioral core for the Gymbros apps.
//!
//! The mobile/web UIs are thin; the behavior worth keeping correct lives
//! here, UI-free and fully testable:
//!
//! - [`optimistic`] — apply-await-revert local cache mutations
//! - [`bookings`] — the "my bookings" set with optimistic book/cancel
//! - [`activation`] — bounded polling for webhook-driven membership activation
//! - [`recount`] — wholesale occupancy recount on booking change events
//! - [`suggestion`] — schema-validated, fail-open AI suggestion parsing
//!
//! Everything network-facing is behind a port trait so tests run against
//! in-memory mocks.

pub mod activation;
pub mod bookings;
pub mod error;
pub mod optimistic;
pub mod recount;
pub mod suggestion;
