//! sea-orm entities for the bookings service tables.

pub mod access_logs;
pub mod bookings;
pub mod classes;
