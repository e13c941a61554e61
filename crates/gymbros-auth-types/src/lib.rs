//! Identity types injected by the platform gateway.
//!
//! Authentication itself (session issuance, password flows) is owned by the
//! managed auth platform; services only consume the identity headers the
//! gateway forwards after verifying the session.

pub mod identity;
