pub mod membership;
pub mod payment;
pub mod plan;
