pub mod attendance;
pub mod booking;
pub mod class;
