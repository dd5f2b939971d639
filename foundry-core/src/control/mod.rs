//! Closed-loop crucible temperature control

pub mod pid;
pub mod rate;

pub use pid::PidController;
pub use rate::RateLimiter;
