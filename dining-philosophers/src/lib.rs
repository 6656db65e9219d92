//! Dining Philosophers Library
//!
//! Five philosophers share five chopsticks arranged in a ring. Instead of
//! imposing a lock order on the chopsticks, a single host actor decides who
//! may eat: at most two philosophers at a time, never two neighbors.

pub mod actor;
pub mod admission;
pub mod chopstick;
pub mod constants;
pub mod meal_counter;
pub mod structured_logging;
pub mod table;
pub mod types;

pub use actor::{HostHandle, HostReport, PhilosopherReport};
pub use table::{DinnerReport, Table};
pub use types::{Decision, DinnerError, PhilosopherId, Rejection};
