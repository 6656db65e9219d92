//! Constants and configuration values used throughout the dinner

use std::time::Duration;

/// Philosophers seated around the table
pub const NUM_PHILOSOPHERS: usize = 5;

/// Chopsticks on the table, one between each pair of neighbors
pub const NUM_CHOPSTICKS: usize = NUM_PHILOSOPHERS;

/// Meals each philosopher eats before leaving the table
pub const MEALS_PER_PHILOSOPHER: usize = 3;

/// Philosophers the host lets eat at the same time
pub const MAX_CONCURRENT_EATERS: usize = 2;

/// Upper bound (exclusive) of the think delay before asking to eat
pub const MAX_THINK_TIME: Duration = Duration::from_millis(300);

/// Shortest meal
pub const MIN_EAT_TIME: Duration = Duration::from_millis(50);

/// Longest meal (exclusive)
pub const MAX_EAT_TIME: Duration = Duration::from_millis(550);

/// Capacity of the shared request queue in front of the host
pub const HOST_QUEUE_DEPTH: usize = NUM_PHILOSOPHERS;

/// Directory for temporary files (logs)
pub const TEMP_DIR: &str = "/tmp";

/// Default log file name for development mode
pub const DEV_LOG_FILENAME: &str = "dining-philosophers.log";

/// Development log file path
pub fn dev_log_path() -> String {
    format!("{}/{}", TEMP_DIR, DEV_LOG_FILENAME)
}
