//! Shared types for the host protocol

use std::fmt;

use crate::constants::{NUM_CHOPSTICKS, NUM_PHILOSOPHERS};

/// Seat of a philosopher at the table, `0..NUM_PHILOSOPHERS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhilosopherId(usize);

impl PhilosopherId {
    /// Returns `None` if there is no such seat.
    pub fn new(seat: usize) -> Option<Self> {
        (seat < NUM_PHILOSOPHERS).then_some(Self(seat))
    }

    /// Every seat, in ring order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_PHILOSOPHERS).map(Self)
    }

    pub fn seat(self) -> usize {
        self.0
    }

    /// Chopstick on the philosopher's left: the one sharing its seat number.
    pub fn left_chopstick(self) -> usize {
        self.0
    }

    /// Chopstick on the philosopher's right, wrapping around the table.
    pub fn right_chopstick(self) -> usize {
        (self.0 + 1) % NUM_CHOPSTICKS
    }
}

impl fmt::Display for PhilosopherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why the host turned a request down.
///
/// Rejections are the ordinary outcome of contention: the philosopher goes
/// back to thinking and asks again later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A neighbor holds one of the chopsticks we would need
    Neighbor { eating: PhilosopherId },
    /// The philosopher is already recorded as eating
    AlreadyEating,
    /// The host's capacity of concurrent eaters is reached
    TableFull,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Neighbor { eating } => write!(f, "neighbor {eating} is eating"),
            Rejection::AlreadyEating => write!(f, "philosopher is already eating"),
            Rejection::TableFull => write!(f, "all allowed philosophers are already eating"),
        }
    }
}

/// The host's answer to a request to eat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admitted,
    Rejected(Rejection),
}

impl Decision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Decision::Admitted)
    }
}

/// Infrastructure failures. Business rejections are [`Decision::Rejected`], not errors.
#[derive(Debug, thiserror::Error)]
pub enum DinnerError {
    #[error("host is no longer serving (philosopher {0})")]
    HostUnavailable(PhilosopherId),

    #[error("host stopped before answering")]
    HostStopped,

    #[error("{task} task failed")]
    TaskFailed {
        task: String,
        #[source]
        source: tokio::task::JoinError,
    },
}
