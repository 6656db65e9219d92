//! The host's admission policy
//!
//! The host admits a philosopher only if fewer than
//! [`MAX_CONCURRENT_EATERS`] are eating and none of them is a neighbor. With
//! five seats and two eaters that are never adjacent, nobody can wait on a
//! chopstick held by someone who is waiting on theirs.

use std::collections::BTreeSet;

use crate::constants::{MAX_CONCURRENT_EATERS, NUM_PHILOSOPHERS};
use crate::types::{Decision, PhilosopherId, Rejection};

/// Number of seats between `a` and `b`, going the short way around the table.
pub fn ring_distance(a: PhilosopherId, b: PhilosopherId) -> usize {
    let diff = a.seat().abs_diff(b.seat());
    diff.min(NUM_PHILOSOPHERS - diff)
}

/// Whether `a` and `b` share a chopstick, including the last/first pair.
pub fn are_neighbors(a: PhilosopherId, b: PhilosopherId) -> bool {
    ring_distance(a, b) == 1
}

/// The philosophers currently eating.
///
/// Owned by the host actor; philosophers never see it.
#[derive(Debug, Default, Clone)]
pub struct AdmissionSet {
    eating: BTreeSet<PhilosopherId>,
}

impl AdmissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide a request to eat, recording the philosopher if admitted.
    ///
    /// Depends only on who is eating right now; earlier decisions are not
    /// remembered, so there is no fairness between philosophers.
    pub fn decide(&mut self, philosopher: PhilosopherId) -> Decision {
        if self.eating.len() >= MAX_CONCURRENT_EATERS {
            return Decision::Rejected(Rejection::TableFull);
        }

        if self.eating.contains(&philosopher) {
            return Decision::Rejected(Rejection::AlreadyEating);
        }

        if let Some(&eating) = self.eating.iter().find(|&&e| are_neighbors(e, philosopher)) {
            return Decision::Rejected(Rejection::Neighbor { eating });
        }

        self.eating.insert(philosopher);
        Decision::Admitted
    }

    /// Forget that `philosopher` is eating. Returns false if they were not.
    pub fn release(&mut self, philosopher: PhilosopherId) -> bool {
        self.eating.remove(&philosopher)
    }

    pub fn contains(&self, philosopher: PhilosopherId) -> bool {
        self.eating.contains(&philosopher)
    }

    pub fn len(&self) -> usize {
        self.eating.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eating.is_empty()
    }

    /// Current eaters in seat order
    pub fn members(&self) -> Vec<PhilosopherId> {
        self.eating.iter().copied().collect()
    }
}
