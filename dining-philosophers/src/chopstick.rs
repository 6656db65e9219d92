//! Chopsticks: one lock between each pair of neighbors

use tokio::sync::{Mutex, MutexGuard};
use tracing::trace;

/// A chopstick that one philosopher at a time may hold.
#[derive(Debug)]
pub struct Chopstick {
    id: usize,
    lock: Mutex<()>,
}

/// Proof that a chopstick is held. Dropping it puts the chopstick down.
#[derive(Debug)]
pub struct ChopstickGuard<'a> {
    id: usize,
    _held: MutexGuard<'a, ()>,
}

impl Chopstick {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            lock: Mutex::new(()),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Wait until the chopstick is free, then pick it up.
    ///
    /// Waiters are woken in the order tokio's mutex grants, with no
    /// additional fairness.
    pub async fn acquire(&self) -> ChopstickGuard<'_> {
        let held = self.lock.lock().await;
        trace!("Chopstick {} picked up", self.id);
        ChopstickGuard {
            id: self.id,
            _held: held,
        }
    }

    /// Whether someone is holding the chopstick right now
    pub fn is_held(&self) -> bool {
        self.lock.try_lock().is_err()
    }
}

impl ChopstickGuard<'_> {
    pub fn chopstick_id(&self) -> usize {
        self.id
    }
}

impl Drop for ChopstickGuard<'_> {
    fn drop(&mut self) {
        trace!("Chopstick {} put down", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready, task};

    #[tokio::test]
    async fn test_acquire_marks_held_until_dropped() {
        let chopstick = Chopstick::new(3);
        assert!(!chopstick.is_held());

        let guard = chopstick.acquire().await;
        assert_eq!(guard.chopstick_id(), 3);
        assert!(chopstick.is_held());

        drop(guard);
        assert!(!chopstick.is_held());
    }

    #[tokio::test]
    async fn test_second_acquire_waits_for_release() {
        let chopstick = Chopstick::new(0);
        let held = chopstick.acquire().await;

        let mut waiter = task::spawn(chopstick.acquire());
        assert_pending!(waiter.poll());

        drop(held);
        assert!(waiter.is_woken());
        let guard = assert_ready!(waiter.poll());
        assert_eq!(guard.chopstick_id(), 0);
        assert!(chopstick.is_held());
    }
}
