//! Wait-group style counter of meals still owed

use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

/// Counts down the meals still owed across the whole table.
///
/// Philosophers call [`MealCounter::meal_done`] once per finished meal; the
/// table waits on [`MealCounter::wait`] until the count reaches zero.
#[derive(Debug, Clone)]
pub struct MealCounter {
    remaining: Arc<watch::Sender<usize>>,
}

impl MealCounter {
    pub fn new(meals_owed: usize) -> Self {
        let (remaining, _) = watch::channel(meals_owed);
        Self {
            remaining: Arc::new(remaining),
        }
    }

    /// Record one finished meal.
    pub fn meal_done(&self) {
        let counted = self.remaining.send_if_modified(|remaining| {
            if *remaining == 0 {
                return false;
            }
            *remaining -= 1;
            true
        });

        if !counted {
            warn!("Meal reported after every meal was already served");
        }
    }

    pub fn remaining(&self) -> usize {
        *self.remaining.borrow()
    }

    /// Wait until every meal has been served.
    pub async fn wait(&self) {
        let mut receiver = self.remaining.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = receiver.wait_for(|remaining| *remaining == 0).await;
    }
}
