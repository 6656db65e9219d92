//! The table: seats the philosophers, serves dinner, dismisses the host

use std::sync::Arc;

use tracing::info;

use crate::actor::{Actor, HostHandle, HostReport, PhilosopherActor, PhilosopherReport};
use crate::chopstick::Chopstick;
use crate::constants::{MEALS_PER_PHILOSOPHER, NUM_CHOPSTICKS, NUM_PHILOSOPHERS};
use crate::meal_counter::MealCounter;
use crate::types::{DinnerError, PhilosopherId};

/// Everything that happened at dinner
#[derive(Debug, Clone)]
pub struct DinnerReport {
    /// One report per seat, in seat order
    pub philosophers: Vec<PhilosopherReport>,
    pub host: HostReport,
}

impl DinnerReport {
    pub fn total_meals(&self) -> usize {
        self.philosophers.iter().map(|p| p.meals_eaten).sum()
    }
}

/// Chopsticks laid out in a ring, one between each pair of seats
pub struct Table {
    chopsticks: Vec<Arc<Chopstick>>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self {
            chopsticks: (0..NUM_CHOPSTICKS).map(|id| Arc::new(Chopstick::new(id))).collect(),
        }
    }

    /// The (left, right) chopsticks within reach of a seat
    pub fn chopsticks_for(&self, philosopher: PhilosopherId) -> (Arc<Chopstick>, Arc<Chopstick>) {
        (
            self.chopsticks[philosopher.left_chopstick()].clone(),
            self.chopsticks[philosopher.right_chopstick()].clone(),
        )
    }

    /// Run the dinner until every philosopher has eaten their quota.
    ///
    /// Once the last meal is counted the philosophers are joined, then the
    /// host is told to stop. Joining first means every finished-eating
    /// notice is already queued ahead of the shutdown.
    pub async fn serve(self) -> Result<DinnerReport, DinnerError> {
        let meals = MealCounter::new(NUM_PHILOSOPHERS * MEALS_PER_PHILOSOPHER);
        let (host, host_task) = HostHandle::new();

        info!(
            "Seating {NUM_PHILOSOPHERS} philosophers for {MEALS_PER_PHILOSOPHER} meals each"
        );

        let diners: Vec<_> = PhilosopherId::all()
            .map(|id| {
                let (left, right) = self.chopsticks_for(id);
                let diner = PhilosopherActor::new(id, left, right, host.clone(), meals.clone());
                (id, diner.spawn())
            })
            .collect();

        meals.wait().await;
        info!("All meals served");

        let mut philosophers = Vec::with_capacity(NUM_PHILOSOPHERS);
        for (id, diner) in diners {
            let report = diner.await.map_err(|source| DinnerError::TaskFailed {
                task: format!("philosopher {id}"),
                source,
            })??;
            philosophers.push(report);
        }

        host.shutdown().await?;
        let host = host_task.await.map_err(|source| DinnerError::TaskFailed {
            task: "host".to_string(),
            source,
        })?;

        Ok(DinnerReport { philosophers, host })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_share_exactly_one_chopstick() {
        let table = Table::new();

        for id in PhilosopherId::all() {
            let next = PhilosopherId::new((id.seat() + 1) % NUM_PHILOSOPHERS).unwrap();
            let (_, right) = table.chopsticks_for(id);
            let (next_left, next_right) = table.chopsticks_for(next);

            assert!(Arc::ptr_eq(&right, &next_left), "{id} and {next} should share");
            assert!(!Arc::ptr_eq(&right, &next_right));
        }
    }

    #[test]
    fn test_last_seat_wraps_to_first_chopstick() {
        let table = Table::new();
        let last = PhilosopherId::new(NUM_PHILOSOPHERS - 1).unwrap();
        let (left, right) = table.chopsticks_for(last);

        assert_eq!(left.id(), NUM_PHILOSOPHERS - 1);
        assert_eq!(right.id(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dinner_serves_every_meal() {
        let report = Table::new().serve().await.unwrap();
        assert_eq!(report.total_meals(), NUM_PHILOSOPHERS * MEALS_PER_PHILOSOPHER);
        assert_eq!(report.host.admitted, report.total_meals());
    }
}
