//! Philosopher Actor - Thinks, asks the host, eats
//!
//! A philosopher loops until it has eaten [`MEALS_PER_PHILOSOPHER`] times:
//!
//! ```text
//! Idle --think--> Requesting --want_to_eat--> WaitingForDecision
//!   ^                                            |         |
//!   |                                     rejected      admitted
//!   +--------------------------------------------+         |
//!   |                                                      v
//!   +---- meals < quota ---- finished_eating <------- Eating
//!                                   |
//!                            meals == quota --> Done
//! ```

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::actor::{Actor, HostHandle};
use crate::chopstick::Chopstick;
use crate::constants::{MAX_EAT_TIME, MAX_THINK_TIME, MEALS_PER_PHILOSOPHER, MIN_EAT_TIME};
use crate::meal_counter::MealCounter;
use crate::types::{Decision, DinnerError, PhilosopherId};

/// What a philosopher reports when leaving the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhilosopherReport {
    pub philosopher: PhilosopherId,
    pub meals_eaten: usize,
    pub rejections: usize,
}

pub struct PhilosopherActor {
    id: PhilosopherId,
    left: Arc<Chopstick>,
    right: Arc<Chopstick>,
    host: HostHandle,
    meals: MealCounter,
    meals_eaten: usize,
    rejections: usize,
}

impl Actor for PhilosopherActor {
    type Output = Result<PhilosopherReport, DinnerError>;

    async fn run(mut self) -> Result<PhilosopherReport, DinnerError> {
        debug!(
            "Philosopher {} sat down between chopsticks {} and {}",
            self.id,
            self.left.id(),
            self.right.id()
        );

        while self.meals_eaten < MEALS_PER_PHILOSOPHER {
            tokio::time::sleep(think_time()).await;

            // The reply channel lives only for this request, so there is
            // exactly one answer per question.
            match self.host.want_to_eat(self.id).await? {
                Decision::Admitted => self.eat().await?,
                Decision::Rejected(_) => self.rejections += 1,
            }
        }

        info!(
            "Philosopher {} is done after {} meals ({} rejections)",
            self.id, self.meals_eaten, self.rejections
        );

        Ok(PhilosopherReport {
            philosopher: self.id,
            meals_eaten: self.meals_eaten,
            rejections: self.rejections,
        })
    }
}

impl PhilosopherActor {
    /// Seat a philosopher between two chopsticks
    pub fn new(
        id: PhilosopherId,
        left: Arc<Chopstick>,
        right: Arc<Chopstick>,
        host: HostHandle,
        meals: MealCounter,
    ) -> Self {
        Self {
            id,
            left,
            right,
            host,
            meals,
            meals_eaten: 0,
            rejections: 0,
        }
    }

    async fn eat(&mut self) -> Result<(), DinnerError> {
        // Left then right is safe: the host never seats two neighbors.
        let left = self.left.acquire().await;
        let right = self.right.acquire().await;

        let meal = self.meals_eaten + 1;
        info!("Philosopher {} starts meal {meal}/{MEALS_PER_PHILOSOPHER}", self.id);
        tokio::time::sleep(eat_time()).await;
        info!("Philosopher {} finishes meal {meal}/{MEALS_PER_PHILOSOPHER}", self.id);

        drop(right);
        drop(left);

        self.meals_eaten += 1;
        self.meals.meal_done();

        self.host.finished_eating(self.id).await
    }
}

fn think_time() -> Duration {
    rand::rng().random_range(Duration::ZERO..MAX_THINK_TIME)
}

fn eat_time() -> Duration {
    rand::rng().random_range(MIN_EAT_TIME..MAX_EAT_TIME)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(seat: usize) -> PhilosopherId {
        PhilosopherId::new(seat).unwrap()
    }

    #[test]
    fn test_delays_stay_in_bounds() {
        for _ in 0..1_000 {
            assert!(think_time() < MAX_THINK_TIME);
            let eat = eat_time();
            assert!(eat >= MIN_EAT_TIME && eat < MAX_EAT_TIME);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_lone_philosopher_eats_quota_and_leaves_table_clean() {
        let (host, host_task) = HostHandle::new();
        let meals = MealCounter::new(MEALS_PER_PHILOSOPHER);
        let left = Arc::new(Chopstick::new(0));
        let right = Arc::new(Chopstick::new(1));

        let diner = PhilosopherActor::new(
            p(0),
            left.clone(),
            right.clone(),
            host.clone(),
            meals.clone(),
        )
        .spawn();

        let report = diner.await.unwrap().unwrap();
        assert_eq!(report.meals_eaten, MEALS_PER_PHILOSOPHER);
        assert_eq!(report.rejections, 0);
        assert_eq!(meals.remaining(), 0);
        assert!(!left.is_held() && !right.is_held());

        assert!(host.snapshot().await.unwrap().is_empty());
        host.shutdown().await.unwrap();
        assert_eq!(host_task.await.unwrap().admitted, MEALS_PER_PHILOSOPHER);
    }

    #[tokio::test(start_paused = true)]
    async fn test_philosopher_keeps_asking_while_neighbor_eats() {
        let (host, host_task) = HostHandle::new();
        let meals = MealCounter::new(MEALS_PER_PHILOSOPHER);

        // Seat 1 is eating and never finishes until we say so.
        assert!(host.want_to_eat(p(1)).await.unwrap().is_admitted());

        let diner = PhilosopherActor::new(
            p(0),
            Arc::new(Chopstick::new(0)),
            Arc::new(Chopstick::new(1)),
            host.clone(),
            meals.clone(),
        )
        .spawn();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(meals.remaining(), MEALS_PER_PHILOSOPHER);

        host.finished_eating(p(1)).await.unwrap();
        let report = diner.await.unwrap().unwrap();
        assert_eq!(report.meals_eaten, MEALS_PER_PHILOSOPHER);
        assert!(report.rejections > 0);

        host.shutdown().await.unwrap();
        host_task.await.unwrap();
    }

    #[tokio::test]
    async fn test_philosopher_fails_when_host_is_gone() {
        let (host, host_task) = HostHandle::new();
        host.shutdown().await.unwrap();
        host_task.await.unwrap();

        let result = PhilosopherActor::new(
            p(2),
            Arc::new(Chopstick::new(2)),
            Arc::new(Chopstick::new(3)),
            host,
            MealCounter::new(MEALS_PER_PHILOSOPHER),
        )
        .spawn()
        .await
        .unwrap();

        assert!(matches!(result, Err(DinnerError::HostUnavailable(id)) if id == p(2)));
    }
}
