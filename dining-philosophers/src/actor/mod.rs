// Actor module for the dinner
//
// This module contains focused actors following the Tokio actor pattern:
// - Each actor owns specific state and responsibilities
// - Actors communicate via message passing channels
// - The host is the only owner of who is eating

use std::future::Future;
use tokio::task::JoinHandle;

pub mod host;
pub mod philosopher;

pub use host::{HostHandle, HostMessage, HostReport};
pub use philosopher::{PhilosopherActor, PhilosopherReport};

/// A task that owns its state and runs until its inputs are exhausted.
pub trait Actor: Sized + Send + 'static {
    /// What the actor hands back when it stops
    type Output: Send + 'static;

    fn run(self) -> impl Future<Output = Self::Output> + Send + 'static;

    /// Run the actor on its own tokio task.
    fn spawn(self) -> JoinHandle<Self::Output> {
        tokio::spawn(self.run())
    }
}
