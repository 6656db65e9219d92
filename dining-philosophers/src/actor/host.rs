//! Host Actor - Decides who may eat
//!
//! Every request from every philosopher goes through one queue into this
//! actor, which handles them one at a time. That serialization is what keeps
//! the admission set consistent without any lock around it.

use std::collections::BTreeSet;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::actor::Actor;
use crate::admission::AdmissionSet;
use crate::constants::HOST_QUEUE_DEPTH;
use crate::types::{Decision, DinnerError, PhilosopherId};

/// Messages that can be sent to the host actor
#[derive(Debug)]
pub enum HostMessage {
    /// A philosopher asks to eat and waits for the decision
    WantToEat {
        philosopher: PhilosopherId,
        reply_tx: oneshot::Sender<Decision>,
    },
    /// A philosopher has put both chopsticks down. No reply.
    FinishedEating { philosopher: PhilosopherId },
    /// Request the current eaters, in seat order
    Snapshot {
        reply_tx: oneshot::Sender<Vec<PhilosopherId>>,
    },
    /// Stop serving
    Shutdown,
}

/// Tallies the host hands back when it stops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostReport {
    pub admitted: usize,
    pub rejected: usize,
    /// Most philosophers ever eating at the same time
    pub peak_eaters: usize,
    /// Every pair that was ever admitted to eat together
    pub pairs_seen: BTreeSet<(PhilosopherId, PhilosopherId)>,
    /// Who was still recorded as eating when the host stopped
    pub eating_at_shutdown: Vec<PhilosopherId>,
}

/// Actor that owns the admission set
struct HostActor {
    /// Channel for receiving requests.
    ///
    /// Actor terminates on [`HostMessage::Shutdown`] or when every sender is gone.
    receiver: mpsc::Receiver<HostMessage>,

    admissions: AdmissionSet,

    report: HostReport,
}

impl Actor for HostActor {
    type Output = HostReport;

    async fn run(mut self) -> HostReport {
        info!("Host started");

        while let Some(message) = self.receiver.recv().await {
            match message {
                HostMessage::WantToEat {
                    philosopher,
                    reply_tx,
                } => self.handle_want_to_eat(philosopher, reply_tx),
                HostMessage::FinishedEating { philosopher } => {
                    if self.admissions.release(philosopher) {
                        debug!("Philosopher {philosopher} left the eating set");
                    } else {
                        debug!("Philosopher {philosopher} finished but was not eating");
                    }
                }
                HostMessage::Snapshot { reply_tx } => {
                    if reply_tx.send(self.admissions.members()).is_err() {
                        debug!("Snapshot requester went away");
                    }
                }
                HostMessage::Shutdown => {
                    info!("Host received shutdown");
                    break;
                }
            }
        }

        self.report.eating_at_shutdown = self.admissions.members();
        info!(
            "Host stopped: {} admitted, {} rejected, peak of {} eating",
            self.report.admitted, self.report.rejected, self.report.peak_eaters
        );
        self.report
    }
}

impl HostActor {
    fn new(receiver: mpsc::Receiver<HostMessage>) -> Self {
        Self {
            receiver,
            admissions: AdmissionSet::new(),
            report: HostReport::default(),
        }
    }

    fn handle_want_to_eat(
        &mut self,
        philosopher: PhilosopherId,
        reply_tx: oneshot::Sender<Decision>,
    ) {
        let decision = self.admissions.decide(philosopher);

        match decision {
            Decision::Admitted => {
                info!("Host accepts request to eat from {philosopher}");
                self.record_admission();
            }
            Decision::Rejected(reason) => {
                info!("Host rejects request to eat from {philosopher}, reason: {reason}");
                self.report.rejected += 1;
            }
        }

        if reply_tx.send(decision).is_err() {
            warn!("Philosopher {philosopher} stopped waiting for its decision");
            // Nobody will eat, so nobody will report finishing either.
            if decision.is_admitted() {
                self.admissions.release(philosopher);
            }
        }
    }

    fn record_admission(&mut self) {
        self.report.admitted += 1;
        self.report.peak_eaters = self.report.peak_eaters.max(self.admissions.len());

        let members = self.admissions.members();
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                self.report.pairs_seen.insert((a, b));
            }
        }
    }
}

/// Handle for communicating with the host actor
#[derive(Clone)]
pub struct HostHandle {
    sender: mpsc::Sender<HostMessage>,
}

impl HostHandle {
    /// Spawn a new host actor and return a handle plus the task yielding its report
    pub fn new() -> (Self, JoinHandle<HostReport>) {
        let (sender, receiver) = mpsc::channel(HOST_QUEUE_DEPTH);
        let actor = HostActor::new(receiver);
        let task = actor.spawn();

        (Self { sender }, task)
    }

    /// Ask to eat and wait for exactly one decision
    pub async fn want_to_eat(&self, philosopher: PhilosopherId) -> Result<Decision, DinnerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let msg = HostMessage::WantToEat {
            philosopher,
            reply_tx,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|_| DinnerError::HostUnavailable(philosopher))?;

        reply_rx
            .await
            .map_err(|_| DinnerError::HostUnavailable(philosopher))
    }

    /// Tell the host we are done eating. Fire-and-forget.
    pub async fn finished_eating(&self, philosopher: PhilosopherId) -> Result<(), DinnerError> {
        self.sender
            .send(HostMessage::FinishedEating { philosopher })
            .await
            .map_err(|_| DinnerError::HostUnavailable(philosopher))
    }

    /// Who is eating right now, in seat order
    pub async fn snapshot(&self) -> Result<Vec<PhilosopherId>, DinnerError> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.sender
            .send(HostMessage::Snapshot { reply_tx })
            .await
            .map_err(|_| DinnerError::HostStopped)?;

        reply_rx.await.map_err(|_| DinnerError::HostStopped)
    }

    /// Ask the host to stop once the requests queued ahead of this one are handled
    pub async fn shutdown(&self) -> Result<(), DinnerError> {
        self.sender
            .send(HostMessage::Shutdown)
            .await
            .map_err(|_| DinnerError::HostStopped)
    }
}
