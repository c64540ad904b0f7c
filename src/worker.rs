//! Background network tasks
//!
//! Fetch cycles and insight requests run as tokio tasks so the UI keeps drawing
//! while they are in flight. Results come back over a channel and are applied by
//! the task that owns the [`App`](crate::app::App). Dropping the worker aborts
//! everything still running.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::app::{run_fetch, run_insight, FetchOutcome, InsightOutcome, Task};
use crate::data::{InsightClient, WeatherClient};

/// Capacity of the result channel
const CHANNEL_CAPACITY: usize = 32;

/// Messages sent from background tasks to the main loop
#[derive(Debug)]
pub enum WorkerMessage {
    /// A fetch cycle finished, successfully or not
    FetchFinished(FetchOutcome),
    /// An insight request finished
    InsightFinished(InsightOutcome),
}

/// Handle owning the background tasks and their result channel
#[derive(Debug)]
pub struct Worker {
    sender: mpsc::Sender<WorkerMessage>,
    receiver: mpsc::Receiver<WorkerMessage>,
    tasks: Vec<JoinHandle<()>>,
}

impl Default for Worker {
    fn default() -> Self {
        Self::new()
    }
}

impl Worker {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            receiver,
            tasks: Vec::new(),
        }
    }

    /// Spawns the network work for `task`. Must be called inside a tokio runtime.
    pub fn dispatch(&mut self, task: Task, weather: &WeatherClient, insight: &InsightClient) {
        self.prune_finished();

        let tx = self.sender.clone();
        let handle = match task {
            Task::Fetch(ticket) => {
                debug!(seq = ticket.seq, city = %ticket.city, "Spawning fetch cycle");
                let client = weather.clone();
                tokio::spawn(async move {
                    let outcome = run_fetch(&client, ticket).await;
                    if tx.send(WorkerMessage::FetchFinished(outcome)).await.is_err() {
                        debug!("Result channel closed, dropping fetch result");
                    }
                })
            }
            Task::Insight(ticket) => {
                debug!(seq = ticket.seq, "Spawning insight request");
                let client = insight.clone();
                tokio::spawn(async move {
                    let outcome = run_insight(&client, ticket).await;
                    if tx.send(WorkerMessage::InsightFinished(outcome)).await.is_err() {
                        debug!("Result channel closed, dropping insight");
                    }
                })
            }
        };

        self.tasks.push(handle);
    }

    /// Returns a finished result without blocking, if one is pending
    pub fn try_recv(&mut self) -> Option<WorkerMessage> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next finished result
    pub async fn recv(&mut self) -> Option<WorkerMessage> {
        self.receiver.recv().await
    }

    /// Number of tasks that have not finished yet
    pub fn in_flight(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }

    /// Aborts every task still running
    pub fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    fn prune_finished(&mut self) {
        self.tasks.retain(|task| !task.is_finished());
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
