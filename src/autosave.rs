#![cfg(feature = "cli")]

//! Debounced background saving.
//!
//! Front ends hand every new match state to the [`Autosaver`]; it writes the
//! latest one to the store once updates have been quiet for the configured
//! delay, and writes anything still pending when it shuts down.

use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};

use crate::core::Match;
use crate::storage::MatchStore;

/// Idle time before a pending state is written.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_secs(1);

pub struct Autosaver {
    tx: mpsc::UnboundedSender<Match>,
    task: JoinHandle<(MatchStore, usize)>,
}

impl Autosaver {
    /// Take ownership of `store` and start the saving task on the current runtime.
    pub fn spawn(store: MatchStore, delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(store, rx, delay));
        Self { tx, task }
    }

    /// Queue `m` for saving. Replaces any state that has not been written yet.
    pub fn submit(&self, m: &Match) {
        if self.tx.send(m.clone()).is_err() {
            warn!("autosave task has stopped; match {} not queued", m.id);
        }
    }

    /// Flush what is pending and hand back the store with the number of
    /// writes made.
    pub async fn shutdown(self) -> anyhow::Result<(MatchStore, usize)> {
        drop(self.tx);
        Ok(self.task.await?)
    }
}

async fn run(
    mut store: MatchStore,
    mut rx: mpsc::UnboundedReceiver<Match>,
    delay: Duration,
) -> (MatchStore, usize) {
    let mut pending: Option<Match> = None;
    let mut writes = 0;
    loop {
        tokio::select! {
            msg = rx.recv() => match msg {
                Some(m) => pending = Some(m),
                None => break,
            },
            _ = time::sleep(delay), if pending.is_some() => {
                if let Some(m) = pending.take() {
                    writes += save(&mut store, &m);
                }
            }
        }
    }
    if let Some(m) = pending.take() {
        writes += save(&mut store, &m);
    }
    (store, writes)
}

fn save(store: &mut MatchStore, m: &Match) -> usize {
    match store.save(m) {
        Ok(id) => {
            debug!("autosaved match {}", id);
            1
        }
        Err(e) => {
            warn!("autosave of match {} failed: {:#}", m.id, e);
            0
        }
    }
}
