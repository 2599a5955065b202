//! Inactivity sweep.
//!
//! Every `interval` the sweeper evicts participants whose last heartbeat is at
//! least `stale_after` old and writes a departure notice for each of them.
//! Evictions are conditional on the heartbeat read at the start of the tick,
//! so a participant that checks in while a sweep is in flight stays.

use futures_util::future::join_all;
use tokio::{sync::watch, task::JoinHandle, time::{self, Instant, MissedTickBehavior}};

use crate::{clock::Clock, config::SweepConfig, db::{Message, Participant}, store::Store, AppResult};

#[derive(Debug, Clone)]
pub struct Sweeper {
    store: Store,
    clock: Clock,
    config: SweepConfig,
}

pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the loop and waits for the tick in progress, if any.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "sweeper task failed");
        }
    }
}

impl Sweeper {
    pub fn new(store: Store, clock: Clock, config: SweepConfig) -> Self {
        Self { store, clock, config }
    }

    pub fn is_stale(&self, participant: &Participant, now: i64) -> bool {
        let threshold = i64::try_from(self.config.stale_after.as_millis()).unwrap_or(i64::MAX);
        now.saturating_sub(participant.last_status) >= threshold
    }

    /// One pass at time `now`. Returns the names that were evicted.
    pub async fn sweep(&self, now: i64) -> AppResult<Vec<String>> {
        let participants = self.store.find_participants().await?;
        let time = self.clock.format_hms(now);

        let evictions = participants
            .into_iter()
            .filter(|p| self.is_stale(p, now))
            .map(|p| {
                let time = time.clone();
                async move {
                    let notice = Message::departure(&p.name, time);
                    match self.store.evict_participant(&p.name, p.last_status, &notice).await {
                        Ok(true) => Some(p.name),
                        Ok(false) => {
                            tracing::debug!(name = %p.name, "heartbeat arrived mid-sweep, keeping participant");
                            None
                        }
                        Err(e) => {
                            tracing::warn!(name = %p.name, error = %e, "failed to evict participant");
                            None
                        }
                    }
                }
            });

        let evicted: Vec<String> = join_all(evictions).await.into_iter().flatten().collect();
        for name in &evicted {
            tracing::info!(%name, "participant left after inactivity");
        }

        Ok(evicted)
    }

    /// Runs `sweep` every interval on its own task until the handle is stopped.
    /// The first tick fires one interval after spawning; a slow tick delays the
    /// next one instead of stacking them.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown, mut stopped) = watch::channel(false);
        let period = self.config.interval;

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!(
                interval_secs = period.as_secs(),
                stale_after_secs = self.config.stale_after.as_secs(),
                "sweeper started"
            );

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Err(e) = self.sweep(self.clock.now_millis()).await {
                            tracing::error!(error = %e, "sweep failed");
                        }
                    }
                    changed = stopped.changed() => {
                        if changed.is_err() || *stopped.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::info!("sweeper stopped");
        });

        SweeperHandle { shutdown, task }
    }
}
