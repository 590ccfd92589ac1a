//! Periodic sweeps.
//!
//! Expires conversations whose viewing request sat idle past the cutoff,
//! and keeps the bank directory fresh by enqueueing a sync job. The sync
//! itself runs on the worker; its dedup key stops the ticks from piling
//! up duplicates.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use haven::ports::{ConversationRepository, JobRepository, PropertyRepository};

use crate::application::ConversationService;
use crate::jobs::JobQueue;

/// Sweep scheduler configuration
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// How often the sweep runs.
    pub interval: Duration,
    /// Pending viewings idle longer than this are declined.
    pub max_idle: chrono::Duration,
    /// Enqueue a bank directory sync every N ticks.
    pub bank_sync_every: u32,
    pub enabled: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
            max_idle: chrono::Duration::days(7),
            bank_sync_every: 24,
            enabled: true,
        }
    }
}

pub struct SweepScheduler<C, P, J>
where
    C: ConversationRepository,
    P: PropertyRepository,
    J: JobRepository,
{
    conversations: Arc<ConversationService<C, P>>,
    queue: Arc<JobQueue<J>>,
    config: SweepConfig,
}

impl<C, P, J> SweepScheduler<C, P, J>
where
    C: ConversationRepository + 'static,
    P: PropertyRepository + 'static,
    J: JobRepository + 'static,
{
    pub fn new(
        conversations: Arc<ConversationService<C, P>>,
        queue: Arc<JobQueue<J>>,
        config: SweepConfig,
    ) -> Self {
        Self {
            conversations,
            queue,
            config,
        }
    }

    /// Start the sweep loop in the background.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            if !self.config.enabled {
                tracing::info!("📅 Sweep scheduler disabled");
                return;
            }
            tracing::info!(
                "📅 Sweep scheduler started (interval: {:?})",
                self.config.interval
            );
            self.run().await;
        })
    }

    async fn run(self) {
        let mut ticker = interval(self.config.interval);
        // Skip the first immediate tick.
        ticker.tick().await;
        let mut tick: u32 = 0;
        loop {
            ticker.tick().await;
            tick = tick.wrapping_add(1);
            self.sweep(tick).await;
        }
    }

    async fn sweep(&self, tick: u32) {
        match self.conversations.expire_stale(self.config.max_idle).await {
            Ok(0) => tracing::debug!("Sweep found no stale conversations"),
            Ok(n) => tracing::info!(expired = n, "Declined stale viewing requests"),
            Err(e) => tracing::error!(error = %e, "Stale conversation sweep failed"),
        }

        if tick % self.config.bank_sync_every == 0 {
            if let Err(e) = self.queue.sync_banks().await {
                tracing::error!(error = %e, "Could not enqueue bank sync");
            }
        }
    }
}
