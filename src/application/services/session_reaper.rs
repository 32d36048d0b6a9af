use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::application::ports::{ConversationRepository, RepositoryError};

/// Periodically drops chat sessions that have been idle for too long.
pub struct SessionReaper {
    repository: Arc<dyn ConversationRepository>,
    idle_timeout: Duration,
    interval: Duration,
}

impl SessionReaper {
    pub fn new(
        repository: Arc<dyn ConversationRepository>,
        idle_timeout: Duration,
        interval: Duration,
    ) -> Self {
        Self {
            repository,
            idle_timeout,
            interval,
        }
    }

    pub async fn run(self) {
        tracing::info!(
            idle_timeout_secs = self.idle_timeout.as_secs(),
            interval_secs = self.interval.as_secs(),
            "Session reaper started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if let Err(e) = self.sweep().await {
                tracing::error!(error = %e, "Session sweep failed");
            }
        }
    }

    /// Evicts every session idle for longer than the timeout.
    pub async fn sweep(&self) -> Result<usize, RepositoryError> {
        let idle = chrono::Duration::from_std(self.idle_timeout)
            .unwrap_or_else(|_| chrono::Duration::MAX);
        let cutoff = Utc::now()
            .checked_sub_signed(idle)
            .unwrap_or(chrono::DateTime::<Utc>::MIN_UTC);

        let evicted = self.repository.evict_idle(cutoff).await?;
        if evicted > 0 {
            tracing::info!(evicted, "Evicted idle chat sessions");
        }
        Ok(evicted)
    }
}
