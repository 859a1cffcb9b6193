use std::sync::Arc;

use chrono::Utc;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::cache::TimedCache;
use crate::config::{parse_lead_time, Config};
use crate::error::CycleError;
use crate::model::{Event, User};
use crate::notify::Notifier;
use crate::reminder::due_reminders;
use crate::source::Source;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub due: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Fetches both collections, evaluates them and hands due pairs to the
/// notifier. Cycles never overlap.
pub struct Reconciler {
    events: Source<Event>,
    users: Source<User>,
    reminder_before: String,
    notifier: Arc<dyn Notifier>,
}

impl Reconciler {
    pub fn new(
        events: Source<Event>,
        users: Source<User>,
        reminder_before: impl Into<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            events,
            users,
            reminder_before: reminder_before.into(),
            notifier,
        }
    }

    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()?;

        Ok(Self::new(
            Source::events(
                &config.events_url,
                client.clone(),
                TimedCache::new(config.cache_config()),
            ),
            Source::users(
                &config.users_url,
                client,
                TimedCache::new(config.cache_config()),
            ),
            &config.reminder_before,
            notifier,
        ))
    }

    /// Runs one cycle. Fetching stops at the first failing source, so an
    /// events failure never reaches the users endpoint.
    pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        let events = self.events.fetch().await?;
        let users = self.users.fetch().await?;
        let lead_time = parse_lead_time(&self.reminder_before)?;

        let due = due_reminders(&events, &users, lead_time, Utc::now());
        let mut report = CycleReport {
            due: due.len(),
            ..Default::default()
        };

        for (user, event) in due {
            match self.notifier.notify(user, event) {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    report.failed += 1;
                    warn!(
                        user = user.id,
                        event = event.id,
                        %err,
                        "failed to deliver reminder"
                    );
                }
            }
        }

        Ok(report)
    }

    /// Runs a cycle every `period`, first one `period` after the call.
    ///
    /// A cycle that overruns delays the next tick instead of stacking a
    /// second cycle on top of it.
    pub async fn run(self, period: Duration) {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            info!("starting reminder cycle");

            match self.run_cycle().await {
                Ok(report) => info!(
                    due = report.due,
                    delivered = report.delivered,
                    failed = report.failed,
                    "reminder cycle finished"
                ),
                Err(err) => error!(%err, "reminder cycle aborted"),
            }
        }
    }
}
