//! Daily morning digest broadcast.

use std::future::Future;

use teloxide::prelude::*;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, warn};

use crate::store::RecordStore;

/// Fixed digest text, sent to every known user once a day.
pub const MORNING_DIGEST: &str = "🌅 Good morning!\n\n\
    Good luck with your studies today! 🎓\n\n\
    Don't forget to check your schedule and deadlines!";

/// Daily at 07:00 UTC.
const DIGEST_CRON: &str = "0 0 7 * * *";

pub struct ReminderService {
    bot: Bot,
    store: RecordStore,
    scheduler: JobScheduler,
}

impl ReminderService {
    pub async fn new(
        bot: Bot,
        store: RecordStore,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            bot,
            store,
            scheduler,
        })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bot = self.bot.clone();
        let store = self.store.clone();

        let digest_job = Job::new_async(DIGEST_CRON, move |_uuid, _l| {
            let bot = bot.clone();
            let store = store.clone();
            Box::pin(async move {
                send_morning_digest(bot, store).await;
            })
        })?;

        self.scheduler.add(digest_job).await?;
        self.scheduler.start().await?;

        info!("Reminder service started - morning digest daily at 07:00 UTC");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    /// Manual trigger for testing
    pub async fn send_digest_now(&self) {
        send_morning_digest(self.bot.clone(), self.store.clone()).await;
    }
}

async fn send_morning_digest(bot: Bot, store: RecordStore) {
    let recipients = store.user_ids();
    info!("Sending morning digest to {} users", recipients.len());

    let delivered = broadcast(&recipients, |user_id| {
        let bot = bot.clone();
        async move {
            bot.send_message(ChatId(user_id), MORNING_DIGEST)
                .await
                .map(|_| ())
        }
    })
    .await;

    info!("Morning digest delivered to {}/{} users", delivered, recipients.len());
}

/// Sends to every recipient in order; a failed delivery is logged and
/// skipped so one blocked user never starves the rest. Returns the
/// number of successful deliveries.
pub async fn broadcast<F, Fut, E>(recipients: &[i64], send: F) -> usize
where
    F: Fn(i64) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    let mut delivered = 0;
    for &user_id in recipients {
        match send(user_id).await {
            Ok(()) => delivered += 1,
            Err(e) => warn!("Failed to deliver digest to {}: {}", user_id, e),
        }
    }
    delivered
}
