//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! Currently a single maintenance task: purging expired pending passcodes.
//! Expiry is enforced at verification regardless, so this only bounds memory
//! held by codes that are never submitted. Records are kept for `grace`
//! past expiry so late submissions still report expiry.

use anyhow::Result;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::debug;

use crate::domains::auth::OtpStore;

/// Start all scheduled tasks. The returned scheduler must be kept alive.
pub async fn start_scheduler(
    otp_store: OtpStore,
    sweep_every: Duration,
    grace: chrono::Duration,
) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let sweep_job = Job::new_repeated_async(sweep_every, move |_uuid, _lock| {
        let otp_store = otp_store.clone();
        Box::pin(async move {
            let purged = otp_store.purge_expired(chrono::Utc::now(), grace).await;
            if purged > 0 {
                debug!(purged, "Purged expired OTPs");
            }
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    Ok(scheduler)
}
