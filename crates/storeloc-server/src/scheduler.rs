//! Background job scheduler.
//!
//! Registers the periodic sweep that drops expired entries from the geocode
//! and search caches. Reads already evict lazily; the sweep only reclaims
//! memory held by entries nobody asks for again.

use std::sync::Arc;

use storeloc_search::SearchOrchestrator;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process. Dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// `sweep_cron` is not a valid schedule, or the scheduler fails to start.
pub async fn build_scheduler(
    engine: Arc<SearchOrchestrator>,
    sweep_cron: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    register_cache_sweep_job(&scheduler, engine, sweep_cron).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_cache_sweep_job(
    scheduler: &JobScheduler,
    engine: Arc<SearchOrchestrator>,
    sweep_cron: &str,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(sweep_cron, move |_uuid, _lock| {
        let engine = Arc::clone(&engine);

        Box::pin(async move {
            let purged = engine.purge_expired();
            let stats = engine.cache_stats();
            tracing::info!(
                purged,
                geocode_size = stats.geocode_cache.size,
                search_size = stats.search_cache.size,
                "scheduler: cache sweep complete"
            );
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(schedule = sweep_cron, "scheduler: registered cache sweep");
    Ok(())
}
