//! `seed` command: copy the YAML store catalog into Postgres.

use storeloc_core::AppConfig;

/// Upsert every catalog store into the `stores` table.
///
/// Migrations are applied first. A store that fails to write is logged and
/// skipped so one bad row does not abort the whole seed.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, `DATABASE_URL` is unset,
/// or the database cannot be reached or migrated.
pub(crate) async fn run_seed(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let catalog = storeloc_core::load_store_catalog(&config.stores_path)?;

    if dry_run {
        println!(
            "dry-run: would seed {} stores from {}",
            catalog.stores.len(),
            config.stores_path.display()
        );
        return Ok(());
    }

    let pool = storeloc_db::connect_pool_from_config(config).await?;
    storeloc_db::run_migrations(&pool).await?;

    let mut inserted = 0_usize;
    let mut updated = 0_usize;
    let mut failed = 0_usize;
    for store in &catalog.stores {
        match storeloc_db::upsert_store(&pool, store).await {
            Ok(true) => inserted += 1,
            Ok(false) => updated += 1,
            Err(error) => {
                failed += 1;
                tracing::warn!(store_id = %store.id, error = %error, "failed to seed store");
            }
        }
    }

    let total = storeloc_db::count_stores(&pool).await?;
    println!("seeded stores: {inserted} new, {updated} updated, {failed} failed ({total} total)");
    Ok(())
}
