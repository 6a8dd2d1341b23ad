//! First-boot seeding of the warning levels.

use pipesense_core::warning_levels::DEFAULT_WARNING_LEVELS;

use crate::models::warning::CreateWarning;
use crate::repositories::WarningRepo;
use crate::DbResult;

/// Insert the default warning levels if the collection is empty.
///
/// Count-then-insert: two instances booting against the same empty database
/// at the same moment can both seed. Deployments run a single instance.
///
/// Returns the number of levels inserted (zero if any already existed).
pub async fn seed_default_warnings(repo: &dyn WarningRepo) -> DbResult<usize> {
    if repo.count().await? > 0 {
        tracing::debug!("Warning levels already present, skipping seed");
        return Ok(0);
    }

    let defaults: Vec<CreateWarning> = DEFAULT_WARNING_LEVELS
        .iter()
        .map(|&(level, name)| CreateWarning {
            level,
            name: name.to_string(),
        })
        .collect();

    let inserted = repo.insert_many(&defaults).await?;
    tracing::info!(count = inserted.len(), "Seeded default warning levels");
    Ok(inserted.len())
}
