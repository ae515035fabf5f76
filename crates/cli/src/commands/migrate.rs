use anyhow::Result;
use caseintake_storage::PgStorage;

use crate::commands::get_database_url;

/// Migrations run inside `PgStorage::new`, so connecting is the whole job.
pub(crate) async fn run() -> Result<()> {
    let database_url = get_database_url()?;
    PgStorage::new(&database_url).await?;
    tracing::info!("migrations applied");
    Ok(())
}
