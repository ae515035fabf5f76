pub(crate) mod migrate;
pub(crate) mod serve;

use anyhow::Result;

pub(crate) fn get_database_url() -> Result<String> {
    std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable must be set"))
}
