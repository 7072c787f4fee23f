use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::env;
use std::time::Duration;

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Connect the process-wide pool. Every request handler borrows a
/// connection from this pool and releases it when the query future
/// resolves, on success and failure alike.
pub async fn get_database() -> anyhow::Result<DatabaseConnection> {
    let database_url =
        env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(env_u32("DB_MAX_CONNECTIONS", 10))
        .min_connections(env_u32("DB_MIN_CONNECTIONS", 2))
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_u32_falls_back_on_default() {
        assert_eq!(env_u32("MEEPLE_TEST_UNSET_VAR", 7), 7);
    }
}
