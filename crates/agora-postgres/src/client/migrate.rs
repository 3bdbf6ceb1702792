//! Database migration management.
//!
//! Migrations are embedded into the binary at compile time and applied on
//! startup. The harness is synchronous, so migration work runs on a blocking
//! task over a wrapped async connection.

use diesel::migration::MigrationSource;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Migration status information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// List of applied migration versions in chronological order
    pub applied_versions: Vec<String>,
    /// List of pending migration versions
    pub pending_versions: Vec<String>,
}

impl MigrationStatus {
    /// Returns whether every known migration has been applied.
    pub fn is_up_to_date(&self) -> bool {
        self.pending_versions.is_empty()
    }

    /// Returns the number of applied migrations.
    pub fn applied_migrations(&self) -> usize {
        self.applied_versions.len()
    }

    /// Returns the number of pending migrations.
    pub fn pending_migrations(&self) -> usize {
        self.pending_versions.len()
    }
}

impl PgClient {
    /// Runs all pending migrations on the database.
    ///
    /// Safe to call repeatedly; an up-to-date schema is a no-op.
    ///
    /// # Returns
    ///
    /// The list of migration versions applied by this call.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_MIGRATION)]
    pub async fn run_pending_migrations(&self) -> PgResult<Vec<String>> {
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            "Starting database migration process",
        );

        let conn = self.get_connection().await?;
        let mut conn: AsyncConnectionWrapper<_> = conn.into();

        let versions = spawn_blocking(move || {
            conn.run_pending_migrations(MIGRATIONS)
                .map(|versions| versions.iter().map(ToString::to_string).collect::<Vec<_>>())
        })
        .await
        .map_err(|join_error| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                error = %join_error,
                "Migration task panicked"
            );
            PgError::Migration(join_error.into())
        })?
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                error = &err,
                "Database migration process failed"
            );
            PgError::Migration(err)
        })?;

        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            migrations_count = versions.len(),
            "Database migration process completed successfully"
        );

        Ok(versions)
    }

    /// Returns the applied and pending migration versions.
    pub async fn migration_status(&self) -> PgResult<MigrationStatus> {
        let known: Vec<String> = MigrationSource::<diesel::pg::Pg>::migrations(&MIGRATIONS)
            .map_err(PgError::Migration)?
            .iter()
            .map(|migration| migration.name().to_string())
            .collect();

        let conn = self.get_connection().await?;
        let mut conn: AsyncConnectionWrapper<_> = conn.into();

        let applied: Vec<String> = spawn_blocking(move || {
            conn.applied_migrations()
                .map(|versions| versions.iter().map(ToString::to_string).collect::<Vec<_>>())
        })
        .await
        .map_err(|join_error| PgError::Migration(join_error.into()))?
        .map_err(PgError::Migration)?;

        let pending = known
            .into_iter()
            .filter(|name| !applied.iter().any(|version| name.starts_with(version)))
            .collect();

        Ok(MigrationStatus {
            applied_versions: applied,
            pending_versions: pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_counts() {
        let status = MigrationStatus {
            applied_versions: vec!["2026-01-01-000000".into()],
            pending_versions: vec!["2026-02-01-000000".into()],
        };

        assert!(!status.is_up_to_date());
        assert_eq!(status.applied_migrations(), 1);
        assert_eq!(status.pending_migrations(), 1);
    }
}
