use anyhow::Context;
use sy_config::SwitchyardConfig;
use sy_store::Store;

use crate::cli::{Commands, GlobalFlags};

pub mod build;
pub mod graph;
pub mod metrics;
pub mod party;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: &Commands,
    config: &SwitchyardConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Build => build::handle(config, flags),
        Commands::Graph(args) => graph::handle(args, config, flags),
        Commands::Party(args) => party::handle(args, config, flags),
        Commands::Metrics(args) => metrics::handle(args, config, flags),
    }
}

fn open_store(config: &SwitchyardConfig) -> anyhow::Result<Store> {
    config.validate().context("invalid switchyard configuration")?;
    tracing::debug!(path = %config.store.path, "opening store");
    Store::open(&config.store)
        .with_context(|| format!("failed to open store at {}", config.store.path))
}

#[cfg(test)]
pub(crate) mod test_support {
    use sy_config::SwitchyardConfig;
    use sy_store::Store;
    use tempfile::TempDir;

    /// A file-backed store holding two candidates' input records.
    pub fn seeded_config() -> (TempDir, SwitchyardConfig) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SwitchyardConfig::default();
        config.store.path = dir.path().join("network.duckdb").display().to_string();

        let store = Store::open(&config.store).unwrap();
        store
            .conn()
            .execute_batch(
                r#"
                INSERT INTO "current" VALUES ('X', 'B'), ('Y', 'MOVIMIENTO REGIONAL AYLLU');
                INSERT INTO party_record VALUES ('X', 'A', 1995, 2010), ('X', 'B', 2010, 2019);
                INSERT INTO position_record VALUES ('Y', 'ALIANZA ELECTORAL A', 2002, 2006);
                INSERT INTO resign_record VALUES ('Y', 'A', 2007);
                "#,
            )
            .unwrap();
        (dir, config)
    }
}
