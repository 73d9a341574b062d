use anyhow::Context;
use sy_config::SwitchyardConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SwitchyardConfig> {
    let config =
        SwitchyardConfig::load_with_dotenv().context("failed to load switchyard configuration")?;
    apply_overrides(config, flags)
}

fn apply_overrides(
    mut config: SwitchyardConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<SwitchyardConfig> {
    if let Some(db) = &flags.db {
        config.store.path.clone_from(db);
        config.validate().context("invalid --db override")?;
    }
    Ok(config)
}
