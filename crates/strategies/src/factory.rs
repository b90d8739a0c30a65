// In crates/strategies/src/factory.rs

use anyhow::Result;
use crate::ema_cross::EmaCrossUniverse;
use crate::types::EmaCrossSettings;
use crate::UniverseSelection;
use core_types::StrategyConfig;

/// Builds the universe-selection strategy named in the configuration.
pub fn create_universe_selection(
    config: &StrategyConfig,
) -> Result<Box<dyn UniverseSelection + Send>> {
    let strategy: Box<dyn UniverseSelection + Send> = match config.name.as_str() {
        "ema_cross" => {
            let settings: EmaCrossSettings = config.params.clone().try_into()?;
            Box::new(EmaCrossUniverse::new(settings)?)
        }
        unknown => anyhow::bail!("Attempted to create unknown universe selection: {}", unknown),
    };

    Ok(strategy)
}
