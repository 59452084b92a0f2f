use std::path::Path;

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Configuration for a [`crate::Grammar`].
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Simplification specific configuration.
    pub simplify: SimplifyConfig,
    /// Fixed point computation specific configuration.
    pub fixpoint: FixpointConfig,
}

/// Simplification specific configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SimplifyConfig {
    /// Maximum number of times an expression is simplified while looking
    /// for its canonical form.
    pub max_passes: usize,
    /// Canonicalize the residual expression after every derivation step
    /// while matching. When false, the expression is canonicalized only
    /// before consuming the first character and after the last one, and it
    /// can grow considerably in between.
    pub each_step: bool,
}

/// Fixed point computation specific configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FixpointConfig {
    /// Maximum number of passes done while iterating towards the fixed
    /// point of nullability and equality on recursive grammars.
    pub max_passes: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            simplify: SimplifyConfig { max_passes: 64, each_step: true },
            fixpoint: FixpointConfig { max_passes: 32 },
        }
    }
}

/// Load config file from a given path. Path must contain a valid TOML file or
/// this function will propagate the error. Settings missing in the file take
/// their default values, for example:
///
/// ```toml
/// [simplify]
/// max_passes = 16
/// ```
pub fn load_config_from_file(
    config_file: &Path,
) -> Result<Config, figment::Error> {
    let config: Config =
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file_exact(config_file))
            .extract()?;
    Ok(config)
}
