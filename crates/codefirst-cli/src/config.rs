use anyhow::{Context, Result};
use codefirst::Config;
use std::path::Path;

/// Config file read when `--config` is not given, if it exists.
const DEFAULT_CONFIG_FILE: &str = "codefirst.toml";

/// Loads the run configuration.
///
/// An explicit path must exist. Without one, `codefirst.toml` in the current
/// directory is read when present; otherwise defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Path::new(DEFAULT_CONFIG_FILE),
        None => return Ok(Config::default()),
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file `{}`", path.display()))?;

    parse_config(&contents).with_context(|| format!("parsing config file `{}`", path.display()))
}

fn parse_config(contents: &str) -> Result<Config> {
    Ok(toml::from_str(contents)?)
}
