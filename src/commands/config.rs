//! Config subcommands handler

use anyhow::{Context, Result};

use automouse::Config;

/// Show the effective configuration as TOML, including the resolved
/// recording file.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", toml_str.trim_end());
    println!();
    println!("# recording file: {}", config.recording_file()?.display());
    Ok(())
}

/// Print the configuration file path.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Write the default configuration unless a file already exists.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(force: bool) -> Result<()> {
    let config_path = Config::config_path()?;
    if config_path.exists() && !force {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
        return Ok(());
    }
    Config::default().save()?;
    println!("Wrote {}", config_path.display());
    Ok(())
}
