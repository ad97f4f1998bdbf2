use std::path::Path;

use anyhow::Result;

use recycler_core::AppConfig;
use recycler_tui::available_themes;

pub fn run(config: &AppConfig, config_path: &Path, path_only: bool) -> Result<()> {
    if path_only {
        println!("{}", config_path.display());
        return Ok(());
    }

    let source = if config_path.exists() {
        config_path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", config_path.display())
    };
    println!("# Configuration: {}", source);
    println!("# Log file: {}", config.log_path().display());
    println!("# Themes: {}\n", available_themes().join(", "));
    print!("{}", config.to_toml()?);

    Ok(())
}
