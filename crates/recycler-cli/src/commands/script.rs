use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing::info;

use recycler_core::{script::Script, AppConfig, LayoutConfig, Scroller};

pub async fn run(config: &AppConfig, file: Option<&Path>, pretty: bool) -> Result<()> {
    let source = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let mut source = String::new();
            tokio::io::stdin()
                .read_to_string(&mut source)
                .await
                .context("Failed to read script from stdin")?;
            source
        }
    };

    let script = Script::parse(&source)?;
    let layout = LayoutConfig::from_settings(&config.layout)?;
    let mut scroller = Scroller::new(layout, config.scroll.clone(), config.seed_items())?;

    // Simulated frame length matches the TUI animation rate
    let frame = Duration::from_secs_f64(1.0 / f64::from(config.scroll.animation_fps.max(1)));

    info!(steps = script.len(), items = scroller.len(), "running script");
    let report = script.run(&mut scroller, frame)?;

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}
