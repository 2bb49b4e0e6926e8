use anyhow::{Context, Result};
use cascade_metadata_cli::{monitoring_config, run, CliConfig};
use cascade_monitoring::LogExt;

fn main() -> Result<()> {
    // Set up logging first so configuration warnings are not lost
    let monitoring = monitoring_config(|key| std::env::var(key).ok());
    cascade_monitoring::init(&monitoring).context("Failed to initialize monitoring")?;

    // Load configuration from environment variables
    let config = CliConfig::load()
        .log_err("Invalid configuration")
        .context("Failed to load configuration")?;

    let json = run(&config)
        .log_err("Step metadata request failed")
        .log_ok("Rendered step metadata catalog")?;
    println!("{}", json);

    cascade_monitoring::shutdown();
    Ok(())
}
