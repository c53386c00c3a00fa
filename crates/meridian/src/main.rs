//! Meridian host binary.

use clap::Parser;
use meridian::{Command, Host, HostConfig, init_logging};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = HostConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        content_root = %config.content_root.display(),
        environment = %config.environment,
        data_dir = %config.data_dir.display(),
        "Starting Meridian host"
    );

    let host = Host::from_config(&config)?;

    match &config.command {
        Command::Binding => {
            let report = host.describe_binding();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Policy { names } => {
            let reports: Vec<_> = names.iter().map(|name| host.describe_policy(name)).collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(())
}
