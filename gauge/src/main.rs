use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use gauge::cli::Cli;
use gauge::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter())),
        )
        .init();

    let params = cli
        .runtime_params()
        .context("Failed to load node parameters")?;
    let config =
        BatteryMonitorConfig::from_params(&params).context("Invalid battery monitor configuration")?;

    tracing::info!(
        node = %config.node_name,
        min_voltage = config.bounds.min_voltage(),
        max_voltage = config.bounds.max_voltage(),
        heartbeat_limit = config.heartbeat_limit,
        "starting battery monitor"
    );

    let mut scheduler = Scheduler::new()
        .with_config(cli.scheduler_config())
        .with_name(&config.node_name);

    if cli.simulate {
        let simulator = VoltageSimulatorNode::new(&config.voltage_topic, &config.bounds, 1.0, 0.1)
            .context("Failed to create voltage simulator")?;
        scheduler.add(Box::new(simulator), 0, Some(cli.verbose));
    }

    let node_name = config.node_name.clone();
    let monitor = BatteryMonitorNode::with_config(config)
        .with_context(|| format!("Failed to create node '{}'", node_name))?;
    scheduler.add(Box::new(monitor), 1, Some(true));

    let reason = scheduler.run().context("Scheduler failed")?;
    match reason {
        StopReason::NodeRequested(node) => {
            println!("{}", format!("'{}' finished its heartbeats", node).green());
        }
        StopReason::Stopped => println!("{}", "Stopped".yellow()),
        StopReason::TimeLimit => {}
    }
    Ok(())
}
