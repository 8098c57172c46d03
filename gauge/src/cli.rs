//! Command line surface of the `battery_monitor` binary

use clap::Parser;
use gauge_core::error::GaugeResult;
use gauge_core::params::RuntimeParams;
use gauge_core::scheduling::SchedulerConfig;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "battery_monitor")]
#[command(about = "Publish a heartbeat and convert battery voltage into a charge percentage")]
#[command(version)]
pub struct Cli {
    /// YAML file with node parameters (min_voltage, max_voltage, node_name, ...)
    #[arg(short, long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Node name; also names the heartbeat topic and payload
    #[arg(short, long)]
    pub name: Option<String>,

    /// Voltage read as 0%
    #[arg(long, allow_negative_numbers = true)]
    pub min_voltage: Option<f32>,

    /// Voltage read as 100%
    #[arg(long, allow_negative_numbers = true)]
    pub max_voltage: Option<f32>,

    /// Heartbeats before the node shuts down (0 = run until Ctrl+C)
    #[arg(long)]
    pub heartbeat_limit: Option<u64>,

    /// Scheduler tick rate in Hz
    #[arg(short, long, default_value_t = 100.0)]
    pub rate: f64,

    /// Feed the gauge from a built-in voltage sweep instead of an external publisher
    #[arg(long)]
    pub simulate: bool,

    /// Enable debug logging, including every published and received message
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parameters from the params file, with command line values on top
    pub fn runtime_params(&self) -> GaugeResult<RuntimeParams> {
        let params = match &self.params {
            Some(path) => RuntimeParams::from_yaml_file(path)?,
            None => RuntimeParams::new(),
        };

        if let Some(name) = &self.name {
            params.set("node_name", name)?;
        }
        if let Some(min) = self.min_voltage {
            params.set("min_voltage", min)?;
        }
        if let Some(max) = self.max_voltage {
            params.set("max_voltage", max)?;
        }
        if let Some(limit) = self.heartbeat_limit {
            params.set("heartbeat_limit", limit)?;
        }
        Ok(params)
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig::standard().with_rate(self.rate)
    }

    /// Filter directive used when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
