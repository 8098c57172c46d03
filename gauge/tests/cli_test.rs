use clap::Parser;
use gauge::cli::Cli;
use gauge::prelude::*;
use std::io::Write;

fn params_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_params_file_drives_config() {
    let file = params_file("node_name: pack_b\nmin_voltage: 20.0\nmax_voltage: 25.0\n");
    let path = file.path().to_str().unwrap().to_string();

    let cli = Cli::parse_from(["battery_monitor", "--params", path.as_str()]);
    let config = BatteryMonitorConfig::from_params(&cli.runtime_params().unwrap()).unwrap();

    assert_eq!(config.node_name, "pack_b");
    assert_eq!(config.bounds.min_voltage(), 20.0);
    assert_eq!(config.bounds.max_voltage(), 25.0);
}

#[test]
fn test_command_line_wins_over_params_file() {
    let file = params_file("min_voltage: 20.0\nmax_voltage: 25.0\nheartbeat_limit: 5\n");
    let path = file.path().to_str().unwrap().to_string();

    let cli = Cli::parse_from([
        "battery_monitor",
        "--params",
        path.as_str(),
        "--max-voltage",
        "30",
        "--heartbeat-limit",
        "2",
    ]);
    let config = BatteryMonitorConfig::from_params(&cli.runtime_params().unwrap()).unwrap();

    assert_eq!(config.bounds.min_voltage(), 20.0);
    assert_eq!(config.bounds.max_voltage(), 30.0);
    assert_eq!(config.heartbeat_limit, 2);
}

#[test]
fn test_inverted_bounds_are_rejected() {
    let cli = Cli::parse_from([
        "battery_monitor",
        "--min-voltage",
        "42",
        "--max-voltage",
        "36",
    ]);
    let result = BatteryMonitorConfig::from_params(&cli.runtime_params().unwrap());
    assert!(matches!(result, Err(GaugeError::InvalidBounds { .. })));
}

#[test]
fn test_missing_params_file_is_an_error() {
    let cli = Cli::parse_from(["battery_monitor", "--params", "/nonexistent/gauge_params.yaml"]);
    assert!(cli.runtime_params().is_err());
}

#[test]
fn test_rate_flows_into_scheduler_config() {
    let cli = Cli::parse_from(["battery_monitor", "--rate", "50"]);
    let config = cli.scheduler_config();
    assert_eq!(config.global_rate_hz, 50.0);
    assert!(config.validate().is_ok());
}
