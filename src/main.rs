mod action;
mod event;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use serde::Serialize;

use action::{Action, HELP_ENTRIES};
use event::{Event, EventHandler};
use hudmon::MonitorCore;
use hudmon::config::{self, Config, load_config, load_config_from_path};
use hudmon::format::{format_hardware, format_weather, sparkline};
use hudmon::system::process::ProcessRecord;
use hudmon::system::snapshot::HardwareSnapshot;
use hudmon::weather::WeatherReading;

const SPARKLINE_WIDTH: usize = 60;

#[derive(Parser)]
#[command(
    name = "hudmon",
    about = "Headless hardware/process monitor with a background weather feed"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Number of CPU samples kept in history
    #[arg(long)]
    history: Option<usize>,

    /// Exit after this many ticks (0 runs until interrupted)
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Print processes whose name or PID contains this text on every tick
    #[arg(long)]
    filter: Option<String>,

    /// Request a weather refresh at startup
    #[arg(long, default_value_t = false)]
    weather: bool,

    /// Emit one JSON object per tick instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Do not read commands from stdin
    #[arg(long, default_value_t = false)]
    no_input: bool,

    /// Log as JSON lines on stderr
    #[arg(long, default_value_t = false)]
    log_json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Frame<'a> {
    tick: u64,
    hardware: HardwareSnapshot,
    cpu_history_len: usize,
    process_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    processes: Option<Vec<ProcessRecord>>,
    location: &'a str,
    weather_loading: bool,
    weather: Option<WeatherReading>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(&cli)?;
    let config = load_config_for_cli(&cli);

    let monitor = MonitorCore::new(&config)?;
    if cli.weather {
        monitor.request_weather_refresh();
    }

    run(&monitor, &config, &cli).await
}

async fn run(monitor: &MonitorCore, config: &Config, cli: &Cli) -> Result<()> {
    let tick_rate = Duration::from_millis(config.general.refresh_rate_ms.max(1));
    let location = config.weather.location_label.as_str();
    let mut events = EventHandler::new(tick_rate, !cli.no_input);
    let mut ticks = 0u64;

    while let Some(event) = events.next().await {
        match event {
            Event::Tick => {
                monitor.update();
                ticks += 1;
                if cli.json {
                    print_frame(monitor, ticks, location, cli.filter.as_deref())?;
                } else {
                    print_status(monitor, location);
                    if let Some(filter) = &cli.filter {
                        print_processes(monitor, filter);
                    }
                }
                if cli.ticks > 0 && ticks >= cli.ticks {
                    break;
                }
            }
            Event::Input(action) => {
                if !handle_action(monitor, action, location) {
                    break;
                }
            }
            Event::Interrupt => break,
        }
    }

    Ok(())
}

/// Returns `false` when the driver should exit.
fn handle_action(monitor: &MonitorCore, action: Action, location: &str) -> bool {
    match action {
        Action::Quit => return false,
        Action::Filter(filter) => print_processes(monitor, &filter),
        Action::Terminate(pid) => println!("{}", monitor.terminate_process(pid)),
        Action::RefreshWeather => {
            if monitor.request_weather_refresh() {
                println!("Weather refresh requested");
            } else {
                println!("Weather refresh already in progress");
            }
        }
        Action::ShowHistory => {
            let history = monitor.cpu_history();
            println!(
                "CPU history ({}/{}): {}",
                history.len(),
                monitor.history_capacity(),
                sparkline(&history, SPARKLINE_WIDTH)
            );
        }
        Action::ShowStats => print_status(monitor, location),
        Action::Help => {
            for (command, description) in HELP_ENTRIES {
                println!("  {command:<16} {description}");
            }
        }
        Action::Invalid(msg) => eprintln!("{msg}"),
        Action::None => {}
    }
    true
}

fn print_status(monitor: &MonitorCore, location: &str) {
    let weather = monitor.weather();
    println!(
        "{} | {} procs | {}",
        format_hardware(&monitor.hardware_stats()),
        monitor.process_count(),
        format_weather(location, weather.as_ref(), monitor.is_weather_loading())
    );
}

fn print_processes(monitor: &MonitorCore, filter: &str) {
    let matches = monitor.processes(filter);
    println!("{} processes match `{filter}`", matches.len());
    for p in &matches {
        println!("  {:>8}  {}", p.pid, p.name);
    }
}

fn print_frame(monitor: &MonitorCore, tick: u64, location: &str, filter: Option<&str>) -> Result<()> {
    let frame = Frame {
        tick,
        hardware: monitor.hardware_stats(),
        cpu_history_len: monitor.cpu_history().len(),
        process_count: monitor.process_count(),
        processes: filter.map(|f| monitor.processes(f)),
        location,
        weather_loading: monitor.is_weather_loading(),
        weather: monitor.weather(),
    };
    println!("{}", serde_json::to_string(&frame)?);
    Ok(())
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr);
    let result = if cli.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(capacity) = cli.history {
        config.general.history_capacity = capacity;
    }

    config
}
