// Salon Timeline
// Command-line entry point: lay out an appointment file or follow the now marker

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value};

use salon_timeline::models::appointment::AppointmentRecord;
use salon_timeline::models::settings::TimelineSettings;
use salon_timeline::models::ui::ViewType;
use salon_timeline::services::layout::{Layout, LayoutService};
use salon_timeline::services::live_position::{LiveTracker, SystemClock};
use salon_timeline::services::settings::SettingsService;

const USAGE: &str = "\
Usage:
  salon-timeline <day|week|month> <appointments.json> [YYYY-MM-DD] [--config <path>]
  salon-timeline now [YYYY-MM-DD] [--config <path>]
  salon-timeline help";

#[derive(Debug, PartialEq)]
enum Command {
    Layout {
        view: ViewType,
        input: PathBuf,
        date: Option<NaiveDate>,
    },
    Now {
        date: Option<NaiveDate>,
    },
    Help,
}

#[derive(Debug, PartialEq)]
struct Invocation {
    command: Command,
    config: Option<PathBuf>,
}

type Payload = Map<String, Value>;

#[derive(Serialize)]
struct LayoutOutput<'a> {
    layout: Layout<'a, Payload>,
    rejected: Vec<RejectedOutput>,
}

#[derive(Serialize)]
struct RejectedOutput {
    id: String,
    error: String,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();

    let invocation = match parse_args(&arg_refs) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("salon-timeline: {}\n\n{}", e, USAGE);
            process::exit(2);
        }
    };

    if let Err(e) = run(invocation).await {
        eprintln!("salon-timeline: {:#}", e);
        process::exit(1);
    }
}

async fn run(invocation: Invocation) -> Result<()> {
    if invocation.command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let settings = load_settings(invocation.config)?;
    let today = Local::now().date_naive();

    match invocation.command {
        Command::Layout { view, input, date } => {
            let output = layout_file(settings, view, &input, date.unwrap_or(today))?;
            println!("{}", output);
        }
        Command::Now { date } => follow_now_marker(settings, date.unwrap_or(today)).await?,
        Command::Help => {}
    }

    Ok(())
}

fn load_settings(config: Option<PathBuf>) -> Result<TimelineSettings> {
    let service = match config {
        Some(path) => SettingsService::new(path),
        None => match SettingsService::from_default_location() {
            Some(service) => service,
            None => {
                log::warn!("No config directory available, using default settings");
                return Ok(TimelineSettings::default());
            }
        },
    };
    service.get()
}

fn layout_file(
    settings: TimelineSettings,
    view: ViewType,
    input: &Path,
    date: NaiveDate,
) -> Result<String> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read appointments from {}", input.display()))?;
    let records: Vec<AppointmentRecord<Payload>> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse appointments in {}", input.display()))?;

    log::info!(
        "Laying out {} appointment(s) from {} for the {} of {}",
        records.len(),
        input.display(),
        view,
        date
    );

    let service = LayoutService::new(settings);
    let batch = service.build_intervals(records);
    let layout = service.layout(view, &batch.intervals, date);

    let output = LayoutOutput {
        layout,
        rejected: batch
            .rejected
            .iter()
            .map(|r| RejectedOutput {
                id: r.id.clone(),
                error: r.error.to_string(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&output).context("Failed to serialize layout")
}

async fn follow_now_marker(settings: TimelineSettings, date: NaiveDate) -> Result<()> {
    let tracker = LiveTracker::new(&settings, date, SystemClock);

    let Some(handle) = tracker.start(|marker| match serde_json::to_string(&marker) {
        Ok(line) => println!("{}", line),
        Err(e) => log::error!("Failed to serialize now marker: {}", e),
    }) else {
        println!("{}", serde_json::to_string(&tracker.marker())?);
        return Ok(());
    };

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    handle.stop();
    Ok(())
}

fn parse_args(args: &[&str]) -> Result<Invocation, String> {
    let mut config = None;
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--config" => {
                let path = iter.next().ok_or("--config needs a path")?;
                config = Some(PathBuf::from(*path));
            }
            other if other.starts_with("--") => return Err(format!("Unknown option '{}'", other)),
            other => positional.push(other),
        }
    }

    let Some((&name, rest)) = positional.split_first() else {
        return Err("No command specified".to_string());
    };

    let command = match name {
        "help" => Command::Help,
        "now" => match rest {
            [] => Command::Now { date: None },
            [date] => Command::Now {
                date: Some(parse_date(date)?),
            },
            _ => return Err("'now' takes at most one date".to_string()),
        },
        view => {
            let view: ViewType = view.parse()?;
            match rest {
                [input] => Command::Layout {
                    view,
                    input: PathBuf::from(*input),
                    date: None,
                },
                [input, date] => Command::Layout {
                    view,
                    input: PathBuf::from(*input),
                    date: Some(parse_date(date)?),
                },
                _ => return Err(format!("'{}' takes an appointments file and an optional date", view)),
            }
        }
    };

    Ok(Invocation { command, config })
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", value, e))
}
