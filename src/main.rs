//! `setlist-midi` - export a service plan's songs as a MIDI setlist.
//!
//! Usage: setlist-midi [--scheduled | --date YYYY-MM-DD] [--output PATH]
//!
//! Without a mode flag the user is asked which plan to use.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use setlist_midi::config::Config;
use setlist_midi::error::Result;
use setlist_midi::input::{selection_for, Mode};
use setlist_midi::planning_center::PlanningCenterClient;
use setlist_midi::setlist::{self, format_song_line, Outcome};

/// Values taken from the command line
#[derive(Debug, Default)]
struct Args {
    mode: Option<Mode>,
    date: Option<String>,
    output: Option<PathBuf>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let value_after = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .cloned()
    };

    let date = value_after("--date");
    let mode = if date.is_some() {
        Some(Mode::Date)
    } else if args.iter().any(|a| a == "--scheduled") {
        Some(Mode::Scheduled)
    } else {
        None
    };

    Args { mode, date, output: value_after("--output").map(PathBuf::from) }
}

fn prompt(question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn ask_mode() -> Result<Mode> {
    println!("\nChoose mode:");
    println!("1 - Next plan I am scheduled for");
    println!("2 - Pick a specific Sunday date");
    Ok(Mode::parse(&prompt("\nEnter 1 or 2: ")?))
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(output) = args.output {
        config.output_path = output;
    }
    config.validate()?;

    println!("\n--- {} -> MIDI setlist ---", config.target_service_type_name);

    let mode = match args.mode {
        Some(mode) => mode,
        None => ask_mode()?,
    };
    let date = match (mode, args.date) {
        (Mode::Date, None) => Some(prompt("Enter Sunday date (YYYY-MM-DD, blank for this Sunday): ")?),
        (_, date) => date,
    };

    let today = chrono::Local::now().date_naive();
    let selection = selection_for(mode, date.as_deref(), today)?;

    let client = PlanningCenterClient::new(&config);
    match setlist::run(&client, &config, selection).await? {
        Outcome::NoPlan { service_type } => {
            println!("\nNo {} plan found.", service_type.name);
        }
        Outcome::NoSongs { plan } => {
            println!("\nNo songs found in {}.", plan.display_title());
        }
        Outcome::Written { plan, songs, path } => {
            println!("\nSelected plan: {} - {}", plan.display_title(), plan.dates);
            println!("\nSongs in this set:\n");
            for (i, song) in songs.iter().enumerate() {
                println!("{}", format_song_line(i + 1, song));
            }
            println!("\nMIDI file created: {}", path.display());
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    {
        use tracing_subscriber::prelude::*;

        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }

    match run(parse_args()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(hint) = e.hint().filter(|h| !e.to_string().contains(h)) {
                eprintln!("Hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}
