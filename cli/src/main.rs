mod catalog;
mod session;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use tracing::{Level, info};
use trips::config::{ComposerConfig, ConfigError};
use trips::drag::SessionMode;
use trips::engine::{Composer, SubmitError};
use trips::form::{FormError, FormField, FormState, MemoryForm};

use crate::catalog::Catalog;
use crate::session::ReplayError;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("--trip-id is required in edit mode")]
    MissingTripId,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

#[derive(Parser, Debug)]
#[command(name = "dispatch", about = "Trip composition session tools")]
struct Cli {
    /// Log engine decisions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded JSONL session and print the outcome.
    Replay(ReplayArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Create,
    Edit,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PrintArg {
    View,
    Labels,
    Submission,
    Actions,
    Form,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(long, default_value = "-", help = "Input file path, or - for stdin")]
    input: String,

    #[arg(long, value_enum, default_value_t = ModeArg::Create)]
    mode: ModeArg,

    #[arg(long, help = "Trip being edited; required with --mode edit")]
    trip_id: Option<u64>,

    #[arg(long, help = "Human-facing trip number shown in the title")]
    external_number: Option<u64>,

    #[arg(long, help = "JSON object with driverWithAssets and loads fields")]
    form: Option<String>,

    #[arg(long, env = "TRIPS_CATALOG", help = "JSON message catalog used for labels")]
    catalog: Option<String>,

    #[arg(long, value_enum, default_value_t = PrintArg::View)]
    print: PrintArg,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Replay(args) => run_replay(&args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt().with_writer(io::stderr).with_max_level(level).with_target(false).init();
}

fn run_replay(args: &ReplayArgs) -> Result<(), CliError> {
    let config = ComposerConfig::from_env()?;
    let mode = match args.mode {
        ModeArg::Create => SessionMode::Create,
        ModeArg::Edit => {
            let trip_id = args.trip_id.ok_or(CliError::MissingTripId)?;
            SessionMode::Edit { trip_id, external_number: args.external_number }
        }
    };

    let form = match &args.form {
        Some(path) => load_form(path)?,
        None => MemoryForm::default(),
    };
    let mut composer = Composer::from_form(config, mode, &form)?;

    let actions = session::replay(&mut composer, open_input(&args.input)?)?;
    info!(actions = actions.len(), "session replayed");

    match args.print {
        PrintArg::View => print_json(&composer.view()),
        PrintArg::Actions => print_json(&actions),
        PrintArg::Submission => print_json(&composer.submit()?),
        PrintArg::Labels => {
            let catalog = match &args.catalog {
                Some(path) => Catalog::from_json(&read_file(path)?)?,
                None => Catalog::default(),
            };
            print_json(&composer.labels(&catalog))
        }
        PrintArg::Form => {
            let mut out = MemoryForm::default();
            composer.write_form(&mut out)?;
            let fields: serde_json::Map<String, Value> = [FormField::DriverWithAssets, FormField::Loads]
                .into_iter()
                .filter_map(|field| out.get(field).map(|value| (field.name().to_owned(), value)))
                .collect();
            print_json(&fields)
        }
    }
}

fn open_input(path: &str) -> Result<Box<dyn BufRead>, CliError> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|source| CliError::Open { path: path.to_owned(), source })?;
    Ok(Box::new(BufReader::new(file)))
}

fn read_file(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Open { path: path.to_owned(), source })
}

fn load_form(path: &str) -> Result<MemoryForm, CliError> {
    let raw: serde_json::Map<String, Value> = serde_json::from_str(&read_file(path)?)?;
    let mut form = MemoryForm::default();
    for field in [FormField::DriverWithAssets, FormField::Loads] {
        if let Some(value) = raw.get(field.name()) {
            form.set(field, value.clone());
        }
    }
    Ok(form)
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
