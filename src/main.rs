use crate::config::Config;
use crate::error::Error;
use crate::model::{Collection, Record, RecordUpdate};
use crate::store::Store;
use clap::{Parser, Subcommand};
use eyre::WrapErr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

mod checks;
mod config;
mod display;
mod error;
mod model;
mod store;

const DEFAULT_CONFIG: &str = "rmarks.toml";

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Use FILE instead of rmarks.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Use FILE as marks file instead of probing the configured candidates
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,
    /// Set verbosity level
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// View all records
    List,
    /// View an individual student, by identifier or name
    Show { query: String },
    /// Show the student with the highest overall mark
    Highest,
    /// Show the student with the lowest overall mark
    Lowest,
    /// Show records sorted by overall mark
    Sort {
        #[arg(long)]
        descending: bool,
    },
    /// Add a record
    Add {
        id: String,
        name: String,
        #[arg(allow_negative_numbers = true)]
        cw1: i64,
        #[arg(allow_negative_numbers = true)]
        cw2: i64,
        #[arg(allow_negative_numbers = true)]
        cw3: i64,
        #[arg(allow_negative_numbers = true)]
        exam: i64,
    },
    /// Delete a student, by identifier or name
    Delete { query: String },
    /// Update some fields of a student, by identifier or name
    Update {
        query: String,
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        cw1: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        cw2: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        cw3: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        exam: Option<i64>,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load(store: &Store, candidates: &[PathBuf]) -> eyre::Result<Collection> {
    match store.load() {
        Ok(students) => Ok(students),
        Err(Error::StoreUnavailable) => {
            error!(?candidates, "no marks file found");
            Ok(Collection::default())
        }
        Err(e) => Err(e).wrap_err("cannot load student records"),
    }
}

fn save(store: &Store, students: &Collection) -> eyre::Result<()> {
    store.save(students).wrap_err("could not write to file")
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn show_extreme(out: &mut impl Write, title: &str, record: Option<&Record>) -> io::Result<()> {
    match record {
        Some(r) => write!(out, "{title}\n\n{}", display::record_details(r)),
        None => writeln!(out, "No data available."),
    }
}

fn run(
    command: Command,
    store: &Store,
    students: &mut Collection,
    out: &mut impl Write,
) -> eyre::Result<()> {
    match command {
        Command::List => write!(out, "{}", display::record_table(students))?,
        Command::Show { query } => {
            if students.is_empty() {
                writeln!(out, "No student data found.")?;
            } else if let Some(r) = students.find(&query) {
                write!(out, "{}", display::record_details(r))?;
            } else {
                writeln!(out, "No student found for '{}'", capitalize(&query))?;
            }
        }
        Command::Highest => show_extreme(out, "HIGHEST OVERALL MARK", students.highest())?,
        Command::Lowest => show_extreme(out, "LOWEST OVERALL MARK", students.lowest())?,
        Command::Sort { descending } => {
            if students.is_empty() {
                writeln!(out, "No records to sort.")?;
            } else {
                students.sort(!descending);
                write!(out, "{}", display::record_table(students))?;
            }
        }
        Command::Add {
            id,
            name,
            cw1,
            cw2,
            cw3,
            exam,
        } => {
            let coursework = [cw1, cw2, cw3];
            checks::validate_new(&id, &name, &coursework, exam)?;
            let record = Record::new(&id, &name, coursework, exam);
            info!(id = %record.id, "adding record");
            let message = format!("Student {} ({}) added successfully!", record.name, record.id);
            students.add(record);
            save(store, students)?;
            writeln!(out, "{message}")?;
        }
        Command::Delete { query } => {
            if students.is_empty() {
                writeln!(out, "No records to delete.")?;
                return Ok(());
            }
            let Some(found) = students.find(&query).cloned() else {
                writeln!(out, "No student found for '{query}'")?;
                return Ok(());
            };
            let removed = students.delete(&found.id);
            debug!(id = %found.id, removed, "records deleted");
            save(store, students)?;
            writeln!(out, "Student {} removed.", found.name)?;
        }
        Command::Update {
            query,
            id,
            name,
            cw1,
            cw2,
            cw3,
            exam,
        } => {
            if students.is_empty() {
                writeln!(out, "No records to update.")?;
                return Ok(());
            }
            let changes = RecordUpdate {
                id,
                name,
                coursework: [cw1, cw2, cw3],
                exam,
            };
            checks::validate_update(&changes)?;
            if changes.is_empty() {
                writeln!(out, "Nothing to update.")?;
                return Ok(());
            }
            let Some(name) = students.update(&query, &changes).map(|r| r.name.clone()) else {
                writeln!(out, "No student found for '{query}'")?;
                return Ok(());
            };
            save(store, students)?;
            writeln!(out, "Record for {name} updated.")?;
        }
    }
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = match &cli.config {
        Some(file_name) => Config::load(file_name)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG))?,
    };
    let candidates = match cli.data {
        Some(data) => vec![data],
        None => config.store.candidates,
    };
    let store = Store::new(config::resolve_data_path(&candidates));
    debug!(path = ?store.path(), "resolved marks file");
    let mut students = load(&store, &candidates)?;
    run(cli.command, &store, &mut students, &mut io::stdout().lock())
}
