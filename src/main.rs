//! blankpage - a minimal note editor with shareable links.
//!
//! This is the command-line front end. It drives the same controller a
//! browser front end would:
//!
//! - `serve`: run the share server
//! - every other command opens the local note store, resolves the current
//!   note from `--note` and the last-edited marker, applies one action and
//!   prints the resulting address

use blankpage::{
    models::{DEFAULT_SHARE_EXPIRY_HOURS, SHARE_EXPIRY_CHOICES},
    router,
    shared::start_cleanup_routine,
    sidebar::EMPTY_SIDEBAR,
    App, AppState, Config, Error, ExportFormat, Location, Note, ShareClient, ShareOutcome,
    SledStorage, ToastLevel, View,
};
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Note id to open, as carried by the `note` URL parameter
    #[arg(long, global = true)]
    note: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the share server
    Serve,
    #[command(flatten)]
    Note(NoteCommand),
}

#[derive(Subcommand)]
enum NoteCommand {
    /// Print the current note
    Open,
    /// Replace the current note's content (reads stdin when TEXT is omitted)
    Write { text: Option<String> },
    /// Create an empty note and make it current
    New,
    /// List notes, newest first
    List,
    /// Make another note current
    Switch { id: String },
    /// Delete a note (the current one by default)
    Delete {
        id: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Load a text file into the current note
    Import { file: PathBuf },
    /// Write the current note to a .txt or .md file
    Export {
        #[arg(long, default_value = "md")]
        format: String,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Create a public link for the current note
    Share {
        /// Hours until the link expires; 0 never expires
        #[arg(long, default_value_t = DEFAULT_SHARE_EXPIRY_HOURS)]
        expiry: i64,
    },
    /// Print the current note's content, or its address with --url
    Copy {
        #[arg(long)]
        url: bool,
    },
    /// Toggle between the light and dark theme
    Theme,
    /// Show what blankpage is
    About,
}

const ABOUT: &str = "Blank.page: a blank page for your thoughts.
Notes are saved on this machine as you type. Share links publish a snapshot
of one note, optionally expiring.";

// ============================================================================
// Terminal View
// ============================================================================

#[derive(Default)]
struct TerminalView;

impl View for TerminalView {
    fn show_toast(&mut self, message: &str, level: ToastLevel) {
        match level {
            ToastLevel::Info => eprintln!("{}", message),
            ToastLevel::Warning => eprintln!("warning: {}", message),
            ToastLevel::Error => eprintln!("error: {}", message),
        }
    }

    fn show_about(&mut self) {
        println!("{}", ABOUT);
    }

    fn share_result(&mut self, outcome: &ShareOutcome) {
        match outcome {
            ShareOutcome::Created { share_url, .. } => {
                println!("{}", share_url);
                if let Some(expiry) = outcome.expiry_text() {
                    eprintln!("{}", expiry);
                }
            }
            ShareOutcome::Failed { message } => eprintln!("error: {}", message),
        }
    }
}

fn confirm_delete(note: &Note) -> bool {
    eprint!("Are you sure you want to delete \"{}\"? [y/N] ", note.title);
    let _ = io::stderr().flush();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

// ============================================================================
// Commands
// ============================================================================

async fn serve(config: &Config) -> Result<(), Error> {
    let addr = config
        .bind_addr()
        .map_err(|e| Error::Usage(format!("Invalid bind address: {}", e)))?;
    let state = AppState::new(config)?;
    tokio::spawn(start_cleanup_routine(state.db.clone()));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("blankpage server running at http://{}", addr);
    log::info!("Data directory: {}", config.data_dir.display());

    axum::serve(listener, router(Arc::new(state))).await?;
    Ok(())
}

fn open_app(config: &Config, note: Option<&str>) -> Result<App<SledStorage, TerminalView>, Error> {
    let storage = SledStorage::open(&config.local_db_path())?;
    let mut location = Location::parse(&format!("{}/", config.server))?;
    if let Some(id) = note {
        location.replace_note(id);
    }

    let mut app = App::new(storage, location, TerminalView);
    app.load_current_note();
    Ok(app)
}

fn read_stdin() -> Result<String, Error> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

async fn edit(command: NoteCommand, config: &Config, note: Option<&str>) -> Result<(), Error> {
    let mut app = open_app(config, note)?;

    match command {
        NoteCommand::Open => {
            if let Some(note) = app.current_note() {
                println!("{}", note.content);
            }
            eprintln!("{}", app.stats());
        }
        NoteCommand::Write { text } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            app.handle_input(&text);
            eprintln!("{}", app.stats());
        }
        NoteCommand::New => {
            app.create_new_note();
        }
        NoteCommand::List => {
            let entries = app.sidebar();
            if entries.is_empty() {
                println!("{}", EMPTY_SIDEBAR);
            }
            for entry in entries {
                let marker = if entry.active { "*" } else { " " };
                println!("{} {}  {}  {}", marker, entry.date_label(), entry.id, entry.title);
            }
        }
        NoteCommand::Switch { id } => {
            if !app.switch_to_note(&id) {
                return Err(Error::Usage(format!("No note with id {}", id)));
            }
        }
        NoteCommand::Delete { id, yes } => {
            let confirm = |note: &Note| yes || confirm_delete(note);
            let deleted = match id {
                Some(id) => app.delete_note(&id, confirm),
                None => app.delete_current_note(confirm),
            };
            if !deleted {
                eprintln!("Nothing deleted");
            }
        }
        NoteCommand::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            app.import_content(&text);
            log::info!("Imported {}", file.display());
        }
        NoteCommand::Export { format, out } => {
            let format: ExportFormat = format.parse()?;
            if let Some(file) = app.export_current(format) {
                let path = file.write_to(&out)?;
                eprintln!("Wrote {}", path.display());
            }
        }
        NoteCommand::Share { expiry } => {
            if !SHARE_EXPIRY_CHOICES.iter().any(|(hours, _)| *hours == expiry) {
                let choices: Vec<String> = SHARE_EXPIRY_CHOICES
                    .iter()
                    .map(|(hours, label)| format!("{} ({})", hours, label))
                    .collect();
                return Err(Error::Usage(format!(
                    "Unsupported expiry {}; choose one of: {}",
                    expiry,
                    choices.join(", ")
                )));
            }
            if app.open_share() {
                if let Some(request) = app.share_request(expiry) {
                    let client = ShareClient::new(&config.server)?;
                    let result = client.create_share_link(&request).await;
                    app.complete_share(result);
                }
                app.close_share();
            }
        }
        NoteCommand::Copy { url } => {
            if url {
                println!("{}", app.copy_url());
            } else if let Some(content) = app.copy_content() {
                println!("{}", content);
            }
            return Ok(());
        }
        NoteCommand::Theme => {
            let theme = app.toggle_theme();
            eprintln!("Theme: {}", theme.as_str());
        }
        NoteCommand::About => {
            app.open_about();
            return Ok(());
        }
    }

    println!("{}", app.current_url());
    Ok(())
}

async fn run(cli: Cli, config: Config) -> Result<(), Error> {
    match cli.command {
        Commands::Serve => serve(&config).await,
        Commands::Note(command) => edit(command, &config, cli.note.as_deref()).await,
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::from_env();

    let cli = Cli::parse();
    if let Err(e) = run(cli, config).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
