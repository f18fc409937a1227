use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use berea_core::translations::{self, database_path, downloaded_translations, is_valid_translation_name};
use berea_core::{
    render_search, resolve_book, BibleDb, Config, Format, Highlight, InvalidInput, PassageRenderer,
    ReferenceScope, RenderOptions, SearchQuery, StepBible, Testament,
};

#[derive(Parser)]
#[command(name = "bible", version)]
#[command(about = "A CLI for looking up passages of Scripture.")]
#[command(args_conflicts_with_subcommands = true, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    reference: ReferenceArgs,

    /// Log queries and decisions to stderr
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Args)]
struct ReferenceArgs {
    /// Book name or abbreviation (e.g. john, psa, 3john)
    book: Option<String>,
    /// Chapter number
    chapter: Option<String>,
    /// Verse or verse range (e.g. 16 or 16-18)
    verse: Option<String>,
    /// Translation to read from
    #[arg(short, long)]
    translation: Option<String>,
    /// Output format
    #[arg(short, long, default_value = "txt", value_parser = ["txt", "md"])]
    format: String,
    /// Show verse numbers
    #[arg(short = 'n', long = "verse_numbers")]
    verse_numbers: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a phrase, optionally within a book or chapter
    Search(SearchArgs),
    /// Change persistent settings
    Config {
        #[command(subcommand)]
        setting: ConfigCommand,
    },
    /// List downloaded translations
    Translations,
}

#[derive(Args)]
struct SearchArgs {
    /// Phrase to search for; full-text operators (NOT, OR, "exact phrase", prefix*) are supported
    phrase: String,
    /// Book name or abbreviation to search within
    book: Option<String>,
    /// Chapter to search within
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    chapter: Option<u32>,
    /// Search only the Old Testament (also -OT)
    #[arg(long = "old_testament", conflicts_with = "new_testament")]
    old_testament: bool,
    /// Search only the New Testament (also -NT)
    #[arg(long = "new_testament")]
    new_testament: bool,
    /// Translation to search
    #[arg(short, long)]
    translation: Option<String>,
    /// Match the phrase as a literal substring instead of a full-text query
    #[arg(long)]
    literal: bool,
    /// Mark matches with <b> tags instead of terminal bold
    #[arg(long)]
    html: bool,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Set the default translation
    Translation {
        /// Name of a downloaded translation (e.g. BSB, KJV)
        name: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_logging(cli.debug);

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Some(invalid) = err.downcast_ref::<InvalidInput>() {
                println!("{invalid}");
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Some(Commands::Config { setting }) => configure(setting, &Config::get_config_path()?),
        Some(Commands::Search(args)) => search(args, &load_config()),
        Some(Commands::Translations) => list_translations(&load_config()),
        None => lookup(cli.reference, &load_config()),
    }
}

/// Config for commands that only read it; an unreadable file means defaults.
fn load_config() -> Config {
    Config::load().unwrap_or_else(|err| {
        warn!("ignoring unreadable config: {err:#}");
        Config::new()
    })
}

/// `-OT` / `-NT` are not expressible as clap flags, so map them to their
/// long forms before parsing.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-OT") => OsString::from("--old_testament"),
            Some("-NT") => OsString::from("--new_testament"),
            _ => arg,
        })
        .collect()
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_translation(config: &Config, translation: &str) -> Result<BibleDb> {
    let dir = translations::data_dir(config)?;
    let path = database_path(&dir, translation);
    if !is_valid_translation_name(translation) || !path.exists() {
        return Err(InvalidInput::Translation(translation.to_string()).into());
    }

    BibleDb::open_prepared(&path, translation)
}

fn lookup(args: ReferenceArgs, config: &Config) -> Result<String> {
    let Some(book) = args.book.as_deref() else {
        return Err(InvalidInput::Book(String::new()).into());
    };

    let book = resolve_book(book)?;
    let scope = ReferenceScope::parse(book, args.chapter.as_deref(), args.verse.as_deref())?;
    let translation = config.translation(args.translation.as_deref());
    let db = open_translation(config, &translation)?;

    let records = db.passage(&scope)?;
    if records.is_empty() {
        return Err(InvalidInput::empty_result(&scope).into());
    }

    let options = RenderOptions {
        format: Format::from_str(&args.format).unwrap_or_default(),
        verse_numbers: args.verse_numbers,
    };
    debug!(reference = %scope.citation(), format = options.format.as_str(), "rendering passage");

    Ok(PassageRenderer::new(&translation, &StepBible, options).render(&scope, &records))
}

fn search(args: SearchArgs, config: &Config) -> Result<String> {
    let book = args.book.as_deref().map(resolve_book).transpose()?;
    let testament = match (args.old_testament, args.new_testament) {
        (true, _) => Some(Testament::Old),
        (_, true) => Some(Testament::New),
        _ => None,
    };

    // Scope errors are reported before touching the database
    let query = SearchQuery::new(&args.phrase, book, args.chapter, testament, !args.literal)?;

    let translation = config.translation(args.translation.as_deref());
    let db = open_translation(config, &translation)?;
    let (query, rows) = db.search_with_fallback(query)?;

    let highlight = if args.html { Highlight::Html } else { Highlight::Ansi };
    Ok(render_search(&query, &translation, &rows, highlight))
}

/// Update the config file at `config_path`. A file that fails to load is an
/// error here: saving over it would drop its other settings.
fn configure(setting: ConfigCommand, config_path: &Path) -> Result<String> {
    let mut config = Config::load_from(config_path)?;
    match setting {
        ConfigCommand::Translation { name } => {
            let downloaded = downloaded_translations(&translations::data_dir(&config)?)?;
            if !downloaded.contains(&name) {
                return Err(InvalidInput::Translation(name).into());
            }

            config.default_translation = Some(name);
            config.save_to(config_path)?;
            Ok("Default translation updated.".to_string())
        }
    }
}

fn list_translations(config: &Config) -> Result<String> {
    let downloaded = downloaded_translations(&translations::data_dir(config)?)?;
    if downloaded.is_empty() {
        return Ok("No translations downloaded.".to_string());
    }

    let default = config.translation(None);
    let lines: Vec<String> = downloaded
        .into_iter()
        .map(|name| {
            if name == default {
                format!("{name} (default)")
            } else {
                name
            }
        })
        .collect();

    Ok(lines.join("\n"))
}
