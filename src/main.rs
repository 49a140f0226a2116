// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use bilyric::app_config::{self, Config};
use bilyric::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch and merge lyrics for every file in the data directory (default command)
    Batch(BatchArgs),

    /// Merge two local LRC files
    Merge {
        /// Original-language LRC file
        #[arg(value_name = "ORIGINAL")]
        original: PathBuf,

        /// Translated LRC file
        #[arg(value_name = "TRANSLATION")]
        translation: PathBuf,

        /// Output file; the merged lyric is printed when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the best lyric locator for a song
    Search {
        /// Song title
        title: String,

        /// Artist used to narrow the search
        #[arg(short, long)]
        artist: Option<String>,
    },

    /// Generate shell completions for bilyric
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Directory containing <artist>-<title>.lrc files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Directory receiving the merged files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Maximum number of songs processed at once
    #[arg(short, long)]
    jobs: Option<usize>,
}

/// bilyric - Bilingual LRC lyric merger
///
/// Looks up each song of a lyric directory in the NetEase Cloud Music catalog,
/// downloads the original and translated lyrics and merges them into one
/// time-synchronized bilingual LRC file.
#[derive(Parser, Debug)]
#[command(name = "bilyric")]
#[command(version)]
#[command(about = "Bilingual LRC lyric merger")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "bilyric fetches original and translated lyrics and merges them into bilingual LRC files.

EXAMPLES:
    bilyric                                     # Process ./data into ./gen using conf.json
    bilyric -f                                  # Regenerate files that already exist
    bilyric -d lyrics -o merged -j 4            # Custom directories, 4 songs at a time
    bilyric merge song.lrc song.zh.lrc -o out.lrc
    bilyric search \"Song Title\" --artist Singer
    bilyric completions bash > bilyric.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    batch: BatchArgs,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept every level here; the effective level is set through log::set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "bilyric", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Merge { original, translation, output }) => {
            let merged = Controller::merge_files(&original, &translation, output.as_deref())?;
            if output.is_none() {
                println!("{}", merged);
            }
            Ok(())
        }
        Some(Commands::Search { title, artist }) => {
            let config = load_config(&cli.config_path, cli.log_level.is_some())?;
            let controller = Controller::with_config(config)?;
            let locator = controller.lookup(&title, artist.as_deref()).await?;
            if locator.is_empty() {
                warn!("No lyric found for '{}'", title);
            } else {
                println!("{}", locator);
            }
            Ok(())
        }
        Some(Commands::Batch(args)) => run_batch(args, &cli.config_path, cli.log_level.is_some()).await,
        None => run_batch(cli.batch, &cli.config_path, cli.log_level.is_some()).await,
    }
}

/// Load or create the configuration; the config log level applies unless one was given on the command line
fn load_config(config_path: &str, log_level_from_cli: bool) -> Result<Config> {
    let config = Config::load_or_create(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    if !log_level_from_cli {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}

async fn run_batch(args: BatchArgs, config_path: &str, log_level_from_cli: bool) -> Result<()> {
    let mut config = load_config(config_path, log_level_from_cli)?;

    // Override config with CLI options if provided
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(jobs) = args.jobs {
        config.concurrent_jobs = jobs;
    }

    let controller = Controller::with_config(config)?;
    let summary = controller.run_batch(args.force_overwrite).await?;

    if summary.total() == 0 {
        return Err(anyhow!("No songs processed in {:?}", controller.config().data_dir));
    }
    if summary.failed > 0 {
        warn!("{} of {} songs failed, see {}", summary.failed, summary.total(),
            bilyric::app_controller::ISSUES_LOG_FILE);
    } else {
        info!("All songs processed");
    }

    Ok(())
}
