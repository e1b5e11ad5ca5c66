use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use uuid_log::{
    Dispatcher, Facility, Level, Logger, PrintHandler, UuidLogConfig, VersionConsistencyChecker,
};

#[derive(Parser)]
#[command(name = "uuid-log")]
#[command(version, about = "microcontroller logging framework and release tooling", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// path to the project root (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    path: PathBuf,

    /// output format (json or human)
    #[arg(short, long, default_value = "human", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Json,
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!(
                "invalid output format: {}, use 'json' or 'human'",
                s
            )),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// check that the latest changelog release matches the build version
    CheckVersion {
        /// manifest declaring the build version, relative to the project root
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// changelog with release headings, relative to the project root
        #[arg(short, long)]
        changelog: Option<PathBuf>,
    },

    /// log a few messages through a print handler on stdout
    Demo {
        /// number of loop messages to log
        #[arg(short = 'n', long, default_value_t = 5)]
        count: u32,

        /// level to register the print handler with (default from config)
        #[arg(short, long)]
        level: Option<Level>,

        /// pause between loop messages in milliseconds
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
    },
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::CheckVersion {
            manifest,
            changelog,
        } => handle_check_version(&cli.path, &cli.format, manifest, changelog),
        Commands::Demo {
            count,
            level,
            interval_ms,
        } => handle_demo(&cli.path, count, level, interval_ms),
    }
}

fn handle_check_version(
    path: &Path,
    format: &OutputFormat,
    manifest: Option<PathBuf>,
    changelog: Option<PathBuf>,
) -> Result<ExitCode> {
    let mut config = UuidLogConfig::load_or_default(path);

    // command line overrides the config file
    if let Some(manifest) = manifest {
        config.release.manifest_file = manifest;
    }
    if let Some(changelog) = changelog {
        config.release.changelog_file = changelog;
    }

    let checker = VersionConsistencyChecker::from_config(path, &config.release);
    let context = || {
        format!(
            "failed to compare {} with {}",
            checker.manifest_path().display(),
            checker.changelog_path().display()
        )
    };

    match format {
        OutputFormat::Json => {
            let outcome = checker.evaluate().with_context(context)?;
            let output = serde_json::json!({
                "success": outcome.is_success(),
                "message": outcome.to_string(),
                "manifest": checker.manifest_path(),
                "changelog": checker.changelog_path(),
                "outcome": outcome,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::from(outcome.exit_code()))
        }
        OutputFormat::Human => {
            let matched = checker
                .check(&mut io::stdout().lock(), &mut io::stderr().lock())
                .with_context(context)?;
            Ok(if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn handle_demo(
    path: &Path,
    count: u32,
    level: Option<Level>,
    interval_ms: u64,
) -> Result<ExitCode> {
    let config = UuidLogConfig::load_or_default(path);
    let level = level.unwrap_or(config.log.level);

    let dispatcher = Dispatcher::global();
    let handler = Arc::new(PrintHandler::with_maximum_log_messages(
        io::stdout(),
        config.log.maximum_log_messages,
    ));
    dispatcher.register_handler(handler.clone(), level);

    let setup = Logger::new("setup", Facility::Local0);
    setup.info("Application started");
    handler
        .process_all()
        .context("failed to write log output")?;

    let main_loop = Logger::new("loop", Facility::Local0);
    for i in 0..count {
        main_loop.debug(format_args!("Hello {} World!", i));
        handler
            .process_all()
            .context("failed to write log output")?;

        if interval_ms > 0 {
            thread::sleep(Duration::from_millis(interval_ms));
        }
    }

    dispatcher.unregister_handler(&handler);
    Ok(ExitCode::SUCCESS)
}
