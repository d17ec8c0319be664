use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use tracing::debug;

use check_gist_revision::check::sources::HttpSource;
use check_gist_revision::check::store::FileVersionStore;
use check_gist_revision::check::{CheckOutcome, NagiosStatus, VersionCheck};
use check_gist_revision::config::{self, CheckConfig};
use check_gist_revision::logging::{self, LogFormat, LogOptions};

#[derive(Parser, Debug)]
#[command(name = "check-gist-revision")]
#[command(
    version,
    about = "Nagios check that reports when the revision of a published gist list changes",
    after_help = "Exit codes: 0 OK, 1 WARNING (list changed), 2 CRITICAL, 3 UNKNOWN"
)]
struct Cli {
    #[arg(long, short, help = "JSON config file; flags override its values")]
    config: Option<PathBuf>,

    #[arg(long, short, help = "Gist page to fetch")]
    url: Option<String>,

    #[arg(long, short, help = "Save file holding the last-seen revision")]
    state_file: Option<PathBuf>,

    #[arg(long, value_name = "SECS", help = "Connection timeout [default: 15]")]
    connect_timeout: Option<u64>,

    #[arg(long, value_name = "SECS", help = "Overall request timeout [default: none]")]
    timeout: Option<u64>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[arg(
        long,
        value_name = "PATH",
        help = "Log to a file instead of standard error; without PATH uses the data directory"
    )]
    log_file: Option<Option<PathBuf>>,
}

impl Cli {
    fn log_options(&self) -> LogOptions {
        LogOptions {
            verbosity: self.verbose,
            format: self.log_format,
            file: self
                .log_file
                .as_ref()
                .map(|path| path.clone().unwrap_or_else(config::log_path)),
        }
    }

    fn resolve_config(&self) -> anyhow::Result<CheckConfig> {
        let mut config = match &self.config {
            Some(path) => CheckConfig::from_file(path)?,
            None => CheckConfig::default(),
        };

        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(state_file) = &self.state_file {
            config.state_file = state_file.clone();
        }
        if let Some(secs) = self.connect_timeout {
            config.connect_timeout_secs = secs;
        }
        if let Some(secs) = self.timeout {
            config.request_timeout_secs = Some(secs);
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let outcome = match Cli::try_parse() {
        Ok(cli) => match run(&cli) {
            Ok(outcome) => outcome,
            Err(e) => CheckOutcome::new(NagiosStatus::Unknown, format!("{:#}", e)),
        },
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => usage_outcome(&e),
        },
    };

    println!("{}", outcome);
    ExitCode::from(outcome.exit_code())
}

/// Usage errors are reported as a status line like any other failure
fn usage_outcome(err: &clap::Error) -> CheckOutcome {
    let detail = err.to_string();
    let first_line = detail
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ");
    CheckOutcome::new(
        NagiosStatus::Unknown,
        format!("Invalid arguments: {}", first_line),
    )
}

fn run(cli: &Cli) -> anyhow::Result<CheckOutcome> {
    let _guard = logging::init(&cli.log_options())?;

    let config = cli.resolve_config()?;
    debug!("Resolved configuration: {:?}", config);

    let source = HttpSource::from_config(&config).context("Failed to create HTTP client")?;
    let store = FileVersionStore::new(config.state_file.clone(), config.file_mode);
    let check = VersionCheck::new(source, store, config.markers.clone(), &config.list_name);

    let outcome = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(check.run());

    Ok(outcome)
}
