use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{debug, error};

use crate::aggregate::{fetch_all_bookmarks, fetch_all_history, fetch_profile_bookmarks, fetch_profile_history};
use crate::browsers::{Browser, BrowserKind, FetchOptions, default_browser};
use crate::error::Error;
use crate::models::FetchType;
use crate::outputs::{OutputFormat, Outputs, Record};
use crate::utils::environment::HostContext;

const ALL_BROWSERS: &str = "all";
const DEFAULT_BROWSER: &str = "default";

#[derive(Parser, Debug)]
#[command(name = "browser-history")]
#[command(version)]
#[command(about = "Extract history and bookmarks from locally installed web browsers", long_about = None)]
pub struct Cli {
    /// Type of data to fetch: history or bookmarks
    #[arg(short = 't', long = "type", default_value = "history")]
    pub fetch_type: String,

    /// Browser to fetch from: all, default, or a browser name
    #[arg(short, long, default_value = ALL_BROWSERS)]
    pub browser: String,

    /// Output format: csv, json or jsonl. Inferred from --output when omitted
    #[arg(short, long)]
    pub format: Option<String>,

    /// File to write to. Standard output when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Profile to fetch from. Requires a single browser
    #[arg(short, long)]
    pub profile: Option<String>,

    /// List the profiles of a browser and exit
    #[arg(long, value_name = "BROWSER")]
    pub show_profiles: Option<String>,
}

/// Parse the command line and execute it
///
/// Anticipated failures (bad type, format, browser, missing profile) are logged and
/// reported as exit code 1. Argument syntax errors exit 2 through clap.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_profiles.is_none() && cli.profile.is_some() && cli.browser.eq_ignore_ascii_case(ALL_BROWSERS) {
        Cli::command()
            .error(ErrorKind::ArgumentConflict, "Cannot use --profile option with all browsers. Specify a browser with --browser")
            .exit();
    }

    let ctx = HostContext::detect()?;
    let result = match &cli.show_profiles {
        Some(name) => show_profiles(&ctx, name),
        None => execute(&ctx, &cli),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if is_user_error(&e) => {
            error!("{}", e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn is_user_error(e: &Error) -> bool {
    matches!(
        e,
        Error::InvalidFetchType(_)
            | Error::InvalidFormat { .. }
            | Error::UnknownBrowser(_)
            | Error::DefaultBrowserUnavailable(_)
            | Error::ProfileNotFound { .. }
            | Error::ProfilesNotSupported { .. }
            | Error::BookmarksNotSupported { .. }
            | Error::PlatformUnsupported { .. }
            | Error::BrowserNotInstalled { .. }
    )
}

fn show_profiles(ctx: &HostContext, name: &str) -> Result<(), Error> {
    if name.eq_ignore_ascii_case(ALL_BROWSERS) {
        return Err(Error::UnknownBrowser(name.to_string()));
    }
    let browser = Browser::with_context(resolve_browser(ctx, name)?, ctx)?;
    if !browser.profile_support() {
        return Err(Error::ProfilesNotSupported { browser: browser.name() });
    }

    for profile in browser.history_profiles() {
        println!("{}", profile);
    }
    Ok(())
}

fn execute(ctx: &HostContext, cli: &Cli) -> Result<(), Error> {
    let fetch_type: FetchType = cli.fetch_type.parse()?;
    let format = resolve_format(cli.format.as_deref(), cli.output.as_ref())?;
    debug!("fetching {} as {} with columns {}", fetch_type, format, fetch_type.fields().join(","));

    let browser = if cli.browser.eq_ignore_ascii_case(ALL_BROWSERS) {
        None
    } else {
        Some(Browser::with_context(resolve_browser(ctx, &cli.browser)?, ctx)?)
    };

    match fetch_type {
        FetchType::History => {
            let outputs = match (&browser, cli.profile.as_deref()) {
                (None, _) => fetch_all_history(ctx)?,
                (Some(browser), None) => browser.fetch_history(None, FetchOptions::default())?,
                (Some(browser), Some(profile)) => {
                    require_profile_support(browser)?;
                    fetch_profile_history(browser, profile)?
                }
            };
            emit(&outputs, format, cli.output.as_ref())
        }
        FetchType::Bookmarks => {
            let outputs = match (&browser, cli.profile.as_deref()) {
                (None, _) => fetch_all_bookmarks(ctx)?,
                (Some(browser), None) => browser.fetch_bookmarks(None, FetchOptions::default())?,
                (Some(browser), Some(profile)) => {
                    require_profile_support(browser)?;
                    fetch_profile_bookmarks(browser, profile)?
                }
            };
            emit(&outputs, format, cli.output.as_ref())
        }
    }
}

fn resolve_browser(ctx: &HostContext, name: &str) -> Result<BrowserKind, Error> {
    if name.eq_ignore_ascii_case(DEFAULT_BROWSER) {
        return default_browser(ctx.platform);
    }
    BrowserKind::from_name(name)
}

fn require_profile_support(browser: &Browser) -> Result<(), Error> {
    if browser.profile_support() {
        Ok(())
    } else {
        Err(Error::ProfilesNotSupported { browser: browser.name() })
    }
}

/// Pick the output format
///
/// An explicit `--format` wins. Otherwise the extension of `--output` decides, falling
/// back to csv when there is no output file or the extension is not a known format.
fn resolve_format(explicit: Option<&str>, output: Option<&PathBuf>) -> Result<OutputFormat, Error> {
    if let Some(name) = explicit {
        return name.parse();
    }
    Ok(output.and_then(|path| OutputFormat::from_path(path).ok()).unwrap_or(OutputFormat::Csv))
}

fn emit<R: Record>(outputs: &Outputs<R>, format: OutputFormat, output: Option<&PathBuf>) -> Result<(), Error> {
    match output {
        Some(path) => outputs.save(path, Some(format)),
        None => {
            println!("{}", outputs.formatted(format)?);
            Ok(())
        }
    }
}
