use clap::ArgMatches;
use clap::error::ErrorKind;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, error};
use url::Url;
use w3mirror_core::{
    Account, MirrorOptions, MirrorProgressCallback, W3CliClient, execute_mirror,
    generate_mirror_report,
};

/// Arguments of a mirror run, lifted out of clap's matches
#[derive(Debug, Clone)]
pub struct MirrorArgs {
    pub email: String,
    pub space: String,
    pub url: Url,
    pub staging_dir: PathBuf,
    pub w3_bin: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub quiet: bool,
    pub verbose: bool,
}

pub fn parse_mirror_args(matches: &ArgMatches) -> Result<MirrorArgs, String> {
    let email = matches
        .get_one::<String>("EMAIL")
        .ok_or("Missing EMAIL argument")?
        .clone();
    let space = matches
        .get_one::<String>("SPACE")
        .ok_or("Missing SPACE argument")?
        .clone();
    let url = matches
        .get_one::<Url>("URL")
        .ok_or("Missing URL argument")?
        .clone();

    let staging_dir = matches
        .get_one::<String>("staging-dir")
        .map(|dir| PathBuf::from(shellexpand::tilde(dir).as_ref()))
        .ok_or("Missing staging directory")?;

    Ok(MirrorArgs {
        email,
        space,
        url,
        staging_dir,
        w3_bin: matches.get_one::<PathBuf>("w3-bin").cloned(),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        quiet: matches.get_flag("quiet"),
        verbose: matches.get_flag("verbose"),
    })
}

/// Exit status for a clap error: help and version are not failures
pub fn usage_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

pub fn log_level(quiet: bool, verbose: bool) -> Level {
    if quiet {
        Level::WARN
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

fn init_logging(level: Level) {
    // stdout is reserved for the gateway URL
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Use the explicit `w3` binary if given, otherwise look it up on PATH
pub fn resolve_storage_client(w3_bin: Option<&PathBuf>) -> Result<W3CliClient, String> {
    match w3_bin {
        Some(path) if path.is_file() => Ok(W3CliClient::new(path.clone())),
        Some(path) => Err(format!("w3 client not found at {}", path.display())),
        None => W3CliClient::from_path().ok_or_else(|| {
            "w3 client not found on PATH (install with `npm install -g @web3-storage/w3cli`)"
                .to_string()
        }),
    }
}

pub async fn handle_mirror(args: MirrorArgs) {
    init_logging(log_level(args.quiet, args.verbose));

    let client = match resolve_storage_client(args.w3_bin.as_ref()) {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            eprintln!("{} {}", "✗".red().bold(), e);
            return;
        }
    };

    if !args.quiet {
        eprintln!(
            "{} Mirroring {}",
            "→".blue(),
            args.url.as_str().bright_white()
        );
        eprintln!(
            "{} Staging directory: {}",
            "→".blue(),
            args.staging_dir.display().to_string().bright_white()
        );
        eprintln!(
            "{} Uploading to space {} as {}",
            "→".blue(),
            args.space.bright_white(),
            args.email.bright_white()
        );
    }

    let mut options = MirrorOptions::new(args.url.clone());
    options.staging_dir = args.staging_dir.clone();
    options.timeout_secs = args.timeout_secs;
    options.show_progress_bars = !args.quiet;

    let account = Account {
        email: args.email.clone(),
        space: args.space.clone(),
    };

    let progress_callback: Option<MirrorProgressCallback> = if args.quiet {
        None
    } else {
        Some(Arc::new(|msg: String| {
            eprintln!("{} {}", "→".blue(), msg);
        }))
    };

    match execute_mirror(&options, &account, &client, progress_callback).await {
        Ok(outcome) => {
            if !args.quiet {
                eprintln!("\n{} Mirror complete!\n", "✓".green().bold());
                eprint!("{}", generate_mirror_report(&outcome));
            }
            println!("{}", outcome.gateway_url);
        }
        Err(e) => {
            error!("Mirror of {} failed: {}", args.url, e);
            eprintln!("{} Mirror failed: {}", "✗".red().bold(), e);
        }
    }
}
