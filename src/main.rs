use std::{process::ExitCode, time::Duration};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use reqwest::Client;

use sporlpurge::{
    Res,
    cli::{self, PurgeOptions, TerminalConfirmation},
    config::{self, Config},
    error, logger, spotify, success, utils, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Verbose logging (same as DEBUG=true)
    #[clap(long)]
    debug: bool,

    /// List saved albums without removing anything
    #[clap(long)]
    dry_run: bool,

    /// Seconds to wait for the OAuth callback
    #[clap(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    callback_timeout: Option<u64>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    if let Some(Command::Completions(opt)) = args.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Res<()> {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file. Err: {}", e);
    }

    let mut config = Config::from_env()?;
    if args.debug {
        config.debug = true;
    }
    if let Some(secs) = args.callback_timeout {
        config.callback_timeout = Duration::from_secs(secs);
    }

    logger::init(config.debug);
    tracing::debug!(?config, "configuration loaded");

    let state = utils::generate_state()?;
    let code = spotify::auth::authorize(&config, &state).await?;

    let client = Client::new();
    let token = spotify::auth::exchange_code(&client, &config, &code).await?;
    success!("Access token obtained");

    let options = PurgeOptions {
        dry_run: args.dry_run,
        ..PurgeOptions::default()
    };
    let outcome = cli::purge(&client, &config, &token, &TerminalConfirmation, &options).await?;
    tracing::debug!(?outcome, "purge finished");

    Ok(())
}
