//! Scopespread - spreads scoped secret variables into unique, unscoped ones.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scopespread::cli::output;
use scopespread::cli::{execute, Cli};
use scopespread::core::constants::LOG_ENV;
use scopespread::error::{ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("scopespread=debug")
        } else {
            EnvFilter::new("scopespread=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.config.as_deref()) {
        let suggestion = match &e {
            Error::Config(ConfigError::NoPlatform) => {
                Some("pass --snapshot <file> or add [platform] to .scopespread.toml")
            }
            Error::Config(ConfigError::NotConfirmed) => Some("re-run with --yes"),
            Error::Config(ConfigError::MissingApiKey(_)) => {
                Some("export the API key, or set platform.api_key_env")
            }
            Error::Config(ConfigError::HttpUnavailable) => Some("rebuild with --features http"),
            _ if e.is_fatal() => Some("fix the variable on the platform, then run spread again"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
