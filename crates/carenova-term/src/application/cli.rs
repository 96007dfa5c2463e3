use std::ffi::OsString;

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

fn arg(key: ConfigKey, help: &str) -> Arg {
    Arg::new(key.to_string())
        .long(key.to_string())
        .env(key.env_var())
        .num_args(1)
        .action(ArgAction::Set)
        .help(help.to_string())
}

fn arg_config_file() -> Arg {
    arg(
        ConfigKey::ConfigFile,
        &format!(
            "Path to configuration file [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ),
    )
    .short('c')
}

fn arg_server_url() -> Arg {
    arg(
        ConfigKey::ServerUrl,
        &format!(
            "Base URL of the Carenova backend. The chat socket is derived from it. [default: {}]",
            Config::default(ConfigKey::ServerUrl)
        ),
    )
    .short('s')
}

fn arg_request_timeout() -> Arg {
    arg(
        ConfigKey::RequestTimeout,
        &format!(
            "Timeout in milliseconds for follow-up question requests. [default: {}]",
            Config::default(ConfigKey::RequestTimeout)
        ),
    )
}

fn arg_reload_delay() -> Arg {
    arg(
        ConfigKey::ReloadDelay,
        &format!(
            "Milliseconds to wait before starting a new session after the server disconnects. [default: {}]",
            Config::default(ConfigKey::ReloadDelay)
        ),
    )
}

fn arg_log_level() -> Arg {
    arg(
        ConfigKey::LogLevel,
        &format!(
            "Log level written to carenova.log. [default: {}]",
            Config::default(ConfigKey::LogLevel)
        ),
    )
    .value_parser(PossibleValuesParser::new([
        "error", "warn", "info", "debug", "trace",
    ]))
}

fn subcommand_config() -> Command {
    Command::new("config")
        .about("Configuration file options.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout."),
        )
}

pub fn build() -> Command {
    Command::new("carenova")
        .about("Chat with Carenova about your symptoms from the terminal.")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(subcommand_config())
        .arg(arg_config_file())
        .arg(arg_server_url())
        .arg(arg_request_timeout())
        .arg(arg_reload_delay())
        .arg(arg_log_level())
}

/// Parses the command line and loads configuration. Returns false when a
/// subcommand was handled and the chat should not start.
pub async fn parse() -> Result<bool> {
    parse_from(std::env::args_os()).await
}

pub async fn parse_from<I, T>(args: I) -> Result<bool>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cmd = build();
    let matches = cmd.clone().try_get_matches_from(args).unwrap_or_else(|e| e.exit());

    if let Some(("config", subcmd_matches)) = matches.subcommand() {
        if subcmd_matches.subcommand_matches("default").is_some() {
            println!("{}", Config::serialize_default(&cmd));
        }
        return Ok(false);
    }

    Config::load(&cmd, vec![&matches]).await?;

    Ok(true)
}
