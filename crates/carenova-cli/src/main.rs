use std::fs::OpenOptions;
use std::io;

use anyhow::Result;
use carenova_term::application::cli;
use carenova_term::{Config, ConfigKey};
use log::LevelFilter;

const LOG_FILE: &str = "carenova.log";

fn init_logging() -> Result<()> {
    let log_level_filter = Config::get(ConfigKey::LogLevel)
        .parse()
        .unwrap_or(LevelFilter::Info);

    // The chat owns stdout, so logs go to a file.
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)?;

    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::execute!(
            io::stdout(),
            crossterm::style::ResetColor,
            crossterm::cursor::Show
        );
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    if !cli::parse().await? {
        return Ok(());
    }

    init_logging()?;
    log::info!(
        "starting carenova {} against {}",
        env!("CARGO_PKG_VERSION"),
        Config::get(ConfigKey::ServerUrl)
    );

    let res = carenova_term::start_loop().await;
    if let Err(err) = &res {
        log::error!("carenova exited with an error: {err:?}");
    }

    res
}
