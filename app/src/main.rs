use std::{fs::File, path::Path};

use log::LevelFilter;
use pretty_env_logger::env_logger::fmt::{Target, TimestampPrecision};

mod api;
mod app;
mod config;
mod screen;
mod state;

use app::App;
use config::AppConfig;

const CONFIG_PATH: &str = "./wallet-tui.toml";

#[tokio::main]
async fn main() {
    // The terminal is owned by the TUI, so logs go to a file.
    let log_file = File::create("./log").unwrap();
    pretty_env_logger::formatted_timed_builder()
        .format_timestamp(Some(TimestampPrecision::Seconds))
        .target(Target::Pipe(Box::from(log_file)))
        .filter(None, LevelFilter::Info)
        .init();

    let config = AppConfig::load(Path::new(CONFIG_PATH));

    let app = App::new(config).await;
    app.run().await;
}
