use app::App;
use clap::Parser;
use config::{Args, Config};
use iced::{Application, Settings};

mod api;
mod app;
mod config;
mod deck;
mod error;
mod flow;
mod images;
mod modals;
mod models;
mod notify;
mod preferences;
mod search;
mod theme;
mod ui;

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_args(Args::parse());
    let settings = Settings::with_flags(config);

    App::run(settings)
}
