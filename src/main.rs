use std::env;

use anyhow::{Context, Result};
use log::info;
use tokio::net::TcpListener;

mod cli;
mod config;
mod display;
mod event;
mod ics;
mod parse;
mod server;
mod tz;

use event::Program;
use server::App;

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "wedding_ical_feed=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let args = cli::parse(env::args().skip(1).collect());

    let app = App {
        program: Program::wedding(args.timezone),
        config_path: args.config,
    };

    let listener = TcpListener::bind(args.address)
        .await
        .with_context(|| format!("failed to bind {}", args.address))?;
    info!("listening on http://{}", args.address);

    axum::serve(listener, server::router(app))
        .await
        .context("server error")
}
