#![doc = include_str!("../README.md")]

mod api;
mod carousel;
mod cli;
mod content;
mod prelude;
mod pricing;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Labs(args) => cli::labs::labs(*args).await,
        Command::Quote(args) => cli::quote::quote(*args).await,
        Command::Reserve(args) => cli::reserve::reserve(*args).await,
        Command::Home(args) => cli::home::home(*args).await,
        Command::FeatureStatus(args) => cli::feature_status::feature_status(*args).await,
        Command::Admin(args) => cli::admin::admin(*args).await,
    }
}
