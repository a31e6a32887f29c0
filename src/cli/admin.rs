pub mod laboratories;
pub mod materials;
pub mod reservations;

use clap::{Parser, Subcommand};

use self::{
    laboratories::AdminLabsArgs,
    materials::AdminMaterialsArgs,
    reservations::AdminReservationsArgs,
};
use crate::prelude::*;

#[derive(Parser)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Laboratory CRUD.
    #[clap(name = "labs")]
    Labs(Box<AdminLabsArgs>),

    /// Material CRUD under a laboratory.
    #[clap(name = "materials")]
    Materials(Box<AdminMaterialsArgs>),

    /// The reservation dashboard.
    #[clap(name = "reservations")]
    Reservations(Box<AdminReservationsArgs>),
}

pub async fn admin(args: AdminArgs) -> Result {
    match args.command {
        AdminCommand::Labs(args) => laboratories::labs(*args).await,
        AdminCommand::Materials(args) => materials::materials(*args).await,
        AdminCommand::Reservations(args) => reservations::reservations(*args).await,
    }
}
