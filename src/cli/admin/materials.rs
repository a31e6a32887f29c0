use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    api::booking::models::{CreateMaterialRequest, MaterialStatus, UpdateMaterialRequest},
    cli::{ConnectionArgs, check_admin_gate},
    prelude::*,
    quantity::rate::HourlyRate,
    tables::build_materials_table,
};

#[derive(Parser)]
pub struct AdminMaterialsArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: AdminMaterialsCommand,
}

#[derive(Subcommand)]
pub enum AdminMaterialsCommand {
    #[clap(name = "create")]
    Create(CreateArgs),

    #[clap(name = "update")]
    Update(UpdateArgs),

    #[clap(name = "delete")]
    Delete(DeleteArgs),
}

#[derive(Parser)]
pub struct CreateArgs {
    #[clap(long = "laboratory-id")]
    pub laboratory_id: String,

    #[clap(long)]
    pub name: String,

    #[clap(long)]
    pub description: Option<String>,

    /// Material type, e.g. `instrument` or `consumable`.
    #[clap(long = "type")]
    pub kind: String,

    /// Required unless the material is free.
    #[clap(long = "hourly-rate", required_unless_present = "free", conflicts_with = "free")]
    pub hourly_rate: Option<HourlyRate>,

    /// Lend the material for free.
    #[clap(long)]
    pub free: bool,

    #[clap(long, value_enum, default_value = "available")]
    pub status: MaterialStatus,

    #[clap(long)]
    pub image: Option<PathBuf>,
}

#[derive(Parser)]
pub struct UpdateArgs {
    #[clap(long = "laboratory-id")]
    pub laboratory_id: String,

    pub id: String,

    #[clap(long)]
    pub name: Option<String>,

    #[clap(long)]
    pub description: Option<String>,

    #[clap(long = "type")]
    pub kind: Option<String>,

    #[clap(long = "hourly-rate")]
    pub hourly_rate: Option<HourlyRate>,

    /// Switch the material between free and billed.
    #[clap(long)]
    pub free: Option<bool>,

    #[clap(long, value_enum)]
    pub status: Option<MaterialStatus>,

    #[clap(long)]
    pub image: Option<PathBuf>,
}

#[derive(Parser)]
pub struct DeleteArgs {
    #[clap(long = "laboratory-id")]
    pub laboratory_id: String,

    pub id: String,
}

#[instrument(skip_all)]
pub async fn materials(args: AdminMaterialsArgs) -> Result {
    let api = args.connection.api()?;
    check_admin_gate(&api).await?;
    match args.command {
        AdminMaterialsCommand::Create(create_args) => {
            ensure!(!create_args.name.trim().is_empty(), "the name must not be blank");
            let material = api
                .create_material(&create_args.laboratory_id, CreateMaterialRequest {
                    name: create_args.name.trim().to_owned(),
                    description: create_args.description,
                    kind: create_args.kind,
                    hourly_rate: create_args.hourly_rate,
                    is_free: create_args.free,
                    status: create_args.status,
                    image: create_args.image,
                })
                .await?;
            println!("{}", build_materials_table(std::slice::from_ref(&material)));
        }
        AdminMaterialsCommand::Update(update_args) => {
            // A material may not become free and billed at once, and a rate
            // set on a currently-free material is meaningless.
            if update_args.hourly_rate.is_some() {
                let current = api
                    .get_material(&update_args.laboratory_id, &update_args.id)
                    .await?;
                ensure!(
                    !current.is_free || update_args.free == Some(false),
                    "material `{}` is free, pass `--free false` to start billing it",
                    update_args.id,
                );
            }
            let material = api
                .update_material(&update_args.laboratory_id, &update_args.id, UpdateMaterialRequest {
                    name: update_args.name,
                    description: update_args.description,
                    kind: update_args.kind,
                    hourly_rate: update_args.hourly_rate,
                    is_free: update_args.free,
                    status: update_args.status,
                    image: update_args.image,
                })
                .await?;
            println!("{}", build_materials_table(std::slice::from_ref(&material)));
        }
        AdminMaterialsCommand::Delete(delete_args) => {
            api.delete_material(&delete_args.laboratory_id, &delete_args.id).await?;
            info!(id = %delete_args.id, "deleted");
        }
    }
    Ok(())
}
