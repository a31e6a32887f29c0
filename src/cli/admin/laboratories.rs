use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    api::booking::models::{CreateLaboratoryRequest, UpdateLaboratoryRequest},
    cli::{ConnectionArgs, check_admin_gate},
    prelude::*,
    quantity::rate::HourlyRate,
    tables::build_laboratories_table,
};

#[derive(Parser)]
pub struct AdminLabsArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: AdminLabsCommand,
}

#[derive(Subcommand)]
pub enum AdminLabsCommand {
    #[clap(name = "create")]
    Create(CreateArgs),

    #[clap(name = "update")]
    Update(UpdateArgs),

    /// Delete one or more laboratories, logging per-id results.
    #[clap(name = "delete")]
    Delete(DeleteArgs),
}

#[derive(Parser)]
pub struct CreateArgs {
    #[clap(long)]
    pub title: String,

    #[clap(long)]
    pub description: Option<String>,

    #[clap(long = "image-url")]
    pub image_url: Option<String>,

    #[clap(long = "hourly-rate")]
    pub hourly_rate: HourlyRate,

    /// Cover image to upload alongside the form.
    #[clap(long)]
    pub image: Option<PathBuf>,
}

#[derive(Parser)]
pub struct UpdateArgs {
    pub id: String,

    #[clap(long)]
    pub title: Option<String>,

    #[clap(long)]
    pub description: Option<String>,

    #[clap(long = "image-url")]
    pub image_url: Option<String>,

    #[clap(long = "hourly-rate")]
    pub hourly_rate: Option<HourlyRate>,

    #[clap(long)]
    pub image: Option<PathBuf>,
}

#[derive(Parser)]
pub struct DeleteArgs {
    #[clap(required = true)]
    pub ids: Vec<String>,
}

#[instrument(skip_all)]
pub async fn labs(args: AdminLabsArgs) -> Result {
    let api = args.connection.api()?;
    check_admin_gate(&api).await?;
    match args.command {
        AdminLabsCommand::Create(create_args) => {
            validate_title(&create_args.title)?;
            validate_rate(create_args.hourly_rate)?;
            let laboratory = api
                .create_laboratory(CreateLaboratoryRequest {
                    title: create_args.title.trim().to_owned(),
                    description: create_args.description,
                    image_url: create_args.image_url,
                    hourly_rate: create_args.hourly_rate,
                    image: create_args.image,
                })
                .await?;
            println!("{}", build_laboratories_table(std::slice::from_ref(&laboratory)));
        }
        AdminLabsCommand::Update(update_args) => {
            if let Some(title) = &update_args.title {
                validate_title(title)?;
            }
            if let Some(hourly_rate) = update_args.hourly_rate {
                validate_rate(hourly_rate)?;
            }
            let laboratory = api
                .update_laboratory(&update_args.id, UpdateLaboratoryRequest {
                    title: update_args.title.map(|title| title.trim().to_owned()),
                    description: update_args.description,
                    image_url: update_args.image_url,
                    hourly_rate: update_args.hourly_rate,
                    image: update_args.image,
                })
                .await?;
            println!("{}", build_laboratories_table(std::slice::from_ref(&laboratory)));
        }
        AdminLabsCommand::Delete(delete_args) => {
            let mut n_failed = 0_usize;
            for id in &delete_args.ids {
                match api.delete_laboratory(id).await {
                    Ok(()) => info!(id = %id, "deleted"),
                    Err(error) => {
                        n_failed += 1;
                        warn!(id = %id, "failed to delete: {error:#}");
                    }
                }
            }
            ensure!(n_failed == 0, "failed to delete {n_failed} laboratories");
        }
    }
    Ok(())
}

fn validate_title(title: &str) -> Result {
    ensure!(!title.trim().is_empty(), "the title must not be blank");
    Ok(())
}

fn validate_rate(hourly_rate: HourlyRate) -> Result {
    ensure!(
        hourly_rate > HourlyRate::ZERO,
        "the hourly rate must be positive, got {hourly_rate}",
    );
    Ok(())
}
