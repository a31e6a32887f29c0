use clap::{Parser, Subcommand};

use crate::{
    api::booking::models::LaboratoryFilters,
    cli::ConnectionArgs,
    prelude::*,
    quantity::rate::HourlyRate,
    tables::{build_laboratories_table, build_materials_table},
};

#[derive(Parser)]
pub struct LabsArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: LabsCommand,
}

#[derive(Subcommand)]
pub enum LabsCommand {
    /// List laboratories, filtered server-side.
    #[clap(name = "list")]
    List(ListArgs),

    /// Laboratory detail with its materials.
    #[clap(name = "show")]
    Show(ShowArgs),
}

#[derive(Parser)]
pub struct ListArgs {
    /// Free-text search over titles and descriptions.
    #[clap(long)]
    pub search: Option<String>,

    #[clap(long = "min-rate")]
    pub min_rate: Option<HourlyRate>,

    #[clap(long = "max-rate")]
    pub max_rate: Option<HourlyRate>,
}

impl ListArgs {
    fn filters(self) -> LaboratoryFilters {
        LaboratoryFilters {
            search: self.search,
            min_rate: self.min_rate,
            max_rate: self.max_rate,
        }
    }
}

#[derive(Parser)]
pub struct ShowArgs {
    pub id: String,
}

#[instrument(skip_all)]
pub async fn labs(args: LabsArgs) -> Result {
    let api = args.connection.api()?;
    match args.command {
        LabsCommand::List(list_args) => {
            let laboratories = api.get_laboratories(&list_args.filters()).await?;
            println!("{}", build_laboratories_table(&laboratories));
        }
        LabsCommand::Show(show_args) => {
            let laboratory = api.get_laboratory(&show_args.id).await?;
            let materials = api.get_materials(&show_args.id).await?;
            println!("{}", build_laboratories_table(std::slice::from_ref(&laboratory)));
            println!("{}", build_materials_table(&materials));
        }
    }
    Ok(())
}
