use clap::Parser;

use crate::{cli::ConnectionArgs, prelude::*, tables::build_feature_status_table};

#[derive(Parser)]
pub struct FeatureStatusArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,
}

#[instrument(skip_all)]
pub async fn feature_status(args: FeatureStatusArgs) -> Result {
    let status = args.connection.api()?.get_feature_status().await?;
    println!("{}", build_feature_status_table(&status));
    Ok(())
}
