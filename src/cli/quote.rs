use clap::Parser;

use crate::{
    cli::{ConnectionArgs, check_public_gate, select_available},
    prelude::*,
    pricing::{Quote, booked_hours},
    quantity::time_of_day::TimeOfDay,
    tables::build_quote_table,
};

/// Pricing preview: fetch the laboratory and its materials, compute the
/// breakdown locally, render it. Nothing is submitted.
#[derive(Parser)]
pub struct QuoteArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    pub laboratory_id: String,

    /// Identifiers of the materials to include, comma-separated.
    #[clap(long = "materials", value_delimiter = ',', num_args = 0..)]
    pub materials: Vec<String>,

    #[clap(long = "start-time")]
    pub start_time: Option<TimeOfDay>,

    #[clap(long = "end-time")]
    pub end_time: Option<TimeOfDay>,
}

#[instrument(skip_all)]
pub async fn quote(args: QuoteArgs) -> Result {
    let api = args.connection.api()?;
    check_public_gate(&api).await?;

    let laboratory = api.get_laboratory(&args.laboratory_id).await?;
    let materials = api.get_materials(&args.laboratory_id).await?;
    let selected = select_available(&materials, &args.materials)?;

    let hours = booked_hours(args.start_time, args.end_time);
    let quote = Quote::compute(laboratory.hourly_rate, selected, hours);
    info!(title = %laboratory.title, total = %quote.total, "priced");
    println!("{}", build_quote_table(&quote));
    Ok(())
}
