use std::path::PathBuf;

use clap::Parser;

use crate::{
    carousel,
    cli::ConnectionArgs,
    content::{Content, latest_posts},
    prelude::*,
    tables::{build_partners_table, build_posts_table, build_testimonials_table},
};

#[derive(Parser)]
pub struct HomeArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    /// Local TOML file with the partners and testimonials sections.
    #[clap(long = "content-file", env = "LABDESK_CONTENT_FILE", default_value = "content.toml")]
    pub content_file: PathBuf,

    /// Carousel position: how many slides to step from the start,
    /// negative values step backwards.
    #[clap(long = "carousel-page", default_value = "0", allow_hyphen_values = true)]
    pub carousel_page: i64,

    /// Partner slides per screen.
    #[clap(long = "partner-slides", default_value = "4")]
    pub partner_slides: usize,

    /// Testimonial slides per screen.
    #[clap(long = "testimonial-slides", default_value = "3")]
    pub testimonial_slides: usize,
}

#[instrument(skip_all)]
pub async fn home(args: HomeArgs) -> Result {
    let api = args.connection.api()?;
    let posts = api.get_posts().await?;
    println!("{}", build_posts_table(&latest_posts(&posts, 3)));

    let content = Content::read_from(&args.content_file)?;

    let partners: Vec<_> = carousel::window(
        content.partners.len(),
        carousel::position(args.carousel_page, content.partners.len()),
        args.partner_slides,
    )
    .into_iter()
    .map(|index| &content.partners[index])
    .collect();
    println!("{}", build_partners_table(&partners));

    let testimonials: Vec<_> = carousel::window(
        content.testimonials.len(),
        carousel::position(args.carousel_page, content.testimonials.len()),
        args.testimonial_slides,
    )
    .into_iter()
    .map(|index| &content.testimonials[index])
    .collect();
    println!("{}", build_testimonials_table(&testimonials));

    Ok(())
}
