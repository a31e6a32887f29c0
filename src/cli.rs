pub mod admin;
pub mod feature_status;
pub mod heartbeat;
pub mod home;
pub mod labs;
pub mod quote;
pub mod reserve;

use clap::{Parser, Subcommand};
use reqwest::Url;

use crate::{
    api::booking,
    api::booking::models::{Material, MaterialStatus},
    cli::{
        admin::AdminArgs,
        feature_status::FeatureStatusArgs,
        home::HomeArgs,
        labs::LabsArgs,
        quote::QuoteArgs,
        reserve::ReserveArgs,
    },
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Browse the laboratory catalogue.
    #[clap(name = "labs")]
    Labs(Box<LabsArgs>),

    /// Price a prospective reservation locally.
    #[clap(name = "quote")]
    Quote(Box<QuoteArgs>),

    /// Assemble and submit a reservation request.
    #[clap(name = "reserve")]
    Reserve(Box<ReserveArgs>),

    /// Home screen: latest news, partners, and testimonials.
    #[clap(name = "home")]
    Home(Box<HomeArgs>),

    /// Show the booking feature flag.
    #[clap(name = "feature-status")]
    FeatureStatus(Box<FeatureStatusArgs>),

    /// Management of laboratories, materials, and reservations.
    #[clap(name = "admin")]
    Admin(Box<AdminArgs>),
}

#[derive(Parser)]
pub struct ConnectionArgs {
    /// Base URL of the laboratory/reservation service.
    #[clap(
        long = "base-url",
        env = "LABDESK_BASE_URL",
        default_value = "http://localhost:3020"
    )]
    pub base_url: Url,

    /// Bearer token for the admin endpoints.
    #[clap(long = "token", env = "LABDESK_TOKEN")]
    pub token: Option<String>,
}

impl ConnectionArgs {
    pub fn api(&self) -> Result<booking::Api> {
        booking::Api::new(self.base_url.clone(), self.token.clone())
    }
}

/// Refuse booking actions when the operator disabled the public surface.
/// A flag-fetch failure degrades to "enabled".
pub async fn check_public_gate(api: &booking::Api) -> Result {
    match api.get_feature_status().await {
        Ok(status) if !status.is_public_enabled() => match status.public_reason() {
            Some(reason) => bail!("the booking section is currently unavailable: {reason}"),
            None => bail!("the booking section is currently unavailable"),
        },
        Ok(_) => Ok(()),
        Err(error) => {
            warn!("failed to fetch the feature status, assuming enabled: {error:#}");
            Ok(())
        }
    }
}

/// Same gate for the admin surface.
pub async fn check_admin_gate(api: &booking::Api) -> Result {
    match api.get_feature_status().await {
        Ok(status) if !status.is_admin_enabled() => match status.admin_reason() {
            Some(reason) => bail!("the admin section is currently unavailable: {reason}"),
            None => bail!("the admin section is currently unavailable"),
        },
        Ok(_) => Ok(()),
        Err(error) => {
            warn!("failed to fetch the feature status, assuming enabled: {error:#}");
            Ok(())
        }
    }
}

/// Resolve the selected material identifiers against the laboratory's
/// *available* materials, preserving the selection order.
pub fn select_available<'a>(materials: &'a [Material], ids: &[String]) -> Result<Vec<&'a Material>> {
    ids.iter()
        .map(|id| {
            materials
                .iter()
                .find(|material| material.id == *id && material.status == MaterialStatus::Available)
                .with_context(|| format!("material `{id}` is not available in this laboratory"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn material(id: &str, status: MaterialStatus) -> Material {
        Material {
            id: id.to_owned(),
            name: id.to_owned(),
            description: None,
            kind: "instrument".to_owned(),
            hourly_rate: None,
            is_free: true,
            status,
            laboratory_id: "lab-1".to_owned(),
            image_url: None,
            cover_image_path: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_select_available_ok() -> Result {
        let materials =
            [material("a", MaterialStatus::Available), material("b", MaterialStatus::Available)];
        let selected = select_available(&materials, &["b".to_owned(), "a".to_owned()])?;
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].id, "b");
        Ok(())
    }

    #[test]
    fn test_select_unknown_id() {
        let materials = [material("a", MaterialStatus::Available)];
        assert!(select_available(&materials, &["nope".to_owned()]).is_err());
    }

    #[test]
    fn test_select_unavailable_material() {
        let materials = [material("a", MaterialStatus::Maintenance)];
        assert!(select_available(&materials, &["a".to_owned()]).is_err());
    }

    #[test]
    fn test_select_none() -> Result {
        let materials = [material("a", MaterialStatus::Available)];
        assert!(select_available(&materials, &[])?.is_empty());
        Ok(())
    }
}
