use std::{fs, path::PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use clap::{Parser, Subcommand};
use enumset::EnumSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{
    api::booking::{
        Api,
        models::{Reservation, ReservationStatus, UpdateReservationRequest},
    },
    cli::{ConnectionArgs, check_admin_gate},
    prelude::*,
    pricing::{Quote, booked_hours},
    quantity::{cost::Cost, time_of_day::TimeOfDay},
    tables::{build_quote_table, build_reservation_details_table, build_reservations_table},
};

#[derive(Parser)]
pub struct AdminReservationsArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: AdminReservationsCommand,
}

#[derive(Subcommand)]
pub enum AdminReservationsCommand {
    #[clap(name = "list")]
    List(ListArgs),

    #[clap(name = "show")]
    Show(ShowArgs),

    #[clap(name = "set-status")]
    SetStatus(SetStatusArgs),

    #[clap(name = "delete")]
    Delete(DeleteArgs),

    /// Write the reservation ledger to a TOML file.
    #[clap(name = "export")]
    Export(ExportArgs),
}

#[derive(Parser)]
pub struct ListArgs {
    /// Restrict the listing to one laboratory.
    #[clap(long = "laboratory-id")]
    pub laboratory_id: Option<String>,

    /// Statuses to include, comma-separated.
    #[clap(
        long = "statuses",
        value_delimiter = ',',
        num_args = 1..,
        default_value = "pending,confirmed,cancelled,completed",
    )]
    pub statuses: Vec<ReservationStatus>,
}

impl ListArgs {
    #[must_use]
    pub fn statuses(&self) -> EnumSet<ReservationStatus> {
        self.statuses.iter().copied().collect()
    }
}

#[derive(Parser)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Parser)]
pub struct SetStatusArgs {
    pub id: String,

    #[clap(long, value_enum)]
    pub status: ReservationStatus,
}

#[derive(Parser)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Parser)]
pub struct ExportArgs {
    #[clap(long = "laboratory-id")]
    pub laboratory_id: Option<String>,

    #[clap(long = "output-file")]
    pub output_file: PathBuf,
}

#[instrument(skip_all)]
pub async fn reservations(args: AdminReservationsArgs) -> Result {
    let api = args.connection.api()?;
    check_admin_gate(&api).await?;
    match args.command {
        AdminReservationsCommand::List(list_args) => {
            let statuses = list_args.statuses();
            let reservations = fetch(&api, list_args.laboratory_id.as_deref())
                .await?
                .into_iter()
                .filter(|reservation| statuses.contains(reservation.status))
                .collect_vec();
            println!("{}", build_reservations_table(&reservations));
        }
        AdminReservationsCommand::Show(show_args) => {
            let reservation = api.get_reservation(&show_args.id).await?;
            println!("{}", build_reservation_details_table(&reservation));
            audit(&reservation);
        }
        AdminReservationsCommand::SetStatus(set_status_args) => {
            let reservation = api
                .update_reservation(&set_status_args.id, &UpdateReservationRequest {
                    status: Some(set_status_args.status),
                    ..UpdateReservationRequest::default()
                })
                .await?;
            info!(id = %reservation.id, status = reservation.status.as_str(), "updated");
            println!("{}", build_reservations_table(std::slice::from_ref(&reservation)));
        }
        AdminReservationsCommand::Delete(delete_args) => {
            api.delete_reservation(&delete_args.id).await?;
            info!(id = %delete_args.id, "deleted");
        }
        AdminReservationsCommand::Export(export_args) => {
            let reservations = fetch(&api, export_args.laboratory_id.as_deref()).await?;
            let ledger = Ledger::new(&reservations);
            fs::write(
                &export_args.output_file,
                toml::to_string(&ledger).context("failed to serialize the ledger")?,
            )
            .with_context(|| format!("failed to write `{}`", export_args.output_file.display()))?;
            info!(
                len = ledger.reservations.len(),
                path = %export_args.output_file.display(),
                "exported",
            );
        }
    }
    Ok(())
}

async fn fetch(api: &Api, laboratory_id: Option<&str>) -> Result<Vec<Reservation>> {
    match laboratory_id {
        Some(laboratory_id) => api.get_reservations(laboratory_id).await,
        None => api.get_all_reservations().await,
    }
}

/// Recompute the cost breakdown from the embedded documents so the operator
/// can audit the stored total against the advertised rates.
fn audit(reservation: &Reservation) {
    let Some(laboratory) = reservation.laboratory.document() else {
        return;
    };
    let materials = reservation
        .materials
        .iter()
        .filter_map(|material| material.document())
        .collect_vec();
    let hours = booked_hours(Some(reservation.start_time), Some(reservation.end_time));
    let quote = Quote::compute(laboratory.hourly_rate, materials.iter().copied(), hours);
    println!("{}", build_quote_table(&quote));
    if let Some(stored) = reservation.total_cost
        && (stored.0.0 - quote.total.0.0).abs() > 0.005
    {
        warn!(
            stored = %stored,
            recomputed = %quote.total,
            "the stored total deviates from the current rates",
        );
    }
}

/// One exported reservation, flattened for the TOML ledger.
#[serde_as]
#[derive(Debug, Deserialize, Serialize)]
pub struct LedgerEntry {
    pub id: String,

    pub full_name: String,

    pub email: String,

    pub phone_number: String,

    pub laboratory_id: String,

    pub date: NaiveDate,

    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub start_time: TimeOfDay,

    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub end_time: TimeOfDay,

    pub status: ReservationStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<Cost>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Ledger {
    pub exported_at: DateTime<Local>,

    #[serde(default, rename = "reservation")]
    pub reservations: Vec<LedgerEntry>,
}

impl Ledger {
    fn new(reservations: &[Reservation]) -> Self {
        Self {
            exported_at: Local::now(),
            reservations: reservations
                .iter()
                .map(|reservation| LedgerEntry {
                    id: reservation.id.clone(),
                    full_name: reservation.full_name.clone(),
                    email: reservation.email.clone(),
                    phone_number: reservation.phone_number.clone(),
                    laboratory_id: reservation.laboratory.id().to_owned(),
                    date: reservation.reservation_date.date_naive(),
                    start_time: reservation.start_time,
                    end_time: reservation.end_time,
                    status: reservation.status,
                    total_cost: reservation.total_cost,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses_collect_into_set() {
        let args = ListArgs {
            laboratory_id: None,
            statuses: vec![ReservationStatus::Pending, ReservationStatus::Pending, ReservationStatus::Confirmed],
        };
        let statuses = args.statuses();
        assert_eq!(statuses.len(), 2);
        assert!(statuses.contains(ReservationStatus::Pending));
        assert!(!statuses.contains(ReservationStatus::Cancelled));
    }

    #[test]
    fn test_ledger_round_trip() -> Result {
        let ledger = Ledger {
            exported_at: Local::now(),
            reservations: vec![LedgerEntry {
                id: "66501b2f9c1e4a0012ab34d0".to_owned(),
                full_name: "Amira Ben Salah".to_owned(),
                email: "amira@example.org".to_owned(),
                phone_number: "+216 20 123 456".to_owned(),
                laboratory_id: "66501b2f9c1e4a0012ab34cd".to_owned(),
                date: "2026-09-15".parse()?,
                start_time: "09:00".parse()?,
                end_time: "12:00".parse()?,
                status: ReservationStatus::Pending,
                total_cost: Some(Cost::from(180.0)),
            }],
        };
        let parsed: Ledger = toml::from_str(&toml::to_string(&ledger)?)?;
        assert_eq!(parsed.reservations.len(), 1);
        let entry = &parsed.reservations[0];
        assert_eq!(entry.start_time.to_string(), "09:00");
        assert_eq!(entry.status, ReservationStatus::Pending);
        assert_eq!(entry.total_cost, Some(Cost::from(180.0)));
        Ok(())
    }
}
