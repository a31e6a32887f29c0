use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::{
    api::booking::models::CreateReservationRequest,
    cli::{ConnectionArgs, check_public_gate, heartbeat::HeartbeatArgs, select_available},
    prelude::*,
    pricing::{Quote, booked_hours},
    quantity::time_of_day::TimeOfDay,
    tables::build_quote_table,
};

#[derive(Parser)]
pub struct ReserveArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    #[clap(flatten)]
    pub heartbeat: HeartbeatArgs,

    pub laboratory_id: String,

    #[clap(long = "full-name")]
    pub full_name: String,

    #[clap(long)]
    pub email: String,

    #[clap(long = "phone-number")]
    pub phone_number: String,

    /// Identifiers of the materials to attach, comma-separated.
    #[clap(long = "materials", value_delimiter = ',', num_args = 0..)]
    pub materials: Vec<String>,

    /// Reservation date, `YYYY-MM-DD`.
    #[clap(long)]
    pub date: NaiveDate,

    #[clap(long = "start-time")]
    pub start_time: TimeOfDay,

    #[clap(long = "end-time")]
    pub end_time: TimeOfDay,

    #[clap(long)]
    pub notes: Option<String>,
}

#[instrument(skip_all)]
pub async fn reserve(args: ReserveArgs) -> Result {
    validate_contact(&args.full_name, &args.email, &args.phone_number)?;
    validate_date(args.date, Local::now().date_naive())?;

    let api = args.connection.api()?;
    check_public_gate(&api).await?;

    let laboratory = api.get_laboratory(&args.laboratory_id).await?;
    let materials = api.get_materials(&args.laboratory_id).await?;
    let selected = select_available(&materials, &args.materials)?;

    let hours = booked_hours(Some(args.start_time), Some(args.end_time));
    let quote = Quote::compute(laboratory.hourly_rate, selected, hours);

    let request = CreateReservationRequest::builder()
        .full_name(args.full_name.trim())
        .email(args.email.trim())
        .phone_number(args.phone_number.trim())
        .materials(args.materials.clone())
        .reservation_date(args.date)
        .start_time(args.start_time)
        .end_time(args.end_time)
        .maybe_notes(args.notes.clone())
        .build();
    let reservation = api.create_reservation(&args.laboratory_id, &request).await?;

    info!(
        id = %reservation.id,
        laboratory = %laboratory.title,
        total = %quote.total,
        "reservation submitted",
    );
    println!("{}", build_quote_table(&quote));
    args.heartbeat.send(&reservation.id).await;
    Ok(())
}

fn validate_contact(full_name: &str, email: &str, phone_number: &str) -> Result {
    ensure!(!full_name.trim().is_empty(), "the full name must not be blank");
    ensure!(email.trim().contains('@'), "`{email}` does not look like an email address");
    ensure!(!phone_number.trim().is_empty(), "the phone number must not be blank");
    Ok(())
}

/// The booking form does not accept dates in the past.
fn validate_date(date: NaiveDate, today: NaiveDate) -> Result {
    ensure!(date >= today, "the reservation date `{date}` lies in the past");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_contact_ok() {
        assert!(validate_contact("Amira Ben Salah", "amira@example.org", "+216 20 123 456").is_ok());
    }

    #[test]
    fn test_validate_contact_blank_name() {
        assert!(validate_contact("   ", "amira@example.org", "+216 20 123 456").is_err());
    }

    #[test]
    fn test_validate_contact_bad_email() {
        assert!(validate_contact("Amira", "not-an-email", "+216 20 123 456").is_err());
    }

    #[test]
    fn test_validate_date() -> Result {
        let today = "2026-08-25".parse::<NaiveDate>()?;
        assert!(validate_date("2026-08-25".parse()?, today).is_ok());
        assert!(validate_date("2026-09-01".parse()?, today).is_ok());
        assert!(validate_date("2026-08-24".parse()?, today).is_err());
        Ok(())
    }
}
