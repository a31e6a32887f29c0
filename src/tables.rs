use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    api::booking::models::{
        FeatureStatus,
        Laboratory,
        Material,
        MaterialStatus,
        Reservation,
        ReservationStatus,
    },
    content::{Partner, Post, PostCategory, Testimonial},
    pricing::Quote,
    quantity::rate::HourlyRate,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

const fn status_color(status: ReservationStatus) -> Color {
    match status {
        ReservationStatus::Pending => Color::Yellow,
        ReservationStatus::Confirmed => Color::Green,
        ReservationStatus::Cancelled => Color::Red,
        ReservationStatus::Completed => Color::Grey,
    }
}

const fn material_status_color(status: MaterialStatus) -> Color {
    match status {
        MaterialStatus::Available => Color::Green,
        MaterialStatus::Unavailable => Color::Red,
        MaterialStatus::Maintenance => Color::DarkYellow,
    }
}

const fn category_color(category: PostCategory) -> Color {
    match category {
        PostCategory::Partnership => Color::Blue,
        PostCategory::Training => Color::DarkYellow,
        PostCategory::News => Color::Green,
        PostCategory::Other => Color::Grey,
    }
}

#[must_use]
pub fn build_laboratories_table(laboratories: &[Laboratory]) -> Table {
    let median_rate = {
        let rates = laboratories.iter().map(|laboratory| laboratory.hourly_rate).sorted().collect_vec();
        rates.get(rates.len() / 2).copied().unwrap_or(HourlyRate::ZERO)
    };

    let mut table = new_table();
    table.set_header(vec!["ID", "Title", "Rate", "Materials", "Created"]);
    for laboratory in laboratories {
        table.add_row(vec![
            Cell::new(&laboratory.id).add_attribute(Attribute::Dim),
            Cell::new(&laboratory.title),
            Cell::new(laboratory.hourly_rate).set_alignment(CellAlignment::Right).fg(
                if laboratory.hourly_rate >= median_rate { Color::Red } else { Color::Green },
            ),
            Cell::new(
                laboratory
                    .materials
                    .as_ref()
                    .map_or_else(|| "?".to_owned(), |materials| materials.len().to_string()),
            )
            .set_alignment(CellAlignment::Right),
            Cell::new(laboratory.created_at.date_naive()).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

#[must_use]
pub fn build_materials_table(materials: &[Material]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Type", "Rate", "Status"]);
    for material in materials {
        let rate_cell = if material.is_free {
            Cell::new("free").fg(Color::Green)
        } else {
            material
                .hourly_rate
                .map_or_else(|| Cell::new("?").fg(Color::Red), Cell::new)
                .set_alignment(CellAlignment::Right)
        };
        table.add_row(vec![
            Cell::new(&material.id).add_attribute(Attribute::Dim),
            Cell::new(&material.name),
            Cell::new(&material.kind),
            rate_cell,
            Cell::new(material.status.as_str()).fg(material_status_color(material.status)),
        ]);
    }
    table
}

#[must_use]
pub fn build_reservations_table(reservations: &[Reservation]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Contact", "Laboratory", "Date", "Time", "Total", "Status"]);
    for reservation in reservations {
        let laboratory = reservation
            .laboratory
            .document()
            .map_or_else(|| reservation.laboratory.id().to_owned(), |laboratory| laboratory.title.clone());
        table.add_row(vec![
            Cell::new(&reservation.id).add_attribute(Attribute::Dim),
            Cell::new(&reservation.full_name),
            Cell::new(laboratory),
            Cell::new(reservation.reservation_date.date_naive()),
            Cell::new(format!("{}–{}", reservation.start_time, reservation.end_time)),
            reservation
                .total_cost
                .map_or_else(|| Cell::new("—").add_attribute(Attribute::Dim), Cell::new)
                .set_alignment(CellAlignment::Right),
            Cell::new(reservation.status.as_str()).fg(status_color(reservation.status)),
        ]);
    }
    table
}

#[must_use]
pub fn build_reservation_details_table(reservation: &Reservation) -> Table {
    let mut table = new_table();
    table.add_row(vec![Cell::new("ID"), Cell::new(&reservation.id)]);
    table.add_row(vec![Cell::new("Full name"), Cell::new(&reservation.full_name)]);
    table.add_row(vec![Cell::new("Email"), Cell::new(&reservation.email)]);
    table.add_row(vec![Cell::new("Phone"), Cell::new(&reservation.phone_number)]);
    table.add_row(vec![
        Cell::new("Laboratory"),
        Cell::new(
            reservation
                .laboratory
                .document()
                .map_or_else(|| reservation.laboratory.id().to_owned(), |laboratory| laboratory.title.clone()),
        ),
    ]);
    table.add_row(vec![
        Cell::new("Date"),
        Cell::new(reservation.reservation_date.date_naive()),
    ]);
    table.add_row(vec![
        Cell::new("Time"),
        Cell::new(format!("{}–{}", reservation.start_time, reservation.end_time)),
    ]);
    table.add_row(vec![
        Cell::new("Notes"),
        Cell::new(reservation.notes.as_deref().unwrap_or("—")).add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![
        Cell::new("Status"),
        Cell::new(reservation.status.as_str()).fg(status_color(reservation.status)),
    ]);
    table.add_row(vec![
        Cell::new("Stored total"),
        reservation
            .total_cost
            .map_or_else(|| Cell::new("—").add_attribute(Attribute::Dim), Cell::new),
    ]);
    table
}

/// The reservation summary sidebar: one row per billed item plus totals.
#[must_use]
pub fn build_quote_table(quote: &Quote) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Item", "Rate", "Cost"]);
    table.add_row(vec![
        Cell::new("Duration"),
        Cell::new(""),
        Cell::new(quote.hours).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![
        Cell::new("Laboratory"),
        Cell::new(quote.laboratory_rate).set_alignment(CellAlignment::Right),
        Cell::new(quote.laboratory_cost).set_alignment(CellAlignment::Right),
    ]);
    for line in &quote.lines {
        table.add_row(vec![
            Cell::new(&line.name),
            line.rate
                .map_or_else(|| Cell::new("free").fg(Color::Green), Cell::new)
                .set_alignment(CellAlignment::Right),
            Cell::new(line.cost).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Materials"),
        Cell::new(""),
        Cell::new(quote.materials_cost).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(quote.total).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
    ]);
    table
}

#[must_use]
pub fn build_feature_status_table(status: &FeatureStatus) -> Table {
    let enabled_cell = |is_enabled: bool| {
        if is_enabled {
            Cell::new("enabled").fg(Color::Green)
        } else {
            Cell::new("disabled").fg(Color::Red)
        }
    };
    let mut table = new_table();
    table.set_header(vec!["Surface", "Status", "Reason"]);
    table.add_row(vec![
        Cell::new("Public"),
        enabled_cell(status.is_public_enabled()),
        Cell::new(status.public_reason().unwrap_or("—")).add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![
        Cell::new("Admin"),
        enabled_cell(status.is_admin_enabled()),
        Cell::new(status.admin_reason().unwrap_or("—")).add_attribute(Attribute::Dim),
    ]);
    table
}

#[must_use]
pub fn build_posts_table(posts: &[&Post]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Title", "Category", "Author", "Published"]);
    for post in posts {
        table.add_row(vec![
            Cell::new(&post.title),
            Cell::new(format!("{:?}", post.category)).fg(category_color(post.category)),
            Cell::new(post.author.as_deref().unwrap_or("—")).add_attribute(Attribute::Dim),
            Cell::new(post.created_at.date_naive()),
        ]);
    }
    table
}

#[must_use]
pub fn build_partners_table(partners: &[&Partner]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Partner", "Specialty", "Website"]);
    for partner in partners {
        table.add_row(vec![
            Cell::new(&partner.name),
            Cell::new(partner.specialty.as_deref().unwrap_or("—")),
            Cell::new(partner.website.as_deref().unwrap_or("—")).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

#[must_use]
pub fn build_testimonials_table(testimonials: &[&Testimonial]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Author", "Role", "Rating", "Quote"]);
    for testimonial in testimonials {
        let rating = usize::from(testimonial.rating.min(5));
        table.add_row(vec![
            Cell::new(&testimonial.author),
            Cell::new(testimonial.role.as_deref().unwrap_or("—")).add_attribute(Attribute::Dim),
            Cell::new(format!("{}{}", "★".repeat(rating), "☆".repeat(5 - rating)))
                .fg(Color::DarkYellow),
            Cell::new(&testimonial.quote),
        ]);
    }
    table
}
