//! Local reservation pricing: the same arithmetic the booking service runs
//! server-side before persisting a reservation.

use crate::{
    api::booking::models::Material,
    quantity::{cost::Cost, hours::Hours, rate::HourlyRate, time_of_day::TimeOfDay},
};

/// Span between the booking boundaries in fractional hours.
///
/// A missing boundary yields zero, and so does `end <= start`: the storefront
/// treats end-before-start as "no duration" rather than an overnight booking
/// or an input error.
#[must_use]
pub fn booked_hours(start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> Hours {
    let (Some(start), Some(end)) = (start, end) else {
        return Hours::ZERO;
    };
    Hours::from(end - start).max(Hours::ZERO)
}

/// One billed line of a quote. `rate` is `None` for free materials.
#[derive(Debug)]
pub struct QuoteLine {
    pub name: String,
    pub rate: Option<HourlyRate>,
    pub cost: Cost,
}

/// Cost breakdown of a prospective reservation.
#[derive(Debug)]
pub struct Quote {
    pub hours: Hours,
    pub laboratory_rate: HourlyRate,
    pub laboratory_cost: Cost,
    pub lines: Vec<QuoteLine>,
    pub materials_cost: Cost,
    pub total: Cost,
}

impl Quote {
    /// Price the laboratory and the selected materials for the given span.
    ///
    /// A material is billed only when it is not free *and* carries a rate;
    /// a free material contributes zero even if a rate is present.
    #[must_use]
    pub fn compute<'a>(
        laboratory_rate: HourlyRate,
        materials: impl IntoIterator<Item = &'a Material>,
        hours: Hours,
    ) -> Self {
        let laboratory_cost = laboratory_rate * hours;
        let lines: Vec<QuoteLine> = materials
            .into_iter()
            .map(|material| {
                let rate = material.billable_rate();
                QuoteLine {
                    name: material.name.clone(),
                    rate,
                    cost: rate.map_or(Cost::ZERO, |rate| rate * hours),
                }
            })
            .collect();
        let materials_cost: Cost = lines.iter().map(|line| line.cost).sum();
        Self {
            hours,
            laboratory_rate,
            laboratory_cost,
            materials_cost,
            total: laboratory_cost + materials_cost,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::Utc;

    use super::*;
    use crate::api::booking::models::MaterialStatus;

    fn material(name: &str, rate: Option<f64>, is_free: bool) -> Material {
        Material {
            id: format!("{name}-id"),
            name: name.to_owned(),
            description: None,
            kind: "instrument".to_owned(),
            hourly_rate: rate.map(HourlyRate::from),
            is_free,
            status: MaterialStatus::Available,
            laboratory_id: "lab-1".to_owned(),
            image_url: None,
            cover_image_path: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn time(string: &str) -> Option<TimeOfDay> {
        Some(string.parse().unwrap())
    }

    #[test]
    fn test_booked_hours_simple() {
        assert_abs_diff_eq!(booked_hours(time("09:00"), time("11:30")).0.0, 2.5);
        assert_abs_diff_eq!(booked_hours(time("09:00"), time("12:00")).0.0, 3.0);
        assert_abs_diff_eq!(booked_hours(time("09:15"), time("09:16")).0.0, 1.0 / 60.0);
    }

    #[test]
    fn test_booked_hours_degenerate() {
        assert_eq!(booked_hours(time("09:00"), time("09:00")), Hours::ZERO);
        assert_eq!(booked_hours(time("12:00"), time("09:00")), Hours::ZERO);
        assert_eq!(booked_hours(None, time("09:00")), Hours::ZERO);
        assert_eq!(booked_hours(time("09:00"), None), Hours::ZERO);
        assert_eq!(booked_hours(None, None), Hours::ZERO);
    }

    #[test]
    fn test_quote_no_materials() {
        let materials: [Material; 0] = [];
        let quote = Quote::compute(HourlyRate::from(50.0), &materials, Hours::from(2.0));
        assert_eq!(quote.laboratory_cost, Cost::from(100.0));
        assert_eq!(quote.materials_cost, Cost::ZERO);
        assert_eq!(quote.total, quote.laboratory_cost);
        assert!(quote.lines.is_empty());
    }

    /// 50 DT/h for 3 hours, one billed material at 10 DT/h and one free one.
    #[test]
    fn test_quote_breakdown() {
        let materials = [material("oscilloscope", Some(10.0), false), material("breadboard", None, true)];
        let quote = Quote::compute(
            HourlyRate::from(50.0),
            &materials,
            booked_hours(time("09:00"), time("12:00")),
        );
        assert_eq!(quote.laboratory_cost, Cost::from(150.0));
        assert_eq!(quote.materials_cost, Cost::from(30.0));
        assert_eq!(quote.total, Cost::from(180.0));
        assert_eq!(quote.lines.len(), 2);
        assert_eq!(quote.lines[0].cost, Cost::from(30.0));
        assert_eq!(quote.lines[1].rate, None);
        assert_eq!(quote.lines[1].cost, Cost::ZERO);
    }

    /// A free material contributes nothing even when a rate is present.
    #[test]
    fn test_quote_free_material_with_rate() {
        let materials = [material("spectrometer", Some(25.0), true)];
        let quote = Quote::compute(HourlyRate::from(40.0), &materials, Hours::from(2.0));
        assert_eq!(quote.lines[0].rate, None);
        assert_eq!(quote.materials_cost, Cost::ZERO);
        assert_eq!(quote.total, Cost::from(80.0));
    }

    #[test]
    fn test_quote_permutation_invariance() {
        let mut materials = vec![
            material("a", Some(10.0), false),
            material("b", None, true),
            material("c", Some(2.5), false),
        ];
        let hours = Hours::from(4.0);
        let forward = Quote::compute(HourlyRate::from(30.0), &materials, hours);
        materials.reverse();
        let backward = Quote::compute(HourlyRate::from(30.0), &materials, hours);
        assert_eq!(forward.materials_cost, backward.materials_cost);
        assert_eq!(forward.total, backward.total);
    }

    #[test]
    fn test_quote_zero_hours() {
        let materials = [material("a", Some(10.0), false)];
        let quote = Quote::compute(HourlyRate::from(50.0), &materials, Hours::ZERO);
        assert_eq!(quote.total, Cost::ZERO);
    }

    /// Pure computation: the same inputs always price the same.
    #[test]
    fn test_quote_idempotent() {
        let materials = [material("a", Some(10.0), false)];
        let first = Quote::compute(HourlyRate::from(50.0), &materials, Hours::from(1.5));
        let second = Quote::compute(HourlyRate::from(50.0), &materials, Hours::from(1.5));
        assert_eq!(first.total, second.total);
        assert_eq!(first.laboratory_cost, second.laboratory_cost);
        assert_eq!(first.materials_cost, second.materials_cost);
    }
}
