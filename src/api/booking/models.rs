//! Wire DTOs of the laboratory/reservation service.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::quantity::{cost::Cost, rate::HourlyRate, time_of_day::TimeOfDay};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Laboratory {
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub cover_image_path: Option<String>,

    pub hourly_rate: HourlyRate,

    /// Populated by the service on the detail endpoint only.
    #[serde(default)]
    pub materials: Option<Vec<Material>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub kind: String,

    /// Meaningful only when the material is not free.
    #[serde(default)]
    pub hourly_rate: Option<HourlyRate>,

    pub is_free: bool,

    pub status: MaterialStatus,

    pub laboratory_id: String,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub cover_image_path: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Material {
    /// Rate the material is actually billed at: `None` when it is free,
    /// whatever rate the document happens to carry.
    #[must_use]
    pub fn billable_rate(&self) -> Option<HourlyRate> {
        if self.is_free { None } else { self.hourly_rate }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MaterialStatus {
    Available,
    Unavailable,
    Maintenance,
}

impl MaterialStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::Maintenance => "maintenance",
        }
    }
}

/// Mongo-style reference that the service may or may not have populated
/// into the full document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Linked<T> {
    Id(String),
    Document(Box<T>),
}

impl<T> Linked<T> {
    pub fn document(&self) -> Option<&T> {
        match self {
            Self::Id(_) => None,
            Self::Document(document) => Some(document),
        }
    }
}

impl Linked<Laboratory> {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Document(laboratory) => &laboratory.id,
        }
    }
}

impl Linked<Material> {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Document(material) => &material.id,
        }
    }
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(rename = "_id")]
    pub id: String,

    pub full_name: String,

    pub email: String,

    pub phone_number: String,

    #[serde(rename = "laboratoryId")]
    pub laboratory: Linked<Laboratory>,

    #[serde(default)]
    pub materials: Vec<Linked<Material>>,

    pub reservation_date: DateTime<Utc>,

    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub start_time: TimeOfDay,

    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub end_time: TimeOfDay,

    #[serde(default)]
    pub notes: Option<String>,

    /// Recomputed and stored by the service, may lag behind rate changes.
    #[serde(default)]
    pub total_cost: Option<Cost>,

    pub status: ReservationStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, clap::ValueEnum, enumset::EnumSetType)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

/// The assembled reservation request, as entered on the booking form.
#[serde_as]
#[derive(Debug, Serialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[builder(into)]
    pub full_name: String,

    #[builder(into)]
    pub email: String,

    #[builder(into)]
    pub phone_number: String,

    /// Identifiers of the selected materials.
    pub materials: Vec<String>,

    pub reservation_date: NaiveDate,

    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub start_time: TimeOfDay,

    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub end_time: TimeOfDay,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<Cost>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Server-side filtering of the laboratory listing.
#[derive(Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaboratoryFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rate: Option<HourlyRate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rate: Option<HourlyRate>,
}

pub struct CreateLaboratoryRequest {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hourly_rate: HourlyRate,
    pub image: Option<PathBuf>,
}

impl CreateLaboratoryRequest {
    pub(super) fn into_fields(self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title),
            ("hourlyRate", self.hourly_rate.0.to_string()),
        ];
        if let Some(description) = self.description {
            fields.push(("description", description));
        }
        if let Some(image_url) = self.image_url {
            fields.push(("imageUrl", image_url));
        }
        fields
    }
}

#[derive(Default)]
pub struct UpdateLaboratoryRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub hourly_rate: Option<HourlyRate>,
    pub image: Option<PathBuf>,
}

impl UpdateLaboratoryRequest {
    pub(super) fn into_fields(self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(title) = self.title {
            fields.push(("title", title));
        }
        if let Some(description) = self.description {
            fields.push(("description", description));
        }
        if let Some(image_url) = self.image_url {
            fields.push(("imageUrl", image_url));
        }
        if let Some(hourly_rate) = self.hourly_rate {
            fields.push(("hourlyRate", hourly_rate.0.to_string()));
        }
        fields
    }
}

pub struct CreateMaterialRequest {
    pub name: String,
    pub description: Option<String>,
    pub kind: String,
    /// Omitted from the form entirely when the material is free.
    pub hourly_rate: Option<HourlyRate>,
    pub is_free: bool,
    pub status: MaterialStatus,
    pub image: Option<PathBuf>,
}

impl CreateMaterialRequest {
    pub(super) fn into_fields(self, laboratory_id: &str) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name),
            ("type", self.kind),
            ("isFree", self.is_free.to_string()),
            ("status", self.status.as_str().to_owned()),
            ("laboratoryId", laboratory_id.to_owned()),
        ];
        if let Some(description) = self.description {
            fields.push(("description", description));
        }
        if !self.is_free
            && let Some(hourly_rate) = self.hourly_rate
        {
            fields.push(("hourlyRate", hourly_rate.0.to_string()));
        }
        fields
    }
}

#[derive(Default)]
pub struct UpdateMaterialRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub hourly_rate: Option<HourlyRate>,
    pub is_free: Option<bool>,
    pub status: Option<MaterialStatus>,
    pub image: Option<PathBuf>,
}

impl UpdateMaterialRequest {
    pub(super) fn into_fields(self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(name) = self.name {
            fields.push(("name", name));
        }
        if let Some(description) = self.description {
            fields.push(("description", description));
        }
        if let Some(kind) = self.kind {
            fields.push(("type", kind));
        }
        if let Some(hourly_rate) = self.hourly_rate {
            fields.push(("hourlyRate", hourly_rate.0.to_string()));
        }
        if let Some(is_free) = self.is_free {
            fields.push(("isFree", is_free.to_string()));
        }
        if let Some(status) = self.status {
            fields.push(("status", status.as_str().to_owned()));
        }
        fields
    }
}

/// The booking feature flag document, with the legacy single-flag fields
/// taking precedence over the public/admin split when present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStatus {
    #[serde(default)]
    is_enabled: Option<bool>,

    is_enabled_public: bool,

    is_enabled_admin: bool,

    #[serde(default)]
    reason: Option<String>,

    #[serde(default)]
    reason_public: Option<String>,

    #[serde(default)]
    reason_admin: Option<String>,
}

impl FeatureStatus {
    #[must_use]
    pub const fn is_public_enabled(&self) -> bool {
        match self.is_enabled {
            Some(is_enabled) => is_enabled,
            None => self.is_enabled_public,
        }
    }

    #[must_use]
    pub fn public_reason(&self) -> Option<&str> {
        self.reason.as_deref().or(self.reason_public.as_deref())
    }

    #[must_use]
    pub const fn is_admin_enabled(&self) -> bool {
        self.is_enabled_admin
    }

    #[must_use]
    pub fn admin_reason(&self) -> Option<&str> {
        self.reason_admin.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::Result;

    use super::*;

    #[test]
    fn test_deserialize_laboratory_with_materials() -> Result {
        // language=JSON
        const LABORATORY: &str = r#"
            {
                "_id": "66501b2f9c1e4a0012ab34cd",
                "title": "Electronics lab",
                "description": "Soldering stations and measurement benches",
                "hourlyRate": 50,
                "materials": [
                    {
                        "_id": "66501b2f9c1e4a0012ab34ce",
                        "name": "Oscilloscope",
                        "type": "instrument",
                        "hourlyRate": 10,
                        "isFree": false,
                        "status": "available",
                        "laboratoryId": "66501b2f9c1e4a0012ab34cd",
                        "createdAt": "2026-01-10T08:00:00.000Z",
                        "updatedAt": "2026-01-10T08:00:00.000Z"
                    },
                    {
                        "_id": "66501b2f9c1e4a0012ab34cf",
                        "name": "Breadboard kit",
                        "type": "consumable",
                        "isFree": true,
                        "status": "maintenance",
                        "laboratoryId": "66501b2f9c1e4a0012ab34cd",
                        "createdAt": "2026-01-10T08:00:00.000Z",
                        "updatedAt": "2026-01-10T08:00:00.000Z"
                    }
                ],
                "createdAt": "2026-01-01T00:00:00.000Z",
                "updatedAt": "2026-02-01T00:00:00.000Z"
            }
        "#;
        let laboratory = serde_json::from_str::<Laboratory>(LABORATORY)?;
        assert_eq!(laboratory.hourly_rate, HourlyRate::from(50.0));
        let materials = laboratory.materials.unwrap();
        assert_eq!(materials[0].billable_rate(), Some(HourlyRate::from(10.0)));
        assert_eq!(materials[1].billable_rate(), None);
        assert_eq!(materials[1].status, MaterialStatus::Maintenance);
        Ok(())
    }

    #[test]
    fn test_deserialize_reservation_unpopulated() -> Result {
        // language=JSON
        const RESERVATION: &str = r#"
            {
                "_id": "66501b2f9c1e4a0012ab34d0",
                "fullName": "Amira Ben Salah",
                "email": "amira@example.org",
                "phoneNumber": "+216 20 123 456",
                "laboratoryId": "66501b2f9c1e4a0012ab34cd",
                "materials": ["66501b2f9c1e4a0012ab34ce"],
                "reservationDate": "2026-09-15T00:00:00.000Z",
                "startTime": "09:00",
                "endTime": "12:00",
                "totalCost": 180,
                "status": "pending",
                "createdAt": "2026-08-20T10:00:00.000Z",
                "updatedAt": "2026-08-20T10:00:00.000Z"
            }
        "#;
        let reservation = serde_json::from_str::<Reservation>(RESERVATION)?;
        assert_eq!(reservation.laboratory.id(), "66501b2f9c1e4a0012ab34cd");
        assert!(reservation.laboratory.document().is_none());
        assert_eq!(reservation.materials[0].id(), "66501b2f9c1e4a0012ab34ce");
        assert_eq!(reservation.start_time.to_string(), "09:00");
        assert_eq!(reservation.total_cost, Some(Cost::from(180.0)));
        assert_eq!(reservation.status, ReservationStatus::Pending);
        Ok(())
    }

    #[test]
    fn test_deserialize_reservation_populated() -> Result {
        // language=JSON
        const RESERVATION: &str = r#"
            {
                "_id": "66501b2f9c1e4a0012ab34d0",
                "fullName": "Amira Ben Salah",
                "email": "amira@example.org",
                "phoneNumber": "+216 20 123 456",
                "laboratoryId": {
                    "_id": "66501b2f9c1e4a0012ab34cd",
                    "title": "Electronics lab",
                    "hourlyRate": 50,
                    "createdAt": "2026-01-01T00:00:00.000Z",
                    "updatedAt": "2026-02-01T00:00:00.000Z"
                },
                "materials": [],
                "reservationDate": "2026-09-15T00:00:00.000Z",
                "startTime": "14:00",
                "endTime": "16:30",
                "status": "confirmed",
                "createdAt": "2026-08-20T10:00:00.000Z",
                "updatedAt": "2026-08-21T10:00:00.000Z"
            }
        "#;
        let reservation = serde_json::from_str::<Reservation>(RESERVATION)?;
        let laboratory = reservation.laboratory.document().unwrap();
        assert_eq!(laboratory.title, "Electronics lab");
        assert_eq!(reservation.laboratory.id(), "66501b2f9c1e4a0012ab34cd");
        assert_eq!(reservation.total_cost, None);
        Ok(())
    }

    #[test]
    fn test_serialize_create_reservation_request() -> Result {
        let request = CreateReservationRequest::builder()
            .full_name("Amira Ben Salah")
            .email("amira@example.org")
            .phone_number("+216 20 123 456")
            .materials(vec!["66501b2f9c1e4a0012ab34ce".to_owned()])
            .reservation_date("2026-09-15".parse()?)
            .start_time("09:00".parse()?)
            .end_time("12:00".parse()?)
            .build();
        let json = serde_json::to_value(&request)?;
        assert_eq!(json["fullName"], "Amira Ben Salah");
        assert_eq!(json["reservationDate"], "2026-09-15");
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "12:00");
        assert!(json.get("notes").is_none());
        Ok(())
    }

    #[test]
    fn test_material_form_fields_omit_rate_when_free() {
        let request = CreateMaterialRequest {
            name: "Breadboard kit".to_owned(),
            description: None,
            kind: "consumable".to_owned(),
            hourly_rate: Some(HourlyRate::from(5.0)),
            is_free: true,
            status: MaterialStatus::Available,
            image: None,
        };
        let fields = request.into_fields("lab-1");
        assert!(fields.iter().all(|(key, _)| *key != "hourlyRate"));
        assert!(fields.contains(&("isFree", "true".to_owned())));
        assert!(fields.contains(&("laboratoryId", "lab-1".to_owned())));
    }

    #[test]
    fn test_feature_status_legacy_wins() -> Result {
        // language=JSON
        const STATUS: &str = r#"
            {
                "_id": "66501b2f9c1e4a0012ab34d1",
                "identifier": "laboratories",
                "isEnabled": false,
                "isEnabledPublic": true,
                "isEnabledAdmin": true,
                "reason": "Yearly maintenance",
                "reasonPublic": "ignored",
                "createdAt": "2026-01-01T00:00:00.000Z",
                "updatedAt": "2026-01-01T00:00:00.000Z"
            }
        "#;
        let status = serde_json::from_str::<FeatureStatus>(STATUS)?;
        assert!(!status.is_public_enabled());
        assert_eq!(status.public_reason(), Some("Yearly maintenance"));
        assert!(status.is_admin_enabled());
        assert_eq!(status.admin_reason(), None);
        Ok(())
    }

    #[test]
    fn test_feature_status_split_fields() -> Result {
        // language=JSON
        const STATUS: &str = r#"
            {
                "isEnabledPublic": false,
                "isEnabledAdmin": true,
                "reasonPublic": "Summer break"
            }
        "#;
        let status = serde_json::from_str::<FeatureStatus>(STATUS)?;
        assert!(!status.is_public_enabled());
        assert_eq!(status.public_reason(), Some("Summer break"));
        Ok(())
    }

    #[test]
    fn test_filters_query_string_round_trip() -> Result {
        let filters = LaboratoryFilters {
            search: Some("chem".to_owned()),
            min_rate: Some(HourlyRate::from(10.0)),
            max_rate: None,
        };
        let query = serde_qs::to_string(&filters)?;
        assert!(query.starts_with("search=chem"));
        assert!(query.contains("minRate="));
        assert!(!query.contains("maxRate"));
        assert_eq!(serde_qs::from_str::<LaboratoryFilters>(&query)?, filters);
        Ok(())
    }
}
