use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::StoredAppointment;

/// Intake body for `POST /api/appointments`.
///
/// Required fields are `Option` so a missing field is reported by the
/// validator alongside empty ones, instead of failing JSON decoding.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AppointmentRequest {
    #[validate(
        required(message = "field required"),
        length(min = 1, message = "must not be empty")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "field required"),
        length(min = 1, message = "must not be empty")
    )]
    pub phone: Option<String>,
    #[validate(
        required(message = "field required"),
        length(min = 1, message = "must not be empty")
    )]
    pub service: Option<String>,
    #[validate(
        required(message = "field required"),
        length(min = 1, message = "must not be empty")
    )]
    pub preferred_date: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentResponse {
    pub status: String,
    pub id: String,
}

impl CreateAppointmentResponse {
    pub fn success(id: String) -> Self {
        Self {
            status: "success".to_string(),
            id,
        }
    }
}

/// Range checks on `limit` belong to the store adapter.
#[derive(Debug, Deserialize)]
pub struct ListAppointmentsQuery {
    pub limit: Option<i64>,
}

/// Transport form of a stored appointment: the identifier is always hex text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone: String,
    pub service: String,
    pub preferred_date: String,
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<StoredAppointment> for AppointmentRecord {
    fn from(stored: StoredAppointment) -> Self {
        Self {
            id: stored.id.to_hex(),
            name: stored.name,
            phone: stored.phone,
            service: stored.service,
            preferred_date: stored.preferred_date,
            note: stored.note,
            created_at: stored.created_at.map(|dt| dt.to_chrono()),
            updated_at: stored.updated_at.map(|dt| dt.to_chrono()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentList {
    pub items: Vec<AppointmentRecord>,
}
