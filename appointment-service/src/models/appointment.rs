use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::dtos::AppointmentRequest;

/// A validated appointment, ready to be written.
///
/// Only obtainable through `TryFrom<AppointmentRequest>`, so nothing reaches
/// the store without passing validation first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    pub name: String,
    pub phone: String,
    pub service: String,
    pub preferred_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TryFrom<AppointmentRequest> for Appointment {
    type Error = ValidationErrors;

    fn try_from(request: AppointmentRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        // validate() guarantees every required field is present
        Ok(Appointment {
            name: request.name.unwrap_or_default(),
            phone: request.phone.unwrap_or_default(),
            service: request.service.unwrap_or_default(),
            preferred_date: request.preferred_date.unwrap_or_default(),
            note: request.note,
        })
    }
}

/// An appointment as read back from the `appointment` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredAppointment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub phone: String,
    pub service: String,
    pub preferred_date: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime>,
    #[serde(default)]
    pub updated_at: Option<DateTime>,
}
