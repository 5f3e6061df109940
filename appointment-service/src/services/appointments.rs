use std::sync::Arc;
use thiserror::Error;

use crate::dtos::{AppointmentList, AppointmentRecord, AppointmentRequest, CreateAppointmentResponse};
use crate::models::{Appointment, StoredAppointment};
use crate::services::metrics::record_appointment_created;
use crate::services::store::{DocumentStore, DocumentStoreExt, StoreError, DEFAULT_RECENT_LIMIT};

pub const APPOINTMENT_COLLECTION: &str = "appointment";

#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Appointment intake and listing on top of a [`DocumentStore`].
#[derive(Clone)]
pub struct AppointmentService {
    store: Arc<dyn DocumentStore>,
}

impl AppointmentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Validates and persists one appointment. Nothing is written on a
    /// validation failure.
    #[tracing::instrument(skip(self, request))]
    pub async fn create(
        &self,
        request: AppointmentRequest,
    ) -> Result<CreateAppointmentResponse, AppointmentError> {
        let appointment = Appointment::try_from(request)?;

        let id = self
            .store
            .insert_record(APPOINTMENT_COLLECTION, &appointment)
            .await?;

        record_appointment_created();
        tracing::info!(
            appointment_id = %id,
            service = %appointment.service,
            "Appointment created"
        );

        Ok(CreateAppointmentResponse::success(id.to_hex()))
    }

    /// Most recent appointments, newest first. `limit` defaults to
    /// [`DEFAULT_RECENT_LIMIT`].
    #[tracing::instrument(skip(self))]
    pub async fn list_recent(&self, limit: Option<i64>) -> Result<AppointmentList, AppointmentError> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);

        let stored: Vec<StoredAppointment> = self
            .store
            .find_recent_records(APPOINTMENT_COLLECTION, limit)
            .await?;

        Ok(AppointmentList {
            items: stored.into_iter().map(AppointmentRecord::from).collect(),
        })
    }
}
