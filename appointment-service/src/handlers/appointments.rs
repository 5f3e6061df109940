use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use service_core::error::AppError;

use crate::dtos::{AppointmentList, AppointmentRequest, CreateAppointmentResponse, ListAppointmentsQuery};
use crate::startup::AppState;

/// `POST /api/appointments`
///
/// Validation and store failures are both reported as 400 with the
/// underlying message.
#[tracing::instrument(skip(state, payload))]
pub async fn create_appointment(
    State(state): State<AppState>,
    payload: Result<Json<AppointmentRequest>, JsonRejection>,
) -> Result<Json<CreateAppointmentResponse>, AppError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!(error = %e.body_text(), "Malformed appointment body");
        AppError::BadRequest(anyhow::anyhow!(e.body_text()))
    })?;

    let response = state.appointments.create(request).await.map_err(|e| {
        tracing::warn!(error = %e, "Appointment intake rejected");
        AppError::BadRequest(anyhow::Error::new(e))
    })?;

    Ok(Json(response))
}

/// `GET /api/appointments?limit=<n>`
///
/// Every failure on this route, an unusable `limit` included, is a 500.
#[tracing::instrument(skip(state, query))]
pub async fn list_appointments(
    State(state): State<AppState>,
    query: Result<Query<ListAppointmentsQuery>, QueryRejection>,
) -> Result<Json<AppointmentList>, AppError> {
    let Query(query) = query.map_err(|e| AppError::InternalError(anyhow::anyhow!(e.body_text())))?;

    let list = state
        .appointments
        .list_recent(query.limit)
        .await
        .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;

    Ok(Json(list))
}
