use axum::Json;
use serde_json::{json, Value};

use crate::models::{self, ClinicInfo, ServiceOffering, catalog::CLINIC_NAME};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": format!("{} Backend is running", CLINIC_NAME) }))
}

pub async fn hello() -> Json<Value> {
    Json(json!({ "message": format!("Hello from {} API", CLINIC_NAME) }))
}

pub async fn list_services() -> Json<Vec<ServiceOffering>> {
    Json(models::service_catalog())
}

pub async fn clinic_info() -> Json<ClinicInfo> {
    Json(models::clinic_info())
}
