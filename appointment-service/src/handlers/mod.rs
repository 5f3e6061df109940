//! HTTP handlers for appointment-service.

pub mod appointments;
pub mod catalog;
pub mod diagnostics;
pub mod health;

pub use appointments::{create_appointment, list_appointments};
pub use catalog::{clinic_info, hello, list_services, root};
pub use diagnostics::test_database;
pub use health::{health_check, metrics, readiness_check};
