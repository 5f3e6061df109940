pub mod appointment;
pub mod catalog;

pub use appointment::{Appointment, StoredAppointment};
pub use catalog::{ClinicHours, ClinicInfo, ClinicSocials, ServiceOffering, clinic_info, service_catalog};
