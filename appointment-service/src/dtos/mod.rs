pub mod appointments;

pub use appointments::{
    AppointmentList, AppointmentRecord, AppointmentRequest, CreateAppointmentResponse,
    ListAppointmentsQuery,
};
