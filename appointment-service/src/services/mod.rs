pub mod appointments;
pub mod diagnostics;
pub mod metrics;
pub mod store;

pub use appointments::{AppointmentError, AppointmentService, APPOINTMENT_COLLECTION};
pub use diagnostics::{DiagnosticsReport, DiagnosticsReporter};
pub use self::metrics::{get_metrics, init_metrics, record_appointment_created};
pub use store::{
    DocumentStore, DocumentStoreExt, MemoryStore, MongoStore, StoreError, StoreProbe,
    DEFAULT_RECENT_LIMIT,
};
