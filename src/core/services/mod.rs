pub mod enrollment;

pub use enrollment::{EnrollmentReceipt, EnrollmentService};
