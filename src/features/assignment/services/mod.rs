mod assignment_service;
pub mod department;
mod selector;
mod workload;

pub use assignment_service::{AssignmentOutcome, AssignmentService};
pub use selector::FacultySelector;
pub use workload::WorkloadCalculator;
