//! Complaint-to-faculty assignment.
//!
//! Resolves a complaint's department, ranks faculty by live workload and
//! applies the result, or an admin's explicit choice, to the complaint.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Role | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/assignment/recommend` | admin | Recommend faculty, no mutation |
//! | POST | `/api/assignment/auto-assign` | admin | Assign the recommended faculty |
//! | PUT | `/api/complaints/{id}/assign` | admin | Assign a chosen faculty |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::{AssignmentService, FacultySelector, WorkloadCalculator};
