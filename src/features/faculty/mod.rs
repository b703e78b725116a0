//! Faculty directory administration.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Role | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/faculty` | admin | Faculty with live workload |
//! | POST | `/api/admin/faculty` | admin | Create a faculty account |
//! | DELETE | `/api/admin/faculty/{id}` | admin | Delete faculty with no pending work |
//! | PUT | `/api/admin/faculty/{from_id}/reassign/{to_id}` | admin | Move pending complaints |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{FacultyLifecycleGuard, FacultyService};
