//! Complaint filing, listing and status lifecycle.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Role | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/complaints` | student | File a complaint |
//! | GET | `/api/complaints/my` | student | Own complaints |
//! | GET | `/api/complaints` | admin | All complaints, filterable |
//! | PATCH | `/api/complaints/{id}/status` | admin, assigned faculty | Change status |
//! | GET | `/api/faculty/complaints` | faculty | Complaints assigned to me |
//! | PATCH | `/api/faculty/complaints/{id}/status` | assigned faculty | Change status |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ComplaintService;
