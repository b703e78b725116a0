mod complaint_service;
pub mod lifecycle;

pub use complaint_service::ComplaintService;
