mod faculty_service;
mod lifecycle_guard;

pub use faculty_service::FacultyService;
pub use lifecycle_guard::FacultyLifecycleGuard;
