pub mod assignment;
pub mod auth;
pub mod complaints;
pub mod faculty;
