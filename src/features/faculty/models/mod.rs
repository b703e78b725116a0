mod user;

pub use user::{FacultyProfile, NewUser, User, UserRole};
