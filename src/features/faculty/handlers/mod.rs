pub mod faculty_handler;

pub use faculty_handler::{
    __path_create_faculty, __path_delete_faculty, __path_list_faculty, __path_reassign_faculty,
    create_faculty, delete_faculty, list_faculty, reassign_faculty, FacultyState,
};
