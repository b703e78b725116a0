pub mod assignment_handler;

pub use assignment_handler::{
    __path_auto_assign, __path_manual_assign, __path_recommend_faculty, auto_assign,
    manual_assign, recommend_faculty,
};
