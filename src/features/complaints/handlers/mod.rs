pub mod complaint_handler;

pub use complaint_handler::{
    __path_create_complaint, __path_list_assigned_complaints, __path_list_complaints,
    __path_list_my_complaints, __path_update_assigned_complaint_status,
    __path_update_complaint_status, create_complaint, list_assigned_complaints, list_complaints,
    list_my_complaints, update_assigned_complaint_status, update_complaint_status,
};
