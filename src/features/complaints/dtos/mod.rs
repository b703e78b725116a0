mod complaint_dto;

pub use complaint_dto::{
    AuditNoteDto, ComplaintListQuery, ComplaintResponseDto, CreateComplaintDto, UpdateStatusDto,
};
