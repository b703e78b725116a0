mod faculty_dto;

pub use faculty_dto::{
    CreateFacultyDto, FacultyCreatedDto, FacultyDeletedDto, FacultyResponseDto, ReassignResultDto,
};
