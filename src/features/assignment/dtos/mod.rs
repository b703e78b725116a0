mod assignment_dto;

pub use assignment_dto::{
    AssigneeDto, AssignmentResultDto, AutoAssignRequestDto, ManualAssignDto, RecommendRequestDto,
    Suggestion,
};
