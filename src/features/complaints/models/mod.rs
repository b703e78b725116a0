mod complaint;

pub use complaint::{
    AuditNote, AuditTrail, Complaint, ComplaintPriority, ComplaintRow, ComplaintStatus,
    NewComplaint,
};
