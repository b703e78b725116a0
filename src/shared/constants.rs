/// Maximum complaint title length, counted after trimming
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum number of attachment references per complaint
pub const MAX_ATTACHMENTS: usize = 3;

/// Department reported on a suggestion when the faculty member has none
pub const UNKNOWN_DEPARTMENT: &str = "N/A";
