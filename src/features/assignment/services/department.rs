/// Department that receives complaints whose category is not listed below
pub const DEFAULT_DEPARTMENT: &str = "Administration";

/// Complaint category -> handling department
pub const CATEGORY_DEPARTMENTS: &[(&str, &str)] = &[
    ("Infrastructure", "Maintenance"),
    ("Food Services", "Food Services"),
    ("IT Services", "IT"),
    ("Academic", "Academic"),
    ("Administration", "Administration"),
    ("Others", "Administration"),
];

/// Resolve the department responsible for a complaint category.
///
/// Category names are matched exactly; anything unmapped goes to [`DEFAULT_DEPARTMENT`].
pub fn resolve_department(category: &str) -> &'static str {
    CATEGORY_DEPARTMENTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, department)| *department)
        .unwrap_or(DEFAULT_DEPARTMENT)
}
