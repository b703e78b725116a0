use std::collections::HashMap;

use uuid::Uuid;

use super::department::resolve_department;
use super::workload::WorkloadCalculator;
use crate::core::error::{AppError, Result};
use crate::features::assignment::dtos::Suggestion;
use crate::features::complaints::models::Complaint;
use crate::features::faculty::models::FacultyProfile;
use crate::shared::constants::UNKNOWN_DEPARTMENT;

/// Confidence reported when the candidate set has exactly one member
pub const SINGLE_CANDIDATE_CONFIDENCE: f64 = 0.85;

const BASE_CONFIDENCE: f64 = 0.9;
const WORKLOAD_PENALTY: f64 = 0.05;
pub const MIN_CONFIDENCE: f64 = 0.55;
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Fixed heuristic, not a probability: one candidate -> 0.85,
/// otherwise `clamp(0.9 - workload * 0.05, 0.55, 0.95)`.
pub fn confidence(candidate_count: usize, workload: i64) -> f64 {
    if candidate_count == 1 {
        SINGLE_CANDIDATE_CONFIDENCE
    } else {
        (BASE_CONFIDENCE - workload as f64 * WORKLOAD_PENALTY).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
    }
}

/// Faculty eligible for one assignment decision, in pool order
#[derive(Debug)]
pub struct CandidateSet<'a> {
    pub department: &'static str,
    pub department_matched: bool,
    pub members: Vec<&'a FacultyProfile>,
}

impl CandidateSet<'_> {
    pub fn ids(&self) -> Vec<Uuid> {
        self.members.iter().map(|f| f.id).collect()
    }
}

/// Keep faculty whose department equals the resolved one (case-insensitive);
/// when nobody matches, every faculty member is a candidate.
pub fn candidate_set<'a>(category: &str, pool: &'a [FacultyProfile]) -> CandidateSet<'a> {
    let department = resolve_department(category);

    let matched: Vec<&FacultyProfile> = pool
        .iter()
        .filter(|f| {
            f.department
                .as_deref()
                .is_some_and(|d| d.to_lowercase() == department.to_lowercase())
        })
        .collect();

    if matched.is_empty() {
        CandidateSet {
            department,
            department_matched: false,
            members: pool.iter().collect(),
        }
    } else {
        CandidateSet {
            department,
            department_matched: true,
            members: matched,
        }
    }
}

/// Pick the candidate with the lowest workload; ties go to the earliest in pool order.
/// A candidate missing from `workloads` counts as idle.
pub fn rank(candidates: &CandidateSet<'_>, workloads: &HashMap<Uuid, i64>) -> Result<Suggestion> {
    let load_of = |id: &Uuid| workloads.get(id).copied().unwrap_or(0);

    // min_by_key keeps the first of equal minima
    let best: &FacultyProfile = candidates
        .members
        .iter()
        .copied()
        .min_by_key(|f| load_of(&f.id))
        .ok_or_else(|| AppError::NoSuitableFaculty {
            department: candidates.department.to_string(),
        })?;

    let workload = load_of(&best.id);

    let reason = if candidates.department_matched {
        format!(
            "Matched department \"{}\" and has lowest workload ({} active complaints).",
            candidates.department, workload
        )
    } else {
        format!(
            "No exact department match found. Selected faculty with lowest workload ({} active complaints).",
            workload
        )
    };

    Ok(Suggestion {
        faculty_id: best.id,
        faculty_name: best.name.clone(),
        department: best
            .department
            .clone()
            .unwrap_or_else(|| UNKNOWN_DEPARTMENT.to_string()),
        workload,
        confidence: confidence(candidates.members.len(), workload),
        reason,
    })
}

/// Produces a recommendation for a complaint. Reads workloads, never writes.
#[derive(Clone)]
pub struct FacultySelector {
    workload: WorkloadCalculator,
}

impl FacultySelector {
    pub fn new(workload: WorkloadCalculator) -> Self {
        Self { workload }
    }

    pub async fn recommend(
        &self,
        complaint: &Complaint,
        pool: &[FacultyProfile],
    ) -> Result<Suggestion> {
        if pool.is_empty() {
            return Err(AppError::NoFacultyAvailable);
        }

        let candidates = candidate_set(&complaint.category, pool);
        if candidates.members.is_empty() {
            return Err(AppError::NoSuitableFaculty {
                department: candidates.department.to_string(),
            });
        }

        let workloads = self.workload.compute_many(&candidates.ids()).await?;

        tracing::debug!(
            "Ranking {} candidates for complaint {} (department={}, matched={})",
            candidates.members.len(),
            complaint.id,
            candidates.department,
            candidates.department_matched
        );

        rank(&candidates, &workloads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faculty(name: &str, department: Option<&str>) -> FacultyProfile {
        FacultyProfile {
            id: Uuid::now_v7(),
            name: name.to_string(),
            email: format!("{}@campus.test", name.to_lowercase()),
            department: department.map(String::from),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_picks_least_loaded_department_match() {
        let a = faculty("A", Some("IT"));
        let b = faculty("B", Some("IT"));
        let pool = vec![a.clone(), b.clone()];
        let workloads = HashMap::from([(a.id, 2), (b.id, 0)]);

        let candidates = candidate_set("IT Services", &pool);
        let suggestion = rank(&candidates, &workloads).unwrap();

        assert_eq!(suggestion.faculty_id, b.id);
        assert_eq!(suggestion.workload, 0);
        assert!(approx(suggestion.confidence, 0.9));
        assert_eq!(
            suggestion.reason,
            "Matched department \"IT\" and has lowest workload (0 active complaints)."
        );
    }

    #[test]
    fn test_single_candidate_confidence_ignores_workload() {
        let c = faculty("C", Some("IT"));
        let other = faculty("D", Some("Academic"));
        let pool = vec![c.clone(), other];
        let workloads = HashMap::from([(c.id, 9)]);

        let candidates = candidate_set("IT Services", &pool);
        let suggestion = rank(&candidates, &workloads).unwrap();

        assert_eq!(suggestion.faculty_id, c.id);
        assert_eq!(suggestion.workload, 9);
        assert!(approx(suggestion.confidence, SINGLE_CANDIDATE_CONFIDENCE));
    }

    #[test]
    fn test_falls_back_to_whole_pool_without_match() {
        let pool = vec![faculty("A", Some("IT")), faculty("B", None)];
        let candidates = candidate_set("Food Services", &pool);

        assert!(!candidates.department_matched);
        assert_eq!(candidates.members.len(), 2);

        let suggestion = rank(&candidates, &HashMap::new()).unwrap();
        assert!(suggestion
            .reason
            .starts_with("No exact department match found."));
        assert_eq!(suggestion.faculty_id, pool[0].id);
    }

    #[test]
    fn test_department_match_excludes_non_matching_faculty() {
        let pool = vec![
            faculty("A", Some("Academic")),
            faculty("B", Some("maintenance")),
            faculty("C", None),
            faculty("D", Some("MAINTENANCE")),
        ];
        let candidates = candidate_set("Infrastructure", &pool);

        assert!(candidates.department_matched);
        let names: Vec<&str> = candidates.members.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["B", "D"]);
    }

    #[test]
    fn test_ties_break_by_pool_order() {
        let pool = vec![
            faculty("First", Some("IT")),
            faculty("Second", Some("IT")),
            faculty("Third", Some("IT")),
        ];
        let workloads = HashMap::from([(pool[0].id, 3), (pool[1].id, 1), (pool[2].id, 1)]);

        let suggestion = rank(&candidate_set("IT Services", &pool), &workloads).unwrap();
        assert_eq!(suggestion.faculty_name, "Second");
    }

    #[test]
    fn test_never_picks_a_more_loaded_candidate() {
        let pool: Vec<FacultyProfile> = (0..8)
            .map(|i| faculty(&format!("F{}", i), Some("Academic")))
            .collect();
        let loads = [5, 3, 7, 2, 9, 2, 4, 6];
        let workloads: HashMap<Uuid, i64> =
            pool.iter().zip(loads).map(|(f, l)| (f.id, l)).collect();

        let suggestion = rank(&candidate_set("Academic", &pool), &workloads).unwrap();

        assert!(workloads.values().all(|w| *w >= suggestion.workload));
        assert_eq!(suggestion.faculty_name, "F3");
    }

    #[test]
    fn test_missing_department_reported_as_na() {
        let pool = vec![faculty("Solo", None)];
        let suggestion = rank(&candidate_set("Others", &pool), &HashMap::new()).unwrap();
        assert_eq!(suggestion.department, "N/A");
    }

    #[test]
    fn test_confidence_formula_and_bounds() {
        assert!(approx(confidence(1, 0), 0.85));
        assert!(approx(confidence(1, 40), 0.85));
        assert!(approx(confidence(2, 0), 0.9));
        assert!(approx(confidence(2, 1), 0.85));
        assert!(approx(confidence(3, 4), 0.7));
        assert!(approx(confidence(3, 7), 0.55));
        assert!(approx(confidence(3, 100), MIN_CONFIDENCE));

        for workload in 0..50 {
            let c = confidence(5, workload);
            assert!((MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&c));
        }
    }

    #[test]
    fn test_empty_candidate_set_is_no_suitable_faculty() {
        let pool: Vec<FacultyProfile> = Vec::new();
        let candidates = candidate_set("Academic", &pool);

        let err = rank(&candidates, &HashMap::new()).unwrap_err();
        assert!(matches!(err, AppError::NoSuitableFaculty { ref department } if department == "Academic"));
    }
}
