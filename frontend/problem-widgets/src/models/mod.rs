use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod answer;
pub mod grading;
pub mod semester;
pub mod submission;
pub mod view;

/// Identifies the problem page a widget belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemRef {
    pub semester_id: Uuid,
    pub problem_id: Uuid,
}

impl ProblemRef {
    pub fn new(semester_id: Uuid, problem_id: Uuid) -> Self {
        Self {
            semester_id,
            problem_id,
        }
    }

    pub fn validate_answer_path(&self) -> String {
        format!(
            "semesters/{}/problems/{}/validate_answer/",
            self.semester_id, self.problem_id
        )
    }

    pub fn run_stdin_path(&self) -> String {
        format!(
            "semesters/{}/problems/{}/run_stdin/",
            self.semester_id, self.problem_id
        )
    }
}
