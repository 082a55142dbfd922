use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::JudgeAssignment;
use crate::models::judge_assignment::{DEFAULT_JUDGE_ROLE, JUDGE_ROLES};

/// Request payload for assigning a judge to a competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AssignJudgeRequest {
    pub judge_id: Uuid,

    #[validate(custom(function = "validate_judge_role"))]
    #[serde(default = "default_judge_role")]
    pub judge_role: String,

    #[validate(length(max = 2000))]
    pub assignment_notes: Option<String>,

    pub assigned_by: Option<Uuid>,
}

fn default_judge_role() -> String {
    DEFAULT_JUDGE_ROLE.to_string()
}

fn validate_judge_role(role: &str) -> Result<(), validator::ValidationError> {
    if JUDGE_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_judge_role"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JudgeInfo {
    pub member_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JudgeCompetitionInfo {
    pub competition_id: Uuid,
    pub name: String,
    pub judging_date: Option<DateTime<Utc>>,
}

/// An active assignment joined with the judge's member record and a
/// competition summary.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JudgeAssignmentResponse {
    #[serde(flatten)]
    pub assignment: JudgeAssignment,
    pub judge: JudgeInfo,
    pub competition: JudgeCompetitionInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn request(role: &str) -> AssignJudgeRequest {
        AssignJudgeRequest {
            judge_id: Uuid::new_v4(),
            judge_role: role.to_string(),
            assignment_notes: None,
            assigned_by: None,
        }
    }

    #[test]
    fn known_roles_validate() {
        for role in JUDGE_ROLES {
            assert!(request(role).validate().is_ok(), "{role} should be valid");
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(request("head_brewer").validate().is_err());
    }

    #[test]
    fn role_defaults_to_club_judge() {
        let req: AssignJudgeRequest =
            serde_json::from_str(&format!(r#"{{"judge_id":"{}"}}"#, Uuid::new_v4())).unwrap();
        assert_eq!(req.judge_role, "club_judge");
    }
}
