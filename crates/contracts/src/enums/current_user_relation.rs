use serde::{Deserialize, Serialize};

/// How the current user relates to a backlog item ("mode" picker of the filter bar)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurrentUserRelation {
    AssignedTo,
    CreatedBy,
    ModifiedBy,
}

impl CurrentUserRelation {
    pub fn code(&self) -> &'static str {
        match self {
            CurrentUserRelation::AssignedTo => "assignedTo",
            CurrentUserRelation::CreatedBy => "createdBy",
            CurrentUserRelation::ModifiedBy => "modifiedBy",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CurrentUserRelation::AssignedTo => "Assigned to me",
            CurrentUserRelation::CreatedBy => "Created by me",
            CurrentUserRelation::ModifiedBy => "Modified by me",
        }
    }

    pub fn all() -> Vec<CurrentUserRelation> {
        vec![
            CurrentUserRelation::AssignedTo,
            CurrentUserRelation::CreatedBy,
            CurrentUserRelation::ModifiedBy,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|r| r.code() == code)
    }
}
