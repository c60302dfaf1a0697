use serde::{Deserialize, Serialize};

/// Тип элемента бэклога
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BacklogItemType {
    Bug,
    UserStory,
}

impl BacklogItemType {
    /// Value used in the query string and by the list endpoint
    pub fn code(&self) -> &'static str {
        match self {
            BacklogItemType::Bug => "bug",
            BacklogItemType::UserStory => "userStory",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BacklogItemType::Bug => "Bug",
            BacklogItemType::UserStory => "User Story",
        }
    }

    pub fn all() -> Vec<BacklogItemType> {
        vec![BacklogItemType::Bug, BacklogItemType::UserStory]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "bug" => Some(BacklogItemType::Bug),
            "userStory" => Some(BacklogItemType::UserStory),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_serde_names() {
        for item_type in BacklogItemType::all() {
            let json = serde_json::to_string(&item_type).unwrap();
            assert_eq!(json, format!("\"{}\"", item_type.code()));
            assert_eq!(BacklogItemType::from_code(item_type.code()), Some(item_type));
        }
        assert_eq!(BacklogItemType::from_code("unknown"), None);
    }
}
