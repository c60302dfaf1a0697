use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::BacklogItemType;

/// Уникальный идентификатор элемента бэклога
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BacklogItemId(pub Uuid);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReferenceDto {
    pub id: Uuid,
    pub name: String,
}

/// Строка списка бэклога, как её отдаёт списочный endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklogItemListItemDto {
    pub id: BacklogItemId,
    /// Human-friendly sequential number, the default sort column
    pub number: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: BacklogItemType,
    pub state: String,
    pub assignee: Option<UserReferenceDto>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created: DateTime<Utc>,
    pub last_updated: Option<DateTime<Utc>>,
}
