// src/models/member.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A user's standing within a chat, as reported by the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Creator,
    Administrator,
    Member,
    Left,
}

impl MemberStatus {
    pub fn is_admin(self) -> bool {
        matches!(self, MemberStatus::Creator | MemberStatus::Administrator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    Private,
    Group,
}

/// DTO fed by the chat adapter whenever it learns about a chat member.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertMemberRequest {
    #[validate(length(min = 1, max = 128))]
    pub display_name: String,
    pub status: MemberStatus,
    pub kind: ChatKind,
}
