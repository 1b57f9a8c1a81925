// src/services/directory.rs

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::models::member::{ChatKind, MemberStatus};

/// A per-id lookup failure. The caller decides whether it is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    UnknownChat(i64),
    NameResolutionFailed { chat_id: i64, user_id: i64 },
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::UnknownChat(chat_id) => write!(f, "unknown chat {chat_id}"),
            DirectoryError::NameResolutionFailed { chat_id, user_id } => {
                write!(f, "user {user_id} is not a member of chat {chat_id}")
            }
        }
    }
}

impl std::error::Error for DirectoryError {}

/// Chat-platform view of chats and their members.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn display_name(&self, chat_id: i64, user_id: i64) -> Result<String, DirectoryError>;

    async fn member_status(&self, chat_id: i64, user_id: i64)
    -> Result<MemberStatus, DirectoryError>;

    async fn chat_kind(&self, chat_id: i64) -> Result<ChatKind, DirectoryError>;
}

#[derive(Debug, Clone)]
struct Member {
    display_name: String,
    status: MemberStatus,
}

#[derive(Debug, Default)]
struct Chats {
    kinds: HashMap<i64, ChatKind>,
    members: HashMap<(i64, i64), Member>,
}

/// Directory kept in memory and fed by the chat adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    chats: Arc<RwLock<Chats>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or refreshes) what the adapter knows about a chat member.
    pub fn upsert_member(
        &self,
        chat_id: i64,
        kind: ChatKind,
        user_id: i64,
        display_name: impl Into<String>,
        status: MemberStatus,
    ) {
        let mut chats = self.chats.write().unwrap_or_else(|p| p.into_inner());
        chats.kinds.insert(chat_id, kind);
        chats.members.insert(
            (chat_id, user_id),
            Member {
                display_name: display_name.into(),
                status,
            },
        );
    }
}

#[async_trait]
impl MemberDirectory for InMemoryDirectory {
    async fn display_name(&self, chat_id: i64, user_id: i64) -> Result<String, DirectoryError> {
        let chats = self.chats.read().unwrap_or_else(|p| p.into_inner());
        match chats.members.get(&(chat_id, user_id)) {
            Some(member) if member.status != MemberStatus::Left => {
                Ok(member.display_name.clone())
            }
            _ => Err(DirectoryError::NameResolutionFailed { chat_id, user_id }),
        }
    }

    async fn member_status(
        &self,
        chat_id: i64,
        user_id: i64,
    ) -> Result<MemberStatus, DirectoryError> {
        let chats = self.chats.read().unwrap_or_else(|p| p.into_inner());
        chats
            .members
            .get(&(chat_id, user_id))
            .map(|m| m.status)
            .ok_or(DirectoryError::NameResolutionFailed { chat_id, user_id })
    }

    async fn chat_kind(&self, chat_id: i64) -> Result<ChatKind, DirectoryError> {
        let chats = self.chats.read().unwrap_or_else(|p| p.into_inner());
        chats
            .kinds
            .get(&chat_id)
            .copied()
            .ok_or(DirectoryError::UnknownChat(chat_id))
    }
}
