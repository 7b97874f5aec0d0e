//! In-memory repositories
//!
//! One [`MemoryStore`] implements every repository trait over a single
//! mutex, which gives each method the same atomicity the PostgreSQL
//! repositories provide. Like the database, writes against an unregistered
//! chat are rejected.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use parking_lot::Mutex;
use woxl_core::{
    ChatId, ChatRepository, DomainError, NewWarn, Nick, NickRepository, RepoResult,
    RoleAssignment, RoleAssignmentRepository, RoleLevel, RoleStep, UserId, Warn, WarnRepository,
};

#[derive(Debug, Default)]
struct Tables {
    chats: BTreeSet<ChatId>,
    roles: BTreeMap<(ChatId, UserId), RoleAssignment>,
    nicks: BTreeMap<(ChatId, UserId), Nick>,
    warns: Vec<Warn>,
    next_warn_id: i64,
}

impl Tables {
    fn require_chat(&self, chat_id: ChatId) -> RepoResult<()> {
        if self.chats.contains(&chat_id) {
            Ok(())
        } else {
            Err(DomainError::ValidationError(format!(
                "chat {chat_id} is not registered"
            )))
        }
    }

    /// Active warns of a chat, newest first (ties broken by id, like the index)
    fn active_warns(&self, chat_id: ChatId) -> Vec<&Warn> {
        let mut active: Vec<_> = self
            .warns
            .iter()
            .filter(|w| w.chat_id == chat_id && w.active)
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        active
    }
}

/// Shared in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every warn ever stored in a chat, including revoked ones
    pub fn all_warns(&self, chat_id: ChatId) -> Vec<Warn> {
        self.tables
            .lock()
            .warns
            .iter()
            .filter(|w| w.chat_id == chat_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ChatRepository for MemoryStore {
    async fn ensure(&self, id: ChatId) -> RepoResult<()> {
        self.tables.lock().chats.insert(id);
        Ok(())
    }

    async fn exists(&self, id: ChatId) -> RepoResult<bool> {
        Ok(self.tables.lock().chats.contains(&id))
    }
}

#[async_trait]
impl RoleAssignmentRepository for MemoryStore {
    async fn find(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<Option<RoleAssignment>> {
        Ok(self.tables.lock().roles.get(&(chat_id, user_id)).cloned())
    }

    async fn find_by_chat(&self, chat_id: ChatId) -> RepoResult<Vec<RoleAssignment>> {
        let tables = self.tables.lock();
        let mut found: Vec<_> = tables
            .roles
            .values()
            .filter(|ra| ra.chat_id == chat_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.level.cmp(&a.level).then(a.assigned_at.cmp(&b.assigned_at)));
        Ok(found)
    }

    async fn upsert(&self, assignment: &RoleAssignment) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        tables.require_chat(assignment.chat_id)?;
        tables
            .roles
            .insert((assignment.chat_id, assignment.user_id), assignment.clone());
        Ok(())
    }

    async fn delete(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<Option<RoleAssignment>> {
        Ok(self.tables.lock().roles.remove(&(chat_id, user_id)))
    }

    async fn step(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        step: RoleStep,
    ) -> RepoResult<(RoleLevel, RoleLevel)> {
        let mut tables = self.tables.lock();
        let assignment = tables
            .roles
            .get_mut(&(chat_id, user_id))
            .ok_or(DomainError::RoleNotFound(user_id))?;

        let old = assignment.level;
        let new = step.apply(old)?;
        assignment.set_level(new);
        Ok((old, new))
    }
}

#[async_trait]
impl NickRepository for MemoryStore {
    async fn find(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<Option<Nick>> {
        Ok(self.tables.lock().nicks.get(&(chat_id, user_id)).cloned())
    }

    async fn find_many(&self, chat_id: ChatId, user_ids: &[UserId]) -> RepoResult<Vec<Nick>> {
        let tables = self.tables.lock();
        Ok(user_ids
            .iter()
            .filter_map(|user_id| tables.nicks.get(&(chat_id, *user_id)).cloned())
            .collect())
    }

    async fn upsert(&self, nick: &Nick) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        tables.require_chat(nick.chat_id)?;
        tables.nicks.insert((nick.chat_id, nick.user_id), nick.clone());
        Ok(())
    }
}

#[async_trait]
impl WarnRepository for MemoryStore {
    async fn create(&self, warn: &NewWarn) -> RepoResult<Warn> {
        let mut tables = self.tables.lock();
        tables.require_chat(warn.chat_id)?;
        tables.next_warn_id += 1;
        let stored = warn.clone().into_warn(tables.next_warn_id);
        tables.warns.push(stored.clone());
        Ok(stored)
    }

    async fn count_active(&self, chat_id: ChatId) -> RepoResult<u64> {
        Ok(self.tables.lock().active_warns(chat_id).len() as u64)
    }

    async fn find_active(&self, chat_id: ChatId, offset: u64, limit: u64) -> RepoResult<Vec<Warn>> {
        let tables = self.tables.lock();
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(tables
            .active_warns(chat_id)
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn deactivate_active(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<u64> {
        let mut tables = self.tables.lock();
        let mut changed = 0;
        for warn in tables
            .warns
            .iter_mut()
            .filter(|w| w.chat_id == chat_id && w.user_id == user_id && w.active)
        {
            warn.active = false;
            changed += 1;
        }
        Ok(changed)
    }
}
