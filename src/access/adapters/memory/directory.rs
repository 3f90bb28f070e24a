//! In-memory directory for users, groups, and settings.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::access::{
    domain::{ChatId, Group, Role, User, UserId, UserProfile, normalize_handle},
    ports::{
        DirectoryError, DirectoryResult, GroupRepository, SettingsRepository, UserRepository,
    },
};

/// Thread-safe in-memory directory backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    users: HashMap<UserId, User>,
    groups: HashMap<ChatId, Group>,
    settings: HashMap<String, String>,
}

impl InMemoryDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DirectoryResult<std::sync::RwLockReadGuard<'_, DirectoryState>> {
        self.state
            .read()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> DirectoryResult<std::sync::RwLockWriteGuard<'_, DirectoryState>> {
        self.state
            .write()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

/// Finds the id of the user whose stored username matches `assignee` after
/// normalization, falling back to parsing `assignee` as a numeric user id.
fn resolve_user_id(state: &DirectoryState, assignee: &str) -> Option<UserId> {
    let wanted = normalize_handle(assignee);
    if !wanted.is_empty() {
        let by_username = state.users.values().find(|user| {
            user.username
                .as_deref()
                .is_some_and(|handle| normalize_handle(handle) == wanted)
        });
        if let Some(user) = by_username {
            return Some(user.user_id);
        }
    }
    assignee
        .trim()
        .parse::<i64>()
        .ok()
        .map(UserId::new)
        .filter(|id| state.users.contains_key(id))
}

#[async_trait]
impl UserRepository for InMemoryDirectory {
    async fn upsert_user(&self, profile: &UserProfile) -> DirectoryResult<()> {
        let mut state = self.write()?;
        state
            .users
            .entry(profile.user_id)
            .and_modify(|user| {
                user.username.clone_from(&profile.username);
                user.first_name.clone_from(&profile.first_name);
                user.last_name.clone_from(&profile.last_name);
            })
            .or_insert_with(|| profile.clone().into_new_user());
        Ok(())
    }

    async fn find_user(&self, id: UserId) -> DirectoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state.users.get(&id).cloned())
    }

    async fn role_of(&self, id: UserId) -> DirectoryResult<Option<Role>> {
        let state = self.read()?;
        Ok(state.users.get(&id).map(|user| user.role))
    }

    async fn set_role(&self, id: UserId, role: Role) -> DirectoryResult<u64> {
        let mut state = self.write()?;
        Ok(state.users.get_mut(&id).map_or(0, |user| {
            user.role = role;
            1
        }))
    }

    async fn increment_points(&self, assignee: &str, delta: i64) -> DirectoryResult<u64> {
        let mut state = self.write()?;
        let Some(target) = resolve_user_id(&state, assignee) else {
            return Ok(0);
        };
        Ok(state.users.get_mut(&target).map_or(0, |user| {
            user.points += delta;
            1
        }))
    }
}

#[async_trait]
impl GroupRepository for InMemoryDirectory {
    async fn upsert_group(&self, chat_id: ChatId, title: &str) -> DirectoryResult<()> {
        let mut state = self.write()?;
        state
            .groups
            .entry(chat_id)
            .and_modify(|group| title.clone_into(&mut group.title))
            .or_insert_with(|| Group {
                chat_id,
                title: title.to_owned(),
            });
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for InMemoryDirectory {
    async fn get_setting(&self, key: &str) -> DirectoryResult<Option<String>> {
        let state = self.read()?;
        Ok(state.settings.get(key).cloned())
    }

    async fn set_setting(&self, key: &str, value: &str) -> DirectoryResult<()> {
        let mut state = self.write()?;
        state.settings.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
