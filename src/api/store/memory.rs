use super::StoreError;
use crate::users::{NewUser, User, UserId};
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct State {
    last_id: UserId,
    users: BTreeMap<UserId, User>,
}

impl State {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| user.email == email && Some(user.id) != except)
    }
}

/// Shared in-process user table; clones see the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub async fn list(&self) -> Vec<User> {
        self.state.read().await.users.values().cloned().collect()
    }

    pub async fn get(&self, id: UserId) -> Result<User, StoreError> {
        self.state
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    pub async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        if state.email_taken(&user.email, None) {
            return Err(StoreError::DuplicateEmail);
        }
        state.last_id += 1;
        let created = User::with_id(state.last_id, user);
        state.users.insert(created.id, created.clone());
        Ok(created)
    }

    pub async fn update(&self, id: UserId, user: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if state.email_taken(&user.email, Some(id)) {
            return Err(StoreError::DuplicateEmail);
        }
        let updated = User::with_id(id, user);
        state.users.insert(id, updated.clone());
        Ok(updated)
    }

    pub async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        self.state
            .write()
            .await
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
