use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Account, NewAccount, NewNote, Note, NotePatch};
use crate::repo::{AccountStore, NoteStore};

/// In-memory AccountStore + NoteStore for testing and local runs.
///
/// All state sits behind one mutex, so each operation is atomic with respect to
/// every other one.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<Uuid, Account>,
    notes: HashMap<Uuid, Note>,
    last_stamp: Option<DateTime<Utc>>,
}

impl Inner {
    /// Strictly increasing timestamps, so creation order is always recoverable
    /// even when two inserts land within the clock's resolution.
    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut inner = self.lock()?;

        if inner.accounts.values().any(|a| a.email == account.email) {
            return Err(StoreError::DuplicateEmail);
        }
        if inner.accounts.values().any(|a| a.username == account.username) {
            return Err(StoreError::DuplicateUsername);
        }

        let now = inner.next_stamp();
        let stored = Account {
            id: Uuid::new_v4(),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            created_at: now,
            updated_at: now,
        };
        inner.accounts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.accounts.get(&id).cloned())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn insert_note(&self, owner: Uuid, note: NewNote) -> Result<Note, StoreError> {
        let mut inner = self.lock()?;

        if !inner.accounts.contains_key(&owner) {
            return Err(StoreError::MissingOwner);
        }

        let now = inner.next_stamp();
        let stored = Note {
            id: Uuid::new_v4(),
            user_id: owner,
            title: note.title,
            content: note.content,
            favorite: false,
            created_at: now,
            updated_at: now,
        };
        inner.notes.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_notes(&self, owner: Uuid) -> Result<Vec<Note>, StoreError> {
        let inner = self.lock()?;
        let mut notes: Vec<Note> = inner
            .notes
            .values()
            .filter(|n| n.user_id == owner)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(notes)
    }

    async fn update_note(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: NotePatch,
    ) -> Result<Option<Note>, StoreError> {
        let mut inner = self.lock()?;
        let now = if patch.is_empty() {
            None
        } else {
            Some(inner.next_stamp())
        };

        let Some(note) = inner.notes.get_mut(&id).filter(|n| n.user_id == owner) else {
            return Ok(None);
        };
        if let Some(now) = now {
            patch.apply(note, now);
        }
        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;

        let owned = inner.notes.get(&id).is_some_and(|n| n.user_id == owner);
        if owned {
            inner.notes.remove(&id);
        }
        Ok(owned)
    }
}
