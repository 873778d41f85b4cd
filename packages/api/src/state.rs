//! Shared handler state.

use std::sync::Arc;

use store::{AccountStore, NoteStore};

use crate::auth::{SessionService, TokenSigner};
use crate::notes::NoteService;

/// Everything a handler needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionService>,
    pub notes: Arc<NoteService>,
    /// Whether the session cookie carries the `Secure` attribute.
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        notes: Arc<dyn NoteStore>,
        signer: TokenSigner,
        secure_cookies: bool,
    ) -> Self {
        Self {
            sessions: Arc::new(SessionService::new(accounts, signer)),
            notes: Arc::new(NoteService::new(notes)),
            secure_cookies,
        }
    }
}
