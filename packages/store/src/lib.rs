pub mod error;
pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

pub use error::StoreError;
pub use models::{Account, AccountInfo, NewAccount, NewNote, Note, NotePatch};
pub use repo::{AccountStore, NoteStore};
