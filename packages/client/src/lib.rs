//! # Client crate
//!
//! Everything a front end needs to drive the notes backend without owning any
//! UI: a typed HTTP client that keeps the session cookie the way a browser
//! would, the note editor state machine, and the favorites grouping used by
//! the note list.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`http`] | [`NotesClient`], one method per backend endpoint |
//! | [`editor`] | [`Editor`] drafts plus the [`EditorMode`] state machine |
//! | [`error`] | [`ClientError`] and [`EditorError`] |

pub mod editor;
pub mod error;
pub mod http;

pub use editor::{partition_favorites, Editor, EditorMode, NoteGroups, Submission};
pub use error::{ClientError, EditorError};
pub use http::NotesClient;
