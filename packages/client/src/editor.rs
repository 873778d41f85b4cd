//! # Note editor state
//!
//! One form serves both creating and editing. [`EditorMode`] records which of
//! the two is active and whether dictation is running, and [`Editor`] holds the
//! drafts. Dictation remembers the note being edited so stopping it returns to
//! the same mode.
//!
//! ```text
//!            begin_edit                 start_recording
//!   Idle ───────────────▶ Editing(id) ─────────────────▶ Recording { resume: Some(id) }
//!    │  ◀── saved/cancel ──┘          ◀── stop_recording ─┘
//!    │
//!    └── start_recording ──▶ Recording { resume: None } ── stop_recording ──▶ Idle
//! ```

use store::{NewNote, Note, NotePatch};
use uuid::Uuid;

use crate::error::EditorError;

const TEXT_PLAIN: &str = "text/plain";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorMode {
    /// Composing a new note.
    #[default]
    Idle,
    /// Editing an existing note.
    Editing(Uuid),
    /// Dictating into the content draft.
    Recording { resume: Option<Uuid> },
}

/// What the form would send if submitted now.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(NewNote),
    Update(Uuid, NotePatch),
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    mode: EditorMode,
    title: String,
    content: String,
    imported_text: Option<String>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Text pulled from the last imported file, shown beside the form.
    pub fn imported_text(&self) -> Option<&str> {
        self.imported_text.as_deref()
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.mode, EditorMode::Recording { .. })
    }

    /// The note a submit would update, if any.
    pub fn editing_id(&self) -> Option<Uuid> {
        match self.mode {
            EditorMode::Idle => None,
            EditorMode::Editing(id) => Some(id),
            EditorMode::Recording { resume } => resume,
        }
    }

    /// Load `note` into the drafts and switch to editing it.
    pub fn begin_edit(&mut self, note: &Note) {
        self.title = note.title.clone();
        self.content = note.content.clone();
        self.mode = EditorMode::Editing(note.id);
    }

    pub fn start_recording(&mut self) -> Result<(), EditorError> {
        if self.is_recording() {
            return Err(EditorError::AlreadyRecording);
        }
        self.mode = EditorMode::Recording {
            resume: self.editing_id(),
        };
        Ok(())
    }

    /// Leave dictation, returning to whatever mode it was started from.
    /// Does nothing when not recording.
    pub fn stop_recording(&mut self) {
        if let EditorMode::Recording { resume } = self.mode {
            self.mode = resume.map_or(EditorMode::Idle, EditorMode::Editing);
        }
    }

    /// Append a recognised phrase to the content draft.
    pub fn append_transcript(&mut self, text: &str) -> Result<(), EditorError> {
        if !self.is_recording() {
            return Err(EditorError::NotRecording);
        }
        self.content.push(' ');
        self.content.push_str(text);
        Ok(())
    }

    /// Read a dropped file as plain text. Only `text/plain` UTF-8 files are accepted.
    pub fn import_text(
        &mut self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<&str, EditorError> {
        if mime != TEXT_PLAIN {
            return Err(EditorError::UnsupportedFile {
                file_name: file_name.to_string(),
                mime: mime.to_string(),
            });
        }
        let text =
            String::from_utf8(bytes).map_err(|_| EditorError::NotUtf8(file_name.to_string()))?;
        let text = self.imported_text.insert(text);
        Ok(text.as_str())
    }

    /// Validate the drafts and describe the request to send.
    pub fn submit(&self) -> Result<Submission, EditorError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(EditorError::MissingFields);
        }

        Ok(match self.editing_id() {
            Some(id) => Submission::Update(
                id,
                NotePatch {
                    title: Some(self.title.clone()),
                    content: Some(self.content.clone()),
                    favorite: None,
                },
            ),
            None => Submission::Create(NewNote {
                title: self.title.clone(),
                content: self.content.clone(),
            }),
        })
    }

    /// Call once the submission was stored.
    pub fn saved(&mut self) {
        self.reset();
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.mode = EditorMode::Idle;
        self.title.clear();
        self.content.clear();
    }
}

/// Notes split for display, each group in the order received.
#[derive(Debug, Default, PartialEq)]
pub struct NoteGroups<'a> {
    pub favorites: Vec<&'a Note>,
    pub regular: Vec<&'a Note>,
}

pub fn partition_favorites(notes: &[Note]) -> NoteGroups<'_> {
    let (favorites, regular): (Vec<&Note>, Vec<&Note>) = notes.iter().partition(|n| n.favorite);
    NoteGroups { favorites, regular }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(title: &str, favorite: bool) -> Note {
        let now = Utc::now();
        Note {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            content: format!("{} body", title),
            favorite,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_editor_creates() {
        let mut editor = Editor::new();
        assert_eq!(editor.mode(), EditorMode::Idle);

        editor.set_title("T");
        editor.set_content("C");
        assert_eq!(
            editor.submit().unwrap(),
            Submission::Create(NewNote {
                title: "T".to_string(),
                content: "C".to_string(),
            })
        );
    }

    #[test]
    fn test_submit_requires_both_fields() {
        let mut editor = Editor::new();
        editor.set_title("  ");
        editor.set_content("C");
        assert_eq!(editor.submit(), Err(EditorError::MissingFields));

        editor.set_title("T");
        editor.set_content("");
        assert_eq!(editor.submit(), Err(EditorError::MissingFields));
    }

    #[test]
    fn test_begin_edit_then_save_resets() {
        let existing = note("Groceries", false);
        let mut editor = Editor::new();
        editor.begin_edit(&existing);

        assert_eq!(editor.mode(), EditorMode::Editing(existing.id));
        assert_eq!(editor.title(), "Groceries");

        editor.set_content("milk, eggs");
        match editor.submit().unwrap() {
            Submission::Update(id, patch) => {
                assert_eq!(id, existing.id);
                assert_eq!(patch.content.as_deref(), Some("milk, eggs"));
                assert_eq!(patch.favorite, None);
            }
            other => panic!("expected update, got {:?}", other),
        }

        editor.saved();
        assert_eq!(editor.mode(), EditorMode::Idle);
        assert!(editor.title().is_empty());
        assert!(editor.content().is_empty());
    }

    #[test]
    fn test_recording_resumes_previous_mode() {
        let existing = note("Meeting", false);
        let mut editor = Editor::new();
        editor.begin_edit(&existing);

        editor.start_recording().unwrap();
        assert_eq!(
            editor.mode(),
            EditorMode::Recording {
                resume: Some(existing.id)
            }
        );
        assert_eq!(editor.start_recording(), Err(EditorError::AlreadyRecording));
        assert_eq!(editor.editing_id(), Some(existing.id));

        editor.stop_recording();
        assert_eq!(editor.mode(), EditorMode::Editing(existing.id));

        let mut fresh = Editor::new();
        fresh.start_recording().unwrap();
        fresh.stop_recording();
        assert_eq!(fresh.mode(), EditorMode::Idle);
    }

    #[test]
    fn test_transcript_appends_with_space() {
        let mut editor = Editor::new();
        editor.set_content("Call");
        assert_eq!(editor.append_transcript("mom"), Err(EditorError::NotRecording));

        editor.start_recording().unwrap();
        editor.append_transcript("mom").unwrap();
        editor.append_transcript("tomorrow").unwrap();
        assert_eq!(editor.content(), "Call mom tomorrow");
    }

    #[test]
    fn test_import_text() {
        let mut editor = Editor::new();

        let err = editor
            .import_text("scan.pdf", "application/pdf", b"%PDF".to_vec())
            .unwrap_err();
        assert!(matches!(err, EditorError::UnsupportedFile { .. }));
        assert_eq!(editor.imported_text(), None);

        let err = editor
            .import_text("bad.txt", "text/plain", vec![0xff, 0xfe])
            .unwrap_err();
        assert_eq!(err, EditorError::NotUtf8("bad.txt".to_string()));

        let text = editor
            .import_text("todo.txt", "text/plain", b"buy milk".to_vec())
            .unwrap();
        assert_eq!(text, "buy milk");
        assert_eq!(editor.imported_text(), Some("buy milk"));
        assert!(editor.content().is_empty());
    }

    #[test]
    fn test_cancel_clears_drafts() {
        let mut editor = Editor::new();
        editor.begin_edit(&note("Draft", false));
        editor.start_recording().unwrap();
        editor.cancel();

        assert_eq!(editor.mode(), EditorMode::Idle);
        assert!(editor.title().is_empty());
    }

    #[test]
    fn test_partition_keeps_order() {
        let notes = vec![
            note("a", true),
            note("b", false),
            note("c", true),
            note("d", false),
        ];
        let groups = partition_favorites(&notes);

        let titles = |group: &Vec<&Note>| group.iter().map(|n| n.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&groups.favorites), vec!["a", "c"]);
        assert_eq!(titles(&groups.regular), vec!["b", "d"]);

        assert_eq!(partition_favorites(&[]), NoteGroups::default());
    }
}
