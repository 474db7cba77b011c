//! Notes, subject folders and external editor links.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Result, StoreError, ValidationError};

/// Where a note is edited.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EditorKind {
    GoogleDocs,
    Word,
    #[serde(rename = "onenote")]
    OneNote,
    #[default]
    Plain,
}

impl EditorKind {
    /// URL that opens a blank document in this editor. Plain notes fall
    /// back to Google Docs.
    pub fn create_url(&self) -> &'static str {
        match self {
            EditorKind::GoogleDocs | EditorKind::Plain => "https://docs.google.com/document/create",
            EditorKind::Word => "https://office.live.com/start/Word.aspx",
            EditorKind::OneNote => "https://www.onenote.com/notebooks",
        }
    }
}

impl FromStr for EditorKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google-docs" | "gdocs" => Ok(EditorKind::GoogleDocs),
            "word" => Ok(EditorKind::Word),
            "onenote" => Ok(EditorKind::OneNote),
            "plain" => Ok(EditorKind::Plain),
            other => Err(ValidationError::invalid(
                "editor",
                format!("expected google-docs, word, onenote or plain, got '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub subject: String,
    #[serde(default)]
    pub content: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub editor: EditorKind,
    #[serde(default)]
    pub external_link: Option<String>,
}

impl Note {
    /// The note's own link if it has one, otherwise a fresh document in its editor.
    pub fn editor_url(&self) -> &str {
        self.external_link
            .as_deref()
            .unwrap_or_else(|| self.editor.create_url())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub subject: String,
    #[serde(default)]
    pub content: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub editor: EditorKind,
    #[serde(default)]
    pub external_link: Option<String>,
}

/// A course file filed under a subject folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderMaterial {
    pub id: String,
    pub name: String,
    pub file_type: String,
    pub size_bytes: u64,
    pub uploaded_on: NaiveDate,
    pub subject: String,
}

/// Everything filed under one subject.
#[derive(Debug, Clone, Serialize)]
pub struct Folder<'a> {
    pub subject: &'a str,
    pub notes: Vec<&'a Note>,
    pub materials: Vec<&'a FolderMaterial>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    notes: Vec<Note>,
    #[serde(default)]
    materials: Vec<FolderMaterial>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns a validation error if the title or subject is blank.
    pub fn add(&mut self, draft: NewNote) -> Result<&Note> {
        if draft.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title").into());
        }
        if draft.subject.trim().is_empty() {
            return Err(ValidationError::MissingField("subject").into());
        }
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            subject: draft.subject,
            content: draft.content,
            date: draft.date,
            starred: false,
            editor: draft.editor,
            external_link: draft.external_link,
        };
        self.notes.push(note);
        Ok(&self.notes[self.notes.len() - 1])
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn delete(&mut self, id: &str) -> Result<Note> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| StoreError::not_found("Note", id))?;
        Ok(self.notes.remove(index))
    }

    /// Flip the star. Returns the new state.
    pub fn toggle_star(&mut self, id: &str) -> Result<bool> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| StoreError::not_found("Note", id))?;
        note.starred = !note.starred;
        Ok(note.starred)
    }

    pub fn starred(&self) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.starred).collect()
    }

    /// Case-insensitive substring match over title and content, optionally
    /// limited to one subject. An empty search matches everything.
    pub fn filter(&self, search: &str, subject: Option<&str>) -> Vec<&Note> {
        let needle = search.to_lowercase();
        self.notes
            .iter()
            .filter(|n| {
                n.title.to_lowercase().contains(&needle)
                    || n.content.to_lowercase().contains(&needle)
            })
            .filter(|n| subject.map_or(true, |s| n.subject == s))
            .collect()
    }

    pub fn add_material(
        &mut self,
        name: impl Into<String>,
        size_bytes: u64,
        subject: impl Into<String>,
        uploaded_on: NaiveDate,
    ) -> Result<&FolderMaterial> {
        let name = name.into();
        let subject = subject.into();
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        if subject.trim().is_empty() {
            return Err(ValidationError::MissingField("subject").into());
        }
        let material = FolderMaterial {
            id: Uuid::new_v4().to_string(),
            file_type: crate::assignment::file_type_of(&name),
            name,
            size_bytes,
            uploaded_on,
            subject,
        };
        self.materials.push(material);
        Ok(&self.materials[self.materials.len() - 1])
    }

    pub fn materials(&self) -> &[FolderMaterial] {
        &self.materials
    }

    pub fn folder<'a>(&'a self, subject: &'a str) -> Folder<'a> {
        Folder {
            subject,
            notes: self.notes.iter().filter(|n| n.subject == subject).collect(),
            materials: self
                .materials
                .iter()
                .filter(|m| m.subject == subject)
                .collect(),
        }
    }

    /// Distinct subjects that have notes or materials, sorted.
    pub fn folders(&self) -> Vec<&str> {
        let mut subjects: Vec<&str> = self
            .notes
            .iter()
            .map(|n| n.subject.as_str())
            .chain(self.materials.iter().map(|m| m.subject.as_str()))
            .collect();
        subjects.sort_unstable();
        subjects.dedup();
        subjects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 12).unwrap()
    }

    fn note(title: &str, subject: &str, content: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
            date: date(),
            editor: EditorKind::Plain,
            external_link: None,
        }
    }

    fn sample() -> Notebook {
        let mut book = Notebook::new();
        book.add(note("Derivatives", "Mathematics", "Chain rule and product rule"))
            .unwrap();
        book.add(note("Causes of WWII", "History", "Treaty of Versailles"))
            .unwrap();
        book.add(note("Organic reactions", "Chemistry", "Substitution, elimination"))
            .unwrap();
        book
    }

    #[test]
    fn filter_by_text_and_subject() {
        let book = sample();
        assert_eq!(book.filter("", None).len(), 3);
        assert_eq!(book.filter("RULE", None).len(), 1);
        assert_eq!(book.filter("tion", None).len(), 1);
        assert_eq!(book.filter("", Some("History")).len(), 1);
        assert!(book.filter("rule", Some("History")).is_empty());
    }

    #[test]
    fn star_toggle() {
        let mut book = sample();
        let id = book.list()[0].id.clone();
        assert!(book.toggle_star(&id).unwrap());
        assert_eq!(book.starred().len(), 1);
        assert!(!book.toggle_star(&id).unwrap());
        assert!(book.toggle_star("missing").is_err());
    }

    #[test]
    fn editor_url_prefers_external_link() {
        let mut book = Notebook::new();
        let mut draft = note("Essay draft", "English", "");
        draft.editor = EditorKind::Word;
        let id = book.add(draft).unwrap().id.clone();
        assert_eq!(
            book.get(&id).unwrap().editor_url(),
            "https://office.live.com/start/Word.aspx"
        );

        let mut linked = note("Shared doc", "English", "");
        linked.external_link = Some("https://docs.google.com/document/d/abc".to_string());
        let id = book.add(linked).unwrap().id.clone();
        assert_eq!(
            book.get(&id).unwrap().editor_url(),
            "https://docs.google.com/document/d/abc"
        );
    }

    #[test]
    fn folders_group_notes_and_materials() {
        let mut book = sample();
        book.add_material("Periodic_Table.PDF", 2048, "Chemistry", date())
            .unwrap();
        book.add_material("Lab Manual.docx", 4096, "Physics", date())
            .unwrap();

        let chemistry = book.folder("Chemistry");
        assert_eq!(chemistry.notes.len(), 1);
        assert_eq!(chemistry.materials.len(), 1);
        assert_eq!(chemistry.materials[0].file_type, "pdf");

        assert_eq!(
            book.folders(),
            ["Chemistry", "History", "Mathematics", "Physics"]
        );
    }

    #[test]
    fn editor_kind_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&EditorKind::GoogleDocs).unwrap(),
            "\"google-docs\""
        );
        assert_eq!(serde_json::to_string(&EditorKind::OneNote).unwrap(), "\"onenote\"");
        assert_eq!("onenote".parse::<EditorKind>().unwrap(), EditorKind::OneNote);
    }
}
