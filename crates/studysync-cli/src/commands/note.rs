//! Notes and course material commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use studysync_core::{EditorKind, NewNote};

use super::{CmdResult, Session};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Add a note
    Add {
        /// Note title
        title: String,
        /// Subject folder
        #[arg(long)]
        subject: String,
        /// Note body
        #[arg(long, default_value = "")]
        content: String,
        /// google-docs, word, onenote or plain
        #[arg(long, default_value = "plain")]
        editor: EditorKind,
        /// Link to the document in its editor
        #[arg(long)]
        link: Option<String>,
    },
    /// List notes
    List {
        /// Match title or content
        #[arg(long, default_value = "")]
        search: String,
        /// Only this subject
        #[arg(long)]
        subject: Option<String>,
        /// Only starred notes
        #[arg(long)]
        starred: bool,
    },
    /// Star or unstar a note
    Star {
        /// Note ID
        id: String,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
    },
    /// Print the URL that opens the note's editor
    Open {
        /// Note ID
        id: String,
    },
    /// File a course material under a subject
    Material {
        /// File name
        name: String,
        #[arg(long)]
        subject: String,
        /// Size in bytes
        #[arg(long, default_value = "0")]
        size: u64,
    },
    /// Show one subject folder, or list folders
    Folder {
        subject: Option<String>,
    },
}

pub fn run(action: NoteAction, today: Option<NaiveDate>) -> CmdResult {
    let mut session = Session::open(today)?;
    let ws = &mut session.workspace;

    match action {
        NoteAction::Add {
            title,
            subject,
            content,
            editor,
            link,
        } => {
            let date = ws.today();
            let note = ws.add_note(NewNote {
                title,
                subject,
                content,
                date,
                editor,
                external_link: link,
            })?;
            println!("Note created: {}", note.id);
        }
        NoteAction::List {
            search,
            subject,
            starred,
        } => {
            let mut notes = ws.notebook().filter(&search, subject.as_deref());
            if starred {
                notes.retain(|n| n.starred);
            }
            return super::print_json(&notes);
        }
        NoteAction::Star { id } => {
            let starred = ws.toggle_note_star(&id)?;
            println!("{}", if starred { "starred" } else { "unstarred" });
        }
        NoteAction::Delete { id } => {
            let note = ws.delete_note(&id)?;
            println!("Note deleted: {}", note.id);
        }
        NoteAction::Open { id } => {
            let note = ws
                .notebook()
                .get(&id)
                .ok_or_else(|| format!("note not found: {id}"))?;
            println!("{}", note.editor_url());
            return Ok(());
        }
        NoteAction::Material {
            name,
            subject,
            size,
        } => {
            let material = ws.add_material(name, size, subject)?;
            println!("Material filed: {}", material.id);
        }
        NoteAction::Folder { subject } => {
            return match subject {
                Some(subject) => super::print_json(&ws.notebook().folder(&subject)),
                None => super::print_json(&ws.notebook().folders()),
            };
        }
    }

    session.save()
}
