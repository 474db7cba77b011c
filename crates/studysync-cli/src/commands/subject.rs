//! Subject catalog commands for CLI.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use studysync_core::{NewSubject, SubjectKind};

use super::{CmdResult, Session};

#[derive(Args)]
pub struct SubjectArgs {
    /// Subject name
    name: String,
    /// Course code
    #[arg(long)]
    code: String,
    /// hardcore, softcore, elective or personal
    #[arg(long, default_value = "hardcore")]
    kind: SubjectKind,
    /// Credit hours
    #[arg(long, default_value = "3")]
    credits: u32,
    #[arg(long, default_value = "")]
    instructor: String,
    #[arg(long, default_value = "")]
    classroom: String,
    #[arg(long, default_value = "")]
    color: String,
}

impl From<SubjectArgs> for NewSubject {
    fn from(args: SubjectArgs) -> Self {
        NewSubject {
            name: args.name,
            code: args.code,
            kind: args.kind,
            color: args.color,
            classroom: args.classroom,
            instructor: args.instructor,
            credits: args.credits,
        }
    }
}

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a subject
    Add(SubjectArgs),
    /// Replace a subject's details
    Update {
        /// Subject ID
        id: String,
        #[command(flatten)]
        subject: SubjectArgs,
    },
    /// Remove a subject
    Remove {
        /// Subject ID
        id: String,
    },
    /// List subjects
    List {
        /// Only subjects of this kind
        #[arg(long)]
        kind: Option<SubjectKind>,
    },
    /// Total credit hours
    Credits,
}

pub fn run(action: SubjectAction, today: Option<NaiveDate>) -> CmdResult {
    let mut session = Session::open(today)?;
    let ws = &mut session.workspace;

    match action {
        SubjectAction::Add(args) => {
            let subject = ws.add_subject(args.into())?;
            println!("Subject added: {}", subject.id);
        }
        SubjectAction::Update { id, subject } => {
            let subject = ws.update_subject(&id, subject.into())?;
            println!("Subject updated: {}", subject.id);
        }
        SubjectAction::Remove { id } => {
            let subject = ws.remove_subject(&id)?;
            println!("Subject removed: {}", subject.id);
        }
        SubjectAction::List { kind } => {
            return match kind {
                Some(kind) => super::print_json(&ws.subjects().by_kind(kind)),
                None => super::print_json(ws.subjects().list()),
            };
        }
        SubjectAction::Credits => {
            println!("{}", ws.subjects().total_credits());
            return Ok(());
        }
    }

    session.save()
}
