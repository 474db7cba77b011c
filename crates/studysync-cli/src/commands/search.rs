//! Dashboard search command.

use chrono::NaiveDate;

use super::{CmdResult, Session};

pub fn run(query: &str, today: Option<NaiveDate>) -> CmdResult {
    let session = Session::open(today)?;
    let results = session.workspace.search(query);
    tracing::debug!(query, hits = results.len(), "search finished");
    super::print_json(&results)
}
