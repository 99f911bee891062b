//! Multi-session collection: build every requested vote table and
//! concatenate the rows, tagged with their Congress and session.

use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use rollcall_shared::{Congress, MAX_CONGRESS, MIN_CONGRESS, Result, Session, TaggedVoteRow};
use rollcall_source::DocumentSource;
use tracing::{info, instrument};

use crate::table::build_vote_table;

/// Which Congress sessions to collect.
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// Congress numbers, inclusive.
    pub congresses: RangeInclusive<u16>,
    /// Session numbers within each Congress.
    pub sessions: Vec<u8>,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            congresses: MIN_CONGRESS..=MAX_CONGRESS,
            sessions: vec![1, 2],
        }
    }
}

/// Result of a collection run.
#[derive(Debug)]
pub struct CollectResult {
    /// All rows, in Congress then session order.
    pub rows: Vec<TaggedVoteRow>,
    /// Number of session tables built.
    pub tables: usize,
    /// Rows that ended in a tie.
    pub tie_votes: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting collection status.
pub trait ProgressReporter: Send + Sync {
    /// Called before each session's table is built.
    fn phase(&self, name: &str);
    /// Called after a session's table is built.
    fn table_built(
        &self,
        congress: Congress,
        session: Session,
        rows: usize,
        current: usize,
        total: usize,
    );
    /// Called when the collection completes.
    fn done(&self, result: &CollectResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn table_built(&self, _: Congress, _: Session, _rows: usize, _current: usize, _total: usize) {}
    fn done(&self, _result: &CollectResult) {}
}

/// Build and concatenate the vote tables for every requested session.
///
/// The whole request is validated before the first fetch; a failure in any
/// session aborts the run.
#[instrument(skip_all, fields(congresses = ?config.congresses, sessions = ?config.sessions))]
pub async fn collect_votes<S: DocumentSource>(
    source: &S,
    config: &CollectConfig,
    progress: &dyn ProgressReporter,
) -> Result<CollectResult> {
    let start = Instant::now();
    let plan = plan(config)?;
    let total = plan.len();

    info!(tables = total, "starting collection");

    let mut rows = Vec::new();
    let mut tie_votes = 0;

    for (i, (congress, session)) in plan.into_iter().enumerate() {
        progress.phase(&format!("Congress {congress}, session {session}"));

        let table = build_vote_table(source, congress.number(), session.number()).await?;
        progress.table_built(congress, session, table.len(), i + 1, total);

        tie_votes += table.tie_count();
        rows.extend(table.into_tagged());
    }

    let result = CollectResult {
        rows,
        tables: total,
        tie_votes,
        elapsed: start.elapsed(),
    };

    info!(
        tables = result.tables,
        rows = result.rows.len(),
        tie_votes = result.tie_votes,
        elapsed_ms = result.elapsed.as_millis(),
        "collection completed"
    );

    progress.done(&result);
    Ok(result)
}

/// Validate the request and expand it into (congress, session) pairs.
fn plan(config: &CollectConfig) -> Result<Vec<(Congress, Session)>> {
    let sessions = config
        .sessions
        .iter()
        .map(|s| Session::new(*s))
        .collect::<Result<Vec<_>>>()?;

    let mut pairs = Vec::new();
    for number in config.congresses.clone() {
        let congress = Congress::new(number)?;
        pairs.extend(sessions.iter().map(|s| (congress, *s)));
    }
    Ok(pairs)
}
