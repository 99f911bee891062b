//! Session vote table builder: vote list → one row per vote, with tie detail.

use rollcall_records::{
    SessionIndex, TieBreak, TieResolution, VoteRecord, VoteSummary, decode_outcome,
    parse_tie_vote,
};
use rollcall_shared::{
    Congress, DocumentKey, Result, RollcallError, Session, TieDetail, TiebreakVote, VoteRow,
    VoteTable,
};
use rollcall_source::DocumentSource;
use tracing::{debug, info, instrument};

/// Title LIS publishes in place of votes taken in closed session.
pub const SECRET_SESSION_TITLE: &str = "Vote data is unavailable due to secret session.";

/// Threshold label recorded when a casting vote was possible.
const SIMPLE_MAJORITY: &str = "1/2";

/// Build the vote table for one Congress session.
///
/// The Congress and session are validated before anything is fetched. Any
/// decoding failure aborts the whole table.
#[instrument(skip(source))]
pub async fn build_vote_table<S: DocumentSource>(
    source: &S,
    congress: u16,
    session: u8,
) -> Result<VoteTable> {
    let congress = Congress::new(congress)?;
    let session = Session::new(session)?;

    let bytes = source
        .fetch(&DocumentKey::vote_list(congress, session))
        .await?;
    let index = SessionIndex::from_xml(&bytes)?;

    build_vote_table_from_index(source, congress, session, &index).await
}

/// Build a vote table from an already parsed vote list.
pub async fn build_vote_table_from_index<S: DocumentSource>(
    source: &S,
    congress: Congress,
    session: Session,
    index: &SessionIndex,
) -> Result<VoteTable> {
    let mut rows = Vec::with_capacity(index.votes.len());
    for summary in &index.votes {
        rows.push(build_row(source, congress, session, summary).await?);
    }

    let table = VoteTable {
        congress,
        session,
        rows,
    };

    info!(
        %congress,
        %session,
        votes = table.len(),
        ties = table.tie_count(),
        "vote table built"
    );

    Ok(table)
}

async fn build_row<S: DocumentSource>(
    source: &S,
    congress: Congress,
    session: Session,
    summary: &VoteSummary,
) -> Result<VoteRow> {
    let title = summary.title.trim();
    if title == SECRET_SESSION_TITLE {
        debug!("secret session entry, title only");
        return Ok(VoteRow::title_only(title));
    }

    let yeas = parse_number(&summary.vote_tally.yeas, "yeas")?;
    let nays = parse_number(&summary.vote_tally.nays, "nays")?;
    let vote_number = parse_number(&summary.vote_number, "vote_number")?;
    debug!(vote_number, "processing vote");

    let outcome = decode_outcome(&summary.result)?;

    let mut row = VoteRow {
        vote_number: Some(vote_number),
        title: title.to_string(),
        issue: Some(summary.issue.trim().to_string()),
        yeas: Some(yeas),
        nays: Some(nays),
        outcome: Some(outcome),
        tie: None,
    };

    if yeas == nays {
        let key = DocumentKey::vote(congress, session, vote_number);
        let bytes = source.fetch(&key).await?;
        let record = VoteRecord::from_xml(&bytes)?;
        row.tie = Some(tie_detail(parse_tie_vote(&record)?));
    }

    Ok(row)
}

fn tie_detail(tie: TieBreak) -> TieDetail {
    let (tiebreak_vote, tiebreak_authority, threshold) = match tie.resolution {
        TieResolution::Cast { vote, by_whom } => (
            Some(TiebreakVote::Cast(vote)),
            Some(by_whom),
            SIMPLE_MAJORITY.to_string(),
        ),
        TieResolution::DidNotVote => (
            Some(TiebreakVote::DidNotVote),
            None,
            SIMPLE_MAJORITY.to_string(),
        ),
        TieResolution::Supermajority { threshold } => (None, None, threshold),
    };

    TieDetail {
        party_tally: tie.tally,
        tiebreak_vote,
        tiebreak_authority,
        vote_threshold_required: threshold,
    }
}

fn parse_number(raw: &str, field: &str) -> Result<u32> {
    raw.trim()
        .parse()
        .map_err(|e| RollcallError::parse(format!("invalid {field} {raw:?}: {e}")))
}
