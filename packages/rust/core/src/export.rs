//! Flat-file export of collected vote rows.
//!
//! CSV keeps one column per field with human-readable headers; JSON wraps the
//! rows in a small header recording when and by which version it was made.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rollcall_shared::{ExportFormat, Result, RollcallError, TaggedVoteRow};
use serde::Serialize;
use tracing::{info, instrument};

/// Version stamped into JSON exports.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One CSV record. Absent values become empty cells.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Congress")]
    congress: u16,
    #[serde(rename = "Session")]
    session: u8,
    #[serde(rename = "Vote number")]
    vote_number: Option<u32>,
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Issue")]
    issue: Option<&'a str>,
    #[serde(rename = "Yeas")]
    yeas: Option<u32>,
    #[serde(rename = "Nays")]
    nays: Option<u32>,
    #[serde(rename = "Outcome")]
    outcome: Option<bool>,
    #[serde(rename = "Democratic Party Yeas")]
    democratic_yeas: Option<u32>,
    #[serde(rename = "Democratic Party Nays")]
    democratic_nays: Option<u32>,
    #[serde(rename = "Republican Party Yeas")]
    republican_yeas: Option<u32>,
    #[serde(rename = "Republican Party Nays")]
    republican_nays: Option<u32>,
    #[serde(rename = "Other Party Yeas")]
    other_yeas: Option<u32>,
    #[serde(rename = "Other Party Nays")]
    other_nays: Option<u32>,
    #[serde(rename = "Tiebreaking Vote")]
    tiebreak_vote: Option<String>,
    #[serde(rename = "Tiebreaking Authority")]
    tiebreak_authority: Option<&'a str>,
    #[serde(rename = "Vote Threshold Required")]
    vote_threshold_required: Option<&'a str>,
}

impl<'a> From<&'a TaggedVoteRow> for CsvRow<'a> {
    fn from(tagged: &'a TaggedVoteRow) -> Self {
        let row = &tagged.row;
        let tie = row.tie.as_ref();
        let tally = tie.map(|t| t.party_tally);

        Self {
            congress: tagged.congress.number(),
            session: tagged.session.number(),
            vote_number: row.vote_number,
            title: &row.title,
            issue: row.issue.as_deref(),
            yeas: row.yeas,
            nays: row.nays,
            outcome: row.outcome,
            democratic_yeas: tally.map(|t| t.democratic_yeas),
            democratic_nays: tally.map(|t| t.democratic_nays),
            republican_yeas: tally.map(|t| t.republican_yeas),
            republican_nays: tally.map(|t| t.republican_nays),
            other_yeas: tally.map(|t| t.other_yeas),
            other_nays: tally.map(|t| t.other_nays),
            tiebreak_vote: tie.and_then(|t| t.tiebreak_vote).map(|v| v.to_string()),
            tiebreak_authority: tie.and_then(|t| t.tiebreak_authority.as_deref()),
            vote_threshold_required: tie.map(|t| t.vote_threshold_required.as_str()),
        }
    }
}

/// JSON export document.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub tool_version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub row_count: usize,
    pub rows: &'a [TaggedVoteRow],
}

impl<'a> ExportDocument<'a> {
    pub fn new(rows: &'a [TaggedVoteRow]) -> Self {
        Self {
            tool_version: TOOL_VERSION,
            generated_at: Utc::now(),
            row_count: rows.len(),
            rows,
        }
    }
}

/// Write rows as CSV, header first.
pub fn write_csv<W: Write>(rows: &[TaggedVoteRow], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(CsvRow::from(row))
            .map_err(|e| RollcallError::Export(format!("CSV serialization failed: {e}")))?;
    }
    csv.flush()
        .map_err(|e| RollcallError::Export(format!("CSV flush failed: {e}")))?;
    Ok(())
}

/// Write rows as a pretty-printed JSON export document.
pub fn write_json<W: Write>(rows: &[TaggedVoteRow], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &ExportDocument::new(rows))
        .map_err(|e| RollcallError::Export(format!("JSON serialization failed: {e}")))
}

/// Export rows to `path` in the given format, creating parent directories.
#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn export_rows(rows: &[TaggedVoteRow], path: &Path, format: ExportFormat) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| RollcallError::io(parent, e))?;
    }

    let file = std::fs::File::create(path).map_err(|e| RollcallError::io(path, e))?;
    let writer = std::io::BufWriter::new(file);
    match format {
        ExportFormat::Csv => write_csv(rows, writer)?,
        ExportFormat::Json => write_json(rows, writer)?,
    }

    info!(path = %path.display(), ?format, "export written");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_shared::{
        Congress, PartyTally, Session, TieDetail, TiebreakVote, VoteRow, VoteTable,
    };

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("rollcall-export-test-{}", uuid::Uuid::now_v7()))
    }

    fn sample_rows() -> Vec<TaggedVoteRow> {
        let tally = PartyTally {
            democratic_yeas: 1,
            republican_nays: 2,
            other_nays: 1,
            ..PartyTally::default()
        };
        let rows = vec![
            VoteRow {
                vote_number: Some(54),
                title: "On the Nomination PN58, Betsy DeVos".into(),
                issue: Some("PN58".into()),
                yeas: Some(50),
                nays: Some(50),
                outcome: Some(true),
                tie: Some(TieDetail {
                    party_tally: tally,
                    tiebreak_vote: Some(TiebreakVote::Cast(true)),
                    tiebreak_authority: Some("The Vice President".into()),
                    vote_threshold_required: "1/2".into(),
                }),
            },
            VoteRow {
                vote_number: Some(55),
                title: "Cloture".into(),
                issue: Some("S. 1".into()),
                yeas: Some(48),
                nays: Some(48),
                outcome: Some(false),
                tie: Some(TieDetail {
                    party_tally: PartyTally::default(),
                    tiebreak_vote: Some(TiebreakVote::DidNotVote),
                    tiebreak_authority: None,
                    vote_threshold_required: "1/2".into(),
                }),
            },
            VoteRow::title_only("Vote data is unavailable due to secret session."),
        ];
        VoteTable {
            congress: Congress::new(115).unwrap(),
            session: Session::First,
            rows,
        }
        .into_tagged()
    }

    #[test]
    fn csv_has_named_columns_and_empty_cells() {
        let mut out = Vec::new();
        write_csv(&sample_rows(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Congress,Session,Vote number,Title,Issue,Yeas,Nays,Outcome,\
             Democratic Party Yeas,Democratic Party Nays,Republican Party Yeas,\
             Republican Party Nays,Other Party Yeas,Other Party Nays,\
             Tiebreaking Vote,Tiebreaking Authority,Vote Threshold Required"
        );
        assert_eq!(
            lines[1],
            "115,1,54,\"On the Nomination PN58, Betsy DeVos\",PN58,50,50,true,\
             1,0,0,2,0,1,true,The Vice President,1/2"
        );
        assert_eq!(
            lines[2],
            "115,1,55,Cloture,S. 1,48,48,false,0,0,0,0,0,0,Did not vote,,1/2"
        );
        assert_eq!(
            lines[3],
            "115,1,,Vote data is unavailable due to secret session.,,,,,,,,,,,,,"
        );
    }

    #[test]
    fn json_export_carries_header() {
        let rows = sample_rows();
        let mut out = Vec::new();
        write_json(&rows, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["tool_version"], TOOL_VERSION);
        assert_eq!(json["row_count"], 3);
        assert!(json["generated_at"].is_string());
        assert_eq!(json["rows"][0]["vote_number"], 54);
        assert_eq!(json["rows"][0]["tie"]["tiebreak_vote"], true);
        assert_eq!(json["rows"][1]["tie"]["tiebreak_vote"], "Did not vote");
        assert!(json["rows"][2]["vote_number"].is_null());
    }

    #[test]
    fn export_creates_parent_dirs() {
        let tmp = temp_dir();
        let path = tmp.join("nested").join("votes.csv");

        let written = export_rows(&sample_rows(), &path, ExportFormat::Csv).unwrap();
        assert_eq!(written, path);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Congress,Session"));

        let json_path = tmp.join("votes.json");
        export_rows(&sample_rows(), &json_path, ExportFormat::Json).unwrap();
        assert!(json_path.is_file());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn empty_export_is_valid() {
        let mut out = Vec::new();
        write_json(&[], &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["row_count"], 0);
        assert_eq!(json["rows"], serde_json::json!([]));
    }
}
