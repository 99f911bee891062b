//! Typed views of the two LIS XML documents.
//!
//! - Vote list (`vote_menu_{congress}_{session}.xml`): a `<vote_summary>` root
//!   whose `<votes>` hold one `<vote>` per roll call.
//! - Vote record (`vote_{congress}_{session}_{nnnnn}.xml`): a `<roll_call_vote>`
//!   root with a `<members>` list and an optional `<tie_breaker>`.
//!
//! Fields are kept as the document's strings; converting them to numbers and
//! enums is the caller's job so that partial entries (secret sessions) parse.

use rollcall_shared::{Result, RollcallError};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Vote list
// ---------------------------------------------------------------------------

/// Parsed vote list for one Congress session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionIndex {
    /// Vote summaries in document order.
    pub votes: Vec<VoteSummary>,
}

/// One `<vote>` entry of a vote list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VoteSummary {
    #[serde(default)]
    pub vote_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub issue: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub vote_tally: VoteTally,
}

/// `<vote_tally>` totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VoteTally {
    #[serde(default)]
    pub yeas: String,
    #[serde(default)]
    pub nays: String,
}

#[derive(Deserialize)]
struct RawVoteList {
    #[serde(default)]
    votes: RawVotes,
}

#[derive(Default, Deserialize)]
struct RawVotes {
    #[serde(default)]
    vote: Vec<VoteSummary>,
}

impl SessionIndex {
    /// Parse a vote list document.
    pub fn from_xml(bytes: &[u8]) -> Result<Self> {
        let raw: RawVoteList = deserialize(bytes, "vote list")?;
        Ok(Self {
            votes: raw.votes.vote,
        })
    }
}

// ---------------------------------------------------------------------------
// Vote record
// ---------------------------------------------------------------------------

/// Parsed record of a single roll-call vote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteRecord {
    pub vote_number: String,
    /// Record-level majority requirement.
    pub majority_requirement: String,
    pub tie_breaker: Option<TieBreaker>,
    pub members: Vec<MemberVote>,
}

/// `<tie_breaker>` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TieBreaker {
    /// Who was entitled to cast the deciding vote.
    #[serde(default)]
    pub by_whom: String,
    /// `Yea`, `Nay`, or empty when no vote was cast.
    #[serde(default)]
    pub tie_breaker_vote: String,
    /// Some documents nest the majority requirement here.
    #[serde(default)]
    pub majority_requirement: String,
}

/// One `<member>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemberVote {
    #[serde(default)]
    pub member_full: String,
    #[serde(default)]
    pub party: String,
    #[serde(default)]
    pub vote_cast: String,
}

#[derive(Deserialize)]
struct RawVoteRecord {
    #[serde(default)]
    vote_number: String,
    #[serde(default)]
    majority_requirement: String,
    #[serde(default)]
    tie_breaker: Option<TieBreaker>,
    #[serde(default)]
    members: RawMembers,
}

#[derive(Default, Deserialize)]
struct RawMembers {
    #[serde(default)]
    member: Vec<MemberVote>,
}

impl VoteRecord {
    /// Parse a roll-call vote document.
    pub fn from_xml(bytes: &[u8]) -> Result<Self> {
        let raw: RawVoteRecord = deserialize(bytes, "vote record")?;
        Ok(Self {
            vote_number: raw.vote_number,
            majority_requirement: raw.majority_requirement,
            tie_breaker: raw.tie_breaker,
            members: raw.members.member,
        })
    }

    /// The majority requirement in force: the tie-breaker's own value if it
    /// carries one, otherwise the record-level value.
    pub fn effective_majority_requirement(&self) -> &str {
        self.tie_breaker
            .as_ref()
            .map(|tb| tb.majority_requirement.trim())
            .filter(|req| !req.is_empty())
            .unwrap_or_else(|| self.majority_requirement.trim())
    }
}

fn deserialize<T: serde::de::DeserializeOwned>(bytes: &[u8], what: &str) -> Result<T> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| RollcallError::parse(format!("{what} is not valid UTF-8: {e}")))?;
    quick_xml::de::from_str(text)
        .map_err(|e| RollcallError::parse(format!("malformed {what} XML: {e}")))
}
