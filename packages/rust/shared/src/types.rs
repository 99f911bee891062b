//! Core domain types for Rollcall vote tables.

use serde::{Serialize, Serializer};

use crate::error::{Result, RollcallError};

/// Earliest Congress with supported LIS vote data.
pub const MIN_CONGRESS: u16 = 101;

/// Latest supported Congress.
pub const MAX_CONGRESS: u16 = 117;

// ---------------------------------------------------------------------------
// Congress / Session
// ---------------------------------------------------------------------------

/// A validated Congress number in `MIN_CONGRESS..=MAX_CONGRESS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Congress(u16);

impl Congress {
    /// Validate a raw Congress number.
    pub fn new(number: u16) -> Result<Self> {
        if !(MIN_CONGRESS..=MAX_CONGRESS).contains(&number) {
            return Err(RollcallError::invalid_range(format!(
                "congress {number} is not supported; expected {MIN_CONGRESS}..={MAX_CONGRESS}"
            )));
        }
        Ok(Self(number))
    }

    pub fn number(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for Congress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// First or second session of a Congress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Session {
    First,
    Second,
}

impl Session {
    /// Both sessions, in calendar order.
    pub const ALL: [Session; 2] = [Session::First, Session::Second];

    /// Validate a raw session number (must be 1 or 2).
    pub fn new(number: u8) -> Result<Self> {
        match number {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(RollcallError::invalid_range(format!(
                "session {other} is not supported; only sessions 1 and 2 exist"
            ))),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Serialize for Session {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

// ---------------------------------------------------------------------------
// DocumentKey
// ---------------------------------------------------------------------------

/// Identifies one LIS document: a session's vote list, or a single vote record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub congress: Congress,
    pub session: Session,
    /// `None` addresses the session's vote list.
    pub vote_number: Option<u32>,
}

impl DocumentKey {
    /// Key for the session-level vote list.
    pub fn vote_list(congress: Congress, session: Session) -> Self {
        Self {
            congress,
            session,
            vote_number: None,
        }
    }

    /// Key for a single roll-call vote record.
    pub fn vote(congress: Congress, session: Session, vote_number: u32) -> Self {
        Self {
            congress,
            session,
            vote_number: Some(vote_number),
        }
    }
}

impl std::fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.vote_number {
            Some(n) => write!(f, "{}-{} vote {n:05}", self.congress, self.session),
            None => write!(f, "{}-{} vote list", self.congress, self.session),
        }
    }
}

// ---------------------------------------------------------------------------
// PartyTally
// ---------------------------------------------------------------------------

/// Party grouping used for tie-vote breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    Democratic,
    Republican,
    Other,
}

impl Party {
    /// Normalize a member's party code: `D`, `R`, anything else is `Other`.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "D" => Self::Democratic,
            "R" => Self::Republican,
            _ => Self::Other,
        }
    }
}

/// Yea/Nay counts per party for one roll-call vote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PartyTally {
    pub democratic_yeas: u32,
    pub democratic_nays: u32,
    pub republican_yeas: u32,
    pub republican_nays: u32,
    pub other_yeas: u32,
    pub other_nays: u32,
}

impl PartyTally {
    /// Count one Yea (`yea == true`) or Nay for `party`.
    pub fn record(&mut self, party: Party, yea: bool) {
        *self.cell_mut(party, yea) += 1;
    }

    /// Count for one party/vote cell.
    pub fn count(&self, party: Party, yea: bool) -> u32 {
        match (party, yea) {
            (Party::Democratic, true) => self.democratic_yeas,
            (Party::Democratic, false) => self.democratic_nays,
            (Party::Republican, true) => self.republican_yeas,
            (Party::Republican, false) => self.republican_nays,
            (Party::Other, true) => self.other_yeas,
            (Party::Other, false) => self.other_nays,
        }
    }

    /// Sum of all cells.
    pub fn total(&self) -> u32 {
        self.democratic_yeas
            + self.democratic_nays
            + self.republican_yeas
            + self.republican_nays
            + self.other_yeas
            + self.other_nays
    }

    fn cell_mut(&mut self, party: Party, yea: bool) -> &mut u32 {
        match (party, yea) {
            (Party::Democratic, true) => &mut self.democratic_yeas,
            (Party::Democratic, false) => &mut self.democratic_nays,
            (Party::Republican, true) => &mut self.republican_yeas,
            (Party::Republican, false) => &mut self.republican_nays,
            (Party::Other, true) => &mut self.other_yeas,
            (Party::Other, false) => &mut self.other_nays,
        }
    }
}

// ---------------------------------------------------------------------------
// VoteRow / VoteTable
// ---------------------------------------------------------------------------

/// Label used when the tie-breaker was entitled to vote but did not.
pub const DID_NOT_VOTE: &str = "Did not vote";

/// The tie-breaker's action on a tied simple-majority vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiebreakVote {
    /// Cast a vote: `true` for Yea, `false` for Nay.
    Cast(bool),
    /// Entitled to break the tie but abstained.
    DidNotVote,
}

impl std::fmt::Display for TiebreakVote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cast(vote) => write!(f, "{vote}"),
            Self::DidNotVote => f.write_str(DID_NOT_VOTE),
        }
    }
}

impl Serialize for TiebreakVote {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Cast(vote) => serializer.serialize_bool(*vote),
            Self::DidNotVote => serializer.serialize_str(DID_NOT_VOTE),
        }
    }
}

/// Extra columns filled only when a vote ended with yeas == nays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TieDetail {
    pub party_tally: PartyTally,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiebreak_vote: Option<TiebreakVote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiebreak_authority: Option<String>,
    /// Majority requirement in force, e.g. `1/2` or `3/5`.
    pub vote_threshold_required: String,
}

/// One row per vote summary in a session's vote list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VoteRow {
    pub vote_number: Option<u32>,
    pub title: String,
    pub issue: Option<String>,
    pub yeas: Option<u32>,
    pub nays: Option<u32>,
    pub outcome: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tie: Option<TieDetail>,
}

impl VoteRow {
    /// A row carrying only its title (votes taken in secret session).
    pub fn title_only(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// All vote rows of one Congress session, in vote-list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTable {
    pub congress: Congress,
    pub session: Session,
    pub rows: Vec<VoteRow>,
}

impl VoteTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows whose vote ended in a tie.
    pub fn tie_count(&self) -> usize {
        self.rows.iter().filter(|r| r.tie.is_some()).count()
    }

    /// Tag every row with this table's Congress and session.
    pub fn into_tagged(self) -> Vec<TaggedVoteRow> {
        let (congress, session) = (self.congress, self.session);
        self.rows
            .into_iter()
            .map(|row| TaggedVoteRow {
                congress,
                session,
                row,
            })
            .collect()
    }
}

/// A vote row labelled with the session it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedVoteRow {
    pub congress: Congress,
    pub session: Session,
    #[serde(flatten)]
    pub row: VoteRow,
}
