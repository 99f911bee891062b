//! Decoders for the categorical strings LIS documents use.
//!
//! Each decoder accepts a closed set of values and rejects anything else with
//! [`RollcallError::UnrecognizedValue`]; nothing is silently defaulted.

use rollcall_shared::{Result, RollcallError};

// ---------------------------------------------------------------------------
// Cast votes
// ---------------------------------------------------------------------------

/// A tie-breaker's recorded vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastVote {
    Yea,
    Nay,
    /// The vote element was empty: no vote was cast.
    NoVote,
}

impl CastVote {
    /// `Some(true)` for Yea, `Some(false)` for Nay, `None` when no vote was cast.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Yea => Some(true),
            Self::Nay => Some(false),
            Self::NoVote => None,
        }
    }
}

/// Decode a tie-breaker vote string: `Yea`, `Nay`, or empty.
pub fn decode_cast_vote(raw: &str) -> Result<CastVote> {
    match raw.trim() {
        "Yea" => Ok(CastVote::Yea),
        "Nay" => Ok(CastVote::Nay),
        "" => Ok(CastVote::NoVote),
        other => Err(RollcallError::unrecognized("vote", other)),
    }
}

// ---------------------------------------------------------------------------
// Majority requirement
// ---------------------------------------------------------------------------

/// Fraction of votes a question needs to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorityRequirement {
    /// `1/2`: a tie may be broken by the presiding officer.
    Simple,
    /// `3/5`
    ThreeFifths,
    /// `2/3`
    TwoThirds,
}

impl MajorityRequirement {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim() {
            "1/2" => Ok(Self::Simple),
            "3/5" => Ok(Self::ThreeFifths),
            "2/3" => Ok(Self::TwoThirds),
            other => Err(RollcallError::unrecognized("majority requirement", other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "1/2",
            Self::ThreeFifths => "3/5",
            Self::TwoThirds => "2/3",
        }
    }

    /// Only a simple majority lets a casting vote decide a tie.
    pub fn allows_tiebreak(self) -> bool {
        matches!(self, Self::Simple)
    }
}

/// Decode a majority requirement; `true` means a simple majority.
pub fn decode_majority_requirement(raw: &str) -> Result<bool> {
    Ok(MajorityRequirement::parse(raw)?.allows_tiebreak())
}

// ---------------------------------------------------------------------------
// Vote results
// ---------------------------------------------------------------------------

/// Every result phrase seen in vote lists, with whether it means the question carried.
pub const OUTCOME_PHRASES: [(&str, bool); 14] = [
    ("Confirmed", true),
    ("Agreed to", true),
    ("Passed", true),
    ("Sustained", true),
    ("Guilty", true),
    ("Held Germane", true),
    ("Veto Overridden", true),
    ("Well Taken", true),
    ("Rejected", false),
    ("Not Well Taken", false),
    ("Not Sustained", false),
    ("Not Guilty", false),
    ("Held Nongermane", false),
    ("Veto Sustained", false),
];

/// Decode a vote-list `result` phrase into pass (`true`) or fail.
pub fn decode_outcome(raw: &str) -> Result<bool> {
    let phrase = raw.trim();
    OUTCOME_PHRASES
        .iter()
        .find(|(known, _)| *known == phrase)
        .map(|(_, passed)| *passed)
        .ok_or_else(|| RollcallError::unrecognized("vote result", phrase))
}
