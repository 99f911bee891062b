//! Tie-vote analysis for a single roll-call record.

use rollcall_shared::{Party, PartyTally, Result};
use tracing::debug;

use crate::decode::{CastVote, MajorityRequirement, decode_cast_vote};
use crate::document::{MemberVote, VoteRecord};

/// How a tied vote was (or could not be) resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TieResolution {
    /// Simple majority and the tie-breaker voted.
    Cast { vote: bool, by_whom: String },
    /// Simple majority but the tie-breaker did not vote.
    DidNotVote,
    /// A supermajority was required, so no casting vote applies.
    Supermajority { threshold: String },
}

/// Result of analysing a tied roll call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieBreak {
    pub resolution: TieResolution,
    pub tally: PartyTally,
}

/// Count each member's Yea/Nay by party. Other vote strings are skipped.
pub fn tally_parties(members: &[MemberVote]) -> PartyTally {
    let mut tally = PartyTally::default();
    for member in members {
        let yea = match member.vote_cast.trim() {
            "Yea" => true,
            "Nay" => false,
            _ => continue,
        };
        tally.record(Party::from_code(&member.party), yea);
    }
    tally
}

/// Analyse a tied vote record: party tallies plus the tie-breaker's action.
pub fn parse_tie_vote(record: &VoteRecord) -> Result<TieBreak> {
    let tally = tally_parties(&record.members);

    let requirement = MajorityRequirement::parse(record.effective_majority_requirement())?;
    if !requirement.allows_tiebreak() {
        debug!(
            vote_number = %record.vote_number,
            threshold = requirement.as_str(),
            "supermajority vote, no tiebreak"
        );
        return Ok(TieBreak {
            resolution: TieResolution::Supermajority {
                threshold: requirement.as_str().to_string(),
            },
            tally,
        });
    }

    let (raw_vote, by_whom) = match &record.tie_breaker {
        Some(tb) => (tb.tie_breaker_vote.as_str(), tb.by_whom.trim()),
        None => ("", ""),
    };

    let resolution = match decode_cast_vote(raw_vote)? {
        CastVote::NoVote => TieResolution::DidNotVote,
        cast => TieResolution::Cast {
            vote: cast == CastVote::Yea,
            by_whom: by_whom.to_string(),
        },
    };

    Ok(TieBreak { resolution, tally })
}
