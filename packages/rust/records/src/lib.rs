//! LIS roll-call documents: typed XML parsing, categorical decoders, and
//! tie-vote analysis.
//!
//! Nothing here performs I/O; callers hand in document bytes.

pub mod decode;
pub mod document;
pub mod tie;

pub use decode::{
    CastVote, MajorityRequirement, OUTCOME_PHRASES, decode_cast_vote,
    decode_majority_requirement, decode_outcome,
};
pub use document::{MemberVote, SessionIndex, TieBreaker, VoteRecord, VoteSummary, VoteTally};
pub use tie::{TieBreak, TieResolution, parse_tie_vote, tally_parties};
