pub mod matcher;
pub mod normalize;
pub mod summary;
pub mod tolerance;

pub use matcher::{join_candidates, match_records, CandidateSide, MatchCandidate, MatchResult};
pub use normalize::normalize;
pub use summary::{match_rate_percent, summarize, ReconSummary, SideSummary};
pub use tolerance::{validate_tolerance, Tolerances};
