//! Record and result types exchanged with the storage and API layers.
//!
//! Job and candidate records arrive loosely validated from the CRUD layer; the
//! [`features`](crate::features) module is the boundary that turns them into typed feature
//! vectors. Nothing in this module mutates a record after it is read.

pub mod records;
pub mod result;

#[cfg(test)]
mod tests;

pub use records::{
    CandidateRecord, FeedbackRecord, JobRecord, Outcome, OutcomeError, RawExperience,
    ValuesScores,
};
pub use result::{Factor, MatchResult, RecommendationTier, SubScores};
